use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A downloadable file attached to an addon.
///
/// Returned verbatim from the upstream; file records are never persisted
/// locally.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonFile {
    pub id: i32,
    pub file_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub file_date: OffsetDateTime,
    #[serde(default)]
    pub file_length: i64,
    /// 1 = release, 2 = beta, 3 = alpha.
    pub release_type: i32,
    pub download_url: String,
    #[serde(default, rename = "gameVersion")]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub is_alternate: bool,
    #[serde(default)]
    pub alternate_file_id: i32,
}

/// Composite key identifying one file of one addon.
///
/// Only used as a batch-lookup request key; the upstream expects the
/// PascalCase member names on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AddonFileKey {
    #[serde(rename = "AddonId")]
    pub addon_id: i32,
    #[serde(rename = "FileId")]
    pub file_id: i32,
}
impl AddonFileKey {
    pub fn new(addon_id: i32, file_id: i32) -> Self {
        Self { addon_id, file_id }
    }
}
impl From<(i32, i32)> for AddonFileKey {
    fn from((addon_id, file_id): (i32, i32)) -> Self {
        Self::new(addon_id, file_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_file() {
        let json = r#"{
            "id": 2724367,
            "fileName": "MouseTweaks-2.10-mc1.12.2.jar",
            "fileDate": "2019-05-24T13:31:03.74Z",
            "fileLength": 40553,
            "releaseType": 1,
            "fileStatus": 4,
            "downloadUrl": "https://example.invalid/files/2724/367/MouseTweaks-2.10-mc1.12.2.jar",
            "gameVersion": ["1.12.2", "1.12.1"],
            "isAlternate": false,
            "alternateFileId": 0
        }"#;
        let file: AddonFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, 2724367);
        assert_eq!(file.game_versions, vec!["1.12.2", "1.12.1"]);
        assert!(!file.is_alternate);
    }

    #[test]
    fn test_key_serializes_pascal_case() {
        let key = AddonFileKey::new(59652, 2724367);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"AddonId":59652,"FileId":2724367}"#);
    }
}
