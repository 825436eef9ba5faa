use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// Broad game/category grouping enumerated by the upstream service.
///
/// Every addon belongs to exactly one section; the upstream reports it as
/// the name of the addon's category section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Mods,
    Modpacks,
    TexturePacks,
    Worlds,
}
impl Section {
    /// Returns the upstream display string for the section.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Mods => "Mods",
            Section::Modpacks => "Modpacks",
            Section::TexturePacks => "Texture Packs",
            Section::Worlds => "Worlds",
        }
    }
}
impl TryFrom<String> for Section {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl FromStr for Section {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(s);
        Ok(match sanitized.as_str() {
            "mod" | "mods" => Self::Mods,
            "modpack" | "modpacks" => Self::Modpacks,
            "texturepack" | "texturepacks" | "resourcepack" | "resourcepacks" => Self::TexturePacks,
            "world" | "worlds" | "save" | "saves" => Self::Worlds,
            _ => exn::bail!(ErrorKind::Decode(format!("unknown section: {}", s))),
        })
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Mods", Section::Mods)]
    #[case("mods", Section::Mods)]
    #[case("Modpacks", Section::Modpacks)]
    #[case("Texture Packs", Section::TexturePacks)]
    #[case("texture-packs", Section::TexturePacks)]
    #[case("Worlds", Section::Worlds)]
    fn test_parse(#[case] input: &str, #[case] expected: Section) {
        assert_eq!(input.parse::<Section>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("Bukkit Plugins".parse::<Section>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for section in [Section::Mods, Section::Modpacks, Section::TexturePacks, Section::Worlds] {
            assert_eq!(section.to_string().parse::<Section>().unwrap(), section);
        }
    }
}
