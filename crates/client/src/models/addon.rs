use serde::Deserialize;
use time::OffsetDateTime;

/// An addon record as returned by the upstream API.
///
/// This is a projection of the wire object down to the fields the proxy
/// actually consumes; unknown fields are ignored during deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addon {
    pub id: i32,
    pub name: String,
    pub authors: Vec<Author>,
    pub summary: Option<String>,
    pub website_url: Option<String>,
    pub game_id: i32,
    /// Upstream reports this as a float.
    #[serde(default)]
    pub download_count: f64,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub primary_category_id: Option<i32>,
    pub category_section: CategorySection,
    #[serde(with = "time::serde::rfc3339")]
    pub date_created: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub date_modified: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub date_released: OffsetDateTime,
}
impl Addon {
    /// Name of the first listed author, if any.
    pub fn primary_author_name(&self) -> Option<&str> {
        self.authors.first().map(|author| author.name.as_str())
    }

    /// The addon's primary category: the category matching
    /// `primary_category_id`, falling back to the first listed category.
    pub fn primary_category(&self) -> Option<&Category> {
        self.primary_category_id
            .and_then(|id| self.categories.iter().find(|category| category.category_id == id))
            .or_else(|| self.categories.first())
    }
}

/// An addon author as listed by the upstream.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub url: Option<String>,
}

/// A category an addon is filed under.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    pub url: Option<String>,
}

/// The section grouping the upstream reports for an addon.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
    pub id: i32,
    pub game_id: i32,
    pub name: String,
}
