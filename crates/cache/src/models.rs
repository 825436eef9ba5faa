//! The persisted projection and its database row form.

use crate::error::{Error, ErrorKind};
use cursegate_client::models::{Addon, Section};
use exn::{OptionExt, ResultExt};
use time::UtcDateTime;

/// The sparse projection of an upstream addon that the store persists.
///
/// The identifier uniquely determines at most one stored row at any time;
/// writing an existing identifier replaces the whole prior row.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseAddon {
    pub id: i32,
    pub name: String,
    pub primary_author_name: String,
    pub primary_category_name: String,
    pub section: Section,
    pub date_created: UtcDateTime,
    pub date_modified: UtcDateTime,
    pub date_released: UtcDateTime,
    /// Comma-joined category names, matched by substring in list filters.
    pub category_list: String,
}

impl TryFrom<&Addon> for SparseAddon {
    type Error = Error;
    fn try_from(addon: &Addon) -> Result<Self, Self::Error> {
        Ok(Self {
            id: addon.id,
            name: addon.name.clone(),
            primary_author_name: addon
                .primary_author_name()
                .ok_or_raise(|| ErrorKind::InvalidData("authors"))?
                .to_string(),
            primary_category_name: addon
                .primary_category()
                .ok_or_raise(|| ErrorKind::InvalidData("categories"))?
                .name
                .clone(),
            section: addon
                .category_section
                .name
                .parse::<Section>()
                .or_raise(|| ErrorKind::InvalidData("section"))?,
            date_created: addon.date_created.to_utc(),
            date_modified: addon.date_modified.to_utc(),
            date_released: addon.date_released.to_utc(),
            category_list: addon.categories.iter().map(|category| category.name.as_str()).collect::<Vec<_>>().join(","),
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AddonRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) primary_author_name: String,
    pub(crate) primary_category_name: String,
    pub(crate) section: String,
    pub(crate) date_created: i64,
    pub(crate) date_modified: i64,
    pub(crate) date_released: i64,
    pub(crate) category_list: String,
}
impl From<&SparseAddon> for AddonRow {
    fn from(addon: &SparseAddon) -> Self {
        Self {
            id: i64::from(addon.id),
            name: addon.name.clone(),
            primary_author_name: addon.primary_author_name.clone(),
            primary_category_name: addon.primary_category_name.clone(),
            section: addon.section.to_string(),
            date_created: addon.date_created.unix_timestamp(),
            date_modified: addon.date_modified.unix_timestamp(),
            date_released: addon.date_released.unix_timestamp(),
            category_list: addon.category_list.clone(),
        }
    }
}
impl TryFrom<AddonRow> for SparseAddon {
    type Error = Error;
    fn try_from(row: AddonRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: i32::try_from(row.id).or_raise(|| ErrorKind::InvalidData("addon id"))?,
            name: row.name,
            primary_author_name: row.primary_author_name,
            primary_category_name: row.primary_category_name,
            section: row.section.parse::<Section>().or_raise(|| ErrorKind::InvalidData("section"))?,
            date_created: UtcDateTime::from_unix_timestamp(row.date_created)
                .or_raise(|| ErrorKind::InvalidData("creation date"))?,
            date_modified: UtcDateTime::from_unix_timestamp(row.date_modified)
                .or_raise(|| ErrorKind::InvalidData("modification date"))?,
            date_released: UtcDateTime::from_unix_timestamp(row.date_released)
                .or_raise(|| ErrorKind::InvalidData("release date"))?,
            category_list: row.category_list,
        })
    }
}
