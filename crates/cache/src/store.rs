//! Point lookup, filtered listing, and full-row replace over the addons table.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{AddonRow, SparseAddon};
use cursegate_client::models::Section;
use exn::ResultExt;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

const COLUMNS: &str = "id, name, primary_author_name, primary_category_name, \
                       section, date_created, date_modified, date_released, category_list";

/// Optional constraints for [`AddonStore::list`]. All supplied filters are
/// ANDed together; a missing filter places no constraint on that field.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Cap on the number of rows returned.
    pub limit: Option<u32>,
    /// SQL LIKE pattern applied to the addon name, case-sensitive and
    /// passed through verbatim (include `%` wildcards as needed).
    pub name: Option<String>,
    /// SQL LIKE pattern applied to the primary author name.
    pub author: Option<String>,
    /// Matches when the primary category LIKEs the pattern, or when the
    /// category list contains the filter text as a substring.
    pub category: Option<String>,
    /// Exact section match.
    pub section: Option<Section>,
}
impl ListFilter {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    pub fn with_author(mut self, pattern: impl Into<String>) -> Self {
        self.author = Some(pattern.into());
        self
    }

    pub fn with_category(mut self, pattern: impl Into<String>) -> Self {
        self.category = Some(pattern.into());
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }
}

/// Store for the sparse addon projection.
///
/// One logical table keyed by addon identifier. "Create" is really an
/// upsert: a write for an existing identifier replaces the entire prior
/// row. There is no TTL, no invalidation, and no soft delete; concurrent
/// writers to the same identifier race last-writer-wins at the transaction
/// boundary.
#[derive(Debug, Clone)]
pub struct AddonStore {
    pool: SqlitePool,
}
impl From<&Database> for AddonStore {
    fn from(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }
}
impl AddonStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the row for `id`, or `None` if no such addon is stored.
    pub async fn get(&self, id: i32) -> Result<Option<SparseAddon>> {
        let row: Option<AddonRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM addons WHERE id = ?"))
                .bind(i64::from(id))
                .fetch_optional(&self.pool)
                .await
                .or_raise(|| ErrorKind::Database)?;
        row.map(SparseAddon::try_from).transpose()
    }

    /// List rows matching all supplied filters.
    ///
    /// No ordering is guaranteed beyond being stable for one store
    /// instance.
    pub async fn list(&self, filter: &ListFilter) -> Result<Vec<SparseAddon>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM addons WHERE 1 = 1"));
        if let Some(name) = &filter.name {
            debug!(pattern = %name, "adding name filter");
            query.push(" AND name LIKE ").push_bind(name.clone());
        }
        if let Some(author) = &filter.author {
            debug!(pattern = %author, "adding author filter");
            query.push(" AND primary_author_name LIKE ").push_bind(author.clone());
        }
        if let Some(category) = &filter.category {
            debug!(pattern = %category, "adding category filter");
            query
                .push(" AND (primary_category_name LIKE ")
                .push_bind(category.clone())
                .push(" OR category_list LIKE ")
                .push_bind(format!("%{category}%"))
                .push(")");
        }
        if let Some(section) = &filter.section {
            debug!(%section, "adding section filter");
            query.push(" AND section = ").push_bind(section.to_string());
        }
        if let Some(limit) = filter.limit {
            debug!(limit, "adding row limit");
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }
        let rows: Vec<AddonRow> =
            query.build_query_as().fetch_all(&self.pool).await.or_raise(|| ErrorKind::Database)?;
        rows.into_iter().map(SparseAddon::try_from).collect()
    }

    /// Replace the row for `addon.id` with `addon`, inserting if absent.
    ///
    /// Delete and insert run inside one transaction, so a concurrent reader
    /// never observes the identifier missing mid-replace.
    pub async fn upsert(&self, addon: &SparseAddon) -> Result<()> {
        let row = AddonRow::from(addon);
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        sqlx::query("DELETE FROM addons WHERE id = ?")
            .bind(row.id)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        sqlx::query(&format!("INSERT INTO addons ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"))
            .bind(row.id)
            .bind(row.name)
            .bind(row.primary_author_name)
            .bind(row.primary_category_name)
            .bind(row.section)
            .bind(row.date_created)
            .bind(row.date_modified)
            .bind(row.date_released)
            .bind(row.category_list)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        Ok(())
    }

    /// Close the underlying pool. Idempotent, safe to call repeatedly.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::UtcDateTime;

    fn addon(id: i32, name: &str, author: &str, category: &str, section: Section, list: &str) -> SparseAddon {
        SparseAddon {
            id,
            name: name.to_string(),
            primary_author_name: author.to_string(),
            primary_category_name: category.to_string(),
            section,
            date_created: UtcDateTime::from_unix_timestamp(1363547491).unwrap(),
            date_modified: UtcDateTime::from_unix_timestamp(1560191286).unwrap(),
            date_released: UtcDateTime::from_unix_timestamp(1558704663).unwrap(),
            category_list: list.to_string(),
        }
    }

    async fn store() -> AddonStore {
        let db = Database::connect_in_memory().await.unwrap();
        AddonStore::from(&db)
    }

    async fn seeded() -> AddonStore {
        let store = store().await;
        for entry in [
            addon(1, "MouseTweaks", "YaLTeR", "Server Utility", Section::Mods, "Map and Information,Server Utility"),
            addon(2, "Quark", "Vazkii", "Storage", Section::Mods, "Storage,Decoration"),
            addon(3, "Faithful", "exeodus", "Traditional", Section::TexturePacks, "Traditional"),
            addon(4, "SkyFactory", "darkosto", "Sky Block", Section::Modpacks, "Sky Block,Tech"),
        ] {
            store.upsert(&entry).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_get_on_empty_store_is_absent() {
        let store = store().await;
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get_round_trips() {
        let store = store().await;
        let foo = addon(42, "Foo", "bar", "Storage", Section::Mods, "Storage");
        store.upsert(&foo).await.unwrap();
        assert_eq!(store.get(42).await.unwrap().unwrap(), foo);
    }

    #[tokio::test]
    async fn test_upsert_replaces_whole_row() {
        let store = store().await;
        store.upsert(&addon(42, "Foo", "bar", "Storage", Section::Mods, "Storage")).await.unwrap();
        let replacement = addon(42, "Foo Remastered", "baz", "Tech", Section::Modpacks, "Tech");
        store.upsert(&replacement).await.unwrap();
        // Exactly one row for the identifier, carrying the second write.
        let all = store.list(&ListFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], replacement);
    }

    #[tokio::test]
    async fn test_list_without_filters_returns_all() {
        let store = seeded().await;
        assert_eq!(store.list(&ListFilter::default()).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_list_limit_caps_rows() {
        let store = seeded().await;
        assert_eq!(store.list(&ListFilter::default().with_limit(2)).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_by_section() {
        let store = seeded().await;
        let mods = store.list(&ListFilter::default().with_section(Section::Mods)).await.unwrap();
        assert_eq!(mods.len(), 2);
        assert!(mods.iter().all(|a| a.section == Section::Mods));
    }

    #[tokio::test]
    async fn test_list_by_name_pattern_is_case_sensitive() {
        let store = seeded().await;
        let hits = store.list(&ListFilter::default().with_name("Mouse%")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
        let misses = store.list(&ListFilter::default().with_name("mouse%")).await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_list_by_author() {
        let store = seeded().await;
        let hits = store.list(&ListFilter::default().with_author("Vazkii")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Quark");
    }

    #[tokio::test]
    async fn test_category_matches_primary_or_list() {
        let store = seeded().await;
        // Primary category match on addon 2...
        let primary = store.list(&ListFilter::default().with_category("Storage")).await.unwrap();
        assert_eq!(primary.len(), 1);
        assert_eq!(primary[0].id, 2);
        // ...and a category-list substring match on addon 4, whose primary
        // category is "Sky Block".
        let listed = store.list(&ListFilter::default().with_category("Tech")).await.unwrap();
        assert_eq!(listed.iter().map(|a| a.id).collect::<Vec<_>>(), vec![4]);
        let none = store.list(&ListFilter::default().with_category("Magic")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_filters_are_anded() {
        let store = seeded().await;
        let filter = ListFilter::default().with_section(Section::Mods).with_category("Storage");
        let hits = store.list(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
        let filter = ListFilter::default().with_section(Section::Worlds).with_category("Storage");
        assert!(store.list(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let store = store().await;
        store.close().await;
        store.close().await;
    }
}
