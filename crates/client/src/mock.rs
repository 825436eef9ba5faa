//! In-memory provider for testing.

use crate::models::{Addon, AddonFile, AddonFileKey, Author, Category, CategorySection, SearchCriteria};
use crate::provider::AddonProvider;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use time::OffsetDateTime;

/// Scripted [`AddonProvider`] for tests.
///
/// Point lookups answer from in-memory maps; search responses are consumed
/// from a queue, one entry per call, with `None` standing in for a failed
/// round trip. Once the queue is exhausted further searches return empty
/// pages. Search offsets are recorded so pagination behaviour can be
/// asserted.
#[derive(Default)]
pub struct MockProvider {
    addons: HashMap<i32, Addon>,
    descriptions: HashMap<i32, String>,
    files: HashMap<i32, Vec<AddonFile>>,
    changelogs: HashMap<(i32, i32), String>,
    search_pages: Mutex<VecDeque<Option<Vec<Addon>>>>,
    seen_offsets: Mutex<Vec<u32>>,
}

impl MockProvider {
    pub fn with_addons(mut self, addons: impl IntoIterator<Item = Addon>) -> Self {
        self.addons.extend(addons.into_iter().map(|addon| (addon.id, addon)));
        self
    }

    pub fn with_description(mut self, project_id: i32, description: impl Into<String>) -> Self {
        self.descriptions.insert(project_id, description.into());
        self
    }

    pub fn with_files(mut self, project_id: i32, files: impl IntoIterator<Item = AddonFile>) -> Self {
        self.files.insert(project_id, files.into_iter().collect());
        self
    }

    pub fn with_changelog(mut self, project_id: i32, file_id: i32, changelog: impl Into<String>) -> Self {
        self.changelogs.insert((project_id, file_id), changelog.into());
        self
    }

    /// Queue up search responses, one per expected call. `None` simulates
    /// a failed round trip.
    pub fn with_search_pages(self, pages: impl IntoIterator<Item = Option<Vec<Addon>>>) -> Self {
        self.search_pages.lock().unwrap().extend(pages);
        self
    }

    /// Number of search calls made so far.
    pub fn search_calls(&self) -> usize {
        self.seen_offsets.lock().unwrap().len()
    }

    /// The `index` of each search call, in call order.
    pub fn search_offsets(&self) -> Vec<u32> {
        self.seen_offsets.lock().unwrap().clone()
    }
}

#[async_trait]
impl AddonProvider for MockProvider {
    async fn addon(&self, project_id: i32) -> Option<Addon> {
        self.addons.get(&project_id).cloned()
    }

    async fn addons(&self, project_ids: &[i32]) -> Option<Vec<Addon>> {
        Some(project_ids.iter().filter_map(|id| self.addons.get(id).cloned()).collect())
    }

    async fn description(&self, project_id: i32) -> Option<String> {
        self.descriptions.get(&project_id).cloned()
    }

    async fn file(&self, project_id: i32, file_id: i32) -> Option<AddonFile> {
        self.files.get(&project_id)?.iter().find(|file| file.id == file_id).cloned()
    }

    async fn files(&self, project_id: i32) -> Option<Vec<AddonFile>> {
        self.files.get(&project_id).cloned()
    }

    async fn files_by_keys(&self, keys: &[AddonFileKey]) -> Option<HashMap<i32, Vec<AddonFile>>> {
        let mut grouped: HashMap<i32, Vec<AddonFile>> = HashMap::new();
        for key in keys {
            let Some(files) = self.files.get(&key.addon_id) else { continue };
            let matches = files.iter().filter(|file| file.id == key.file_id).cloned();
            grouped.entry(key.addon_id).or_default().extend(matches);
        }
        Some(grouped)
    }

    async fn changelog(&self, project_id: i32, file_id: i32) -> Option<String> {
        self.changelogs.get(&(project_id, file_id)).cloned()
    }

    async fn search(&self, criteria: &SearchCriteria) -> Option<Vec<Addon>> {
        self.seen_offsets.lock().unwrap().push(criteria.index);
        self.search_pages.lock().unwrap().pop_front().unwrap_or_else(|| Some(Vec::new()))
    }
}

/// Build a minimal addon record for tests.
pub fn sample_addon(id: i32) -> Addon {
    Addon {
        id,
        name: format!("Addon {}", id),
        authors: vec![Author { name: "tester".to_string(), url: None }],
        summary: None,
        website_url: None,
        game_id: 432,
        download_count: 0.0,
        categories: vec![Category { category_id: 1, name: "Testing".to_string(), url: None }],
        primary_category_id: Some(1),
        category_section: CategorySection { id: 8, game_id: 432, name: "Mods".to_string() },
        date_created: OffsetDateTime::UNIX_EPOCH,
        date_modified: OffsetDateTime::UNIX_EPOCH,
        date_released: OffsetDateTime::UNIX_EPOCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_point_lookups() {
        let provider = MockProvider::default()
            .with_addons([sample_addon(1), sample_addon(2)])
            .with_description(1, "<p>hello</p>");
        assert_eq!(provider.addon(1).await.unwrap().id, 1);
        assert!(provider.addon(3).await.is_none());
        assert_eq!(provider.description(1).await.unwrap(), "<p>hello</p>");
        let batch = provider.addons(&[1, 2, 3]).await.unwrap();
        assert_eq!(batch.len(), 2);
    }

    #[tokio::test]
    async fn test_search_queue_drains_to_empty_pages() {
        let provider = MockProvider::default().with_search_pages([Some(vec![sample_addon(1)])]);
        let criteria = SearchCriteria::new(432);
        assert_eq!(provider.search(&criteria).await.unwrap().len(), 1);
        assert_eq!(provider.search(&criteria).await.unwrap().len(), 0);
        assert_eq!(provider.search_calls(), 2);
    }
}
