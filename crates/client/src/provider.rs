//! Provider trait for the upstream addon API.
//!
//! Every operation performs exactly one network round trip and applies no
//! retry. Failure of any kind (transport, non-success status, decode) is
//! logged by the implementation and surfaces to the caller as `None`; a
//! missing record and a failed call are deliberately indistinguishable.
//! Callers must treat absence as "empty/skip", never as an error to report.

use crate::models::{Addon, AddonFile, AddonFileKey, SearchCriteria};
use async_trait::async_trait;
use std::collections::HashMap;

/// Read access to the upstream addon listing service.
///
/// Implemented by [`CurseClient`](crate::CurseClient) for the real API and
/// by [`MockProvider`](crate::MockProvider) in tests.
#[async_trait]
pub trait AddonProvider: Send + Sync {
    /// Fetch a single addon by project id.
    async fn addon(&self, project_id: i32) -> Option<Addon>;

    /// Fetch a batch of addons by project id.
    ///
    /// The upstream does not guarantee result order matches the input.
    async fn addons(&self, project_ids: &[i32]) -> Option<Vec<Addon>>;

    /// Fetch an addon's long description (HTML blob).
    async fn description(&self, project_id: i32) -> Option<String>;

    /// Fetch a single file record for an addon.
    async fn file(&self, project_id: i32, file_id: i32) -> Option<AddonFile>;

    /// Fetch all file records for an addon.
    async fn files(&self, project_id: i32) -> Option<Vec<AddonFile>>;

    /// Fetch file records for a batch of (addon, file) keys, grouped by
    /// addon id.
    async fn files_by_keys(&self, keys: &[AddonFileKey]) -> Option<HashMap<i32, Vec<AddonFile>>>;

    /// Fetch the changelog of one file (HTML blob).
    async fn changelog(&self, project_id: i32, file_id: i32) -> Option<String>;

    /// Fetch one page of addons matching the criteria.
    ///
    /// The returned page is at most `criteria.page_size` records long.
    async fn search(&self, criteria: &SearchCriteria) -> Option<Vec<Addon>>;

    /// Fetch *all* addons matching the criteria by walking the paged
    /// search, starting from the criteria's `index`.
    ///
    /// An absent page is treated as empty, which also terminates the walk.
    /// Pages are appended as returned, without deduplication. The offset
    /// advances by `page_size - 1` per full page, so consecutive pages
    /// overlap by one record; the duplicates are preserved in the result.
    /// The walk only stops on a short page: an upstream that always fills
    /// every page will be polled forever. Requires `page_size >= 1`.
    async fn search_all(&self, criteria: &SearchCriteria) -> Vec<Addon> {
        let mut criteria = criteria.clone();
        let page_size = criteria.page_size as usize;
        let mut results = Vec::new();
        loop {
            let page = self.search(&criteria).await.unwrap_or_default();
            let page_len = page.len();
            results.extend(page);
            if page_len < page_size {
                break;
            }
            criteria.index += criteria.page_size - 1;
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockProvider, sample_addon};

    fn page_of(size: usize) -> Vec<Addon> {
        (0..size).map(|n| sample_addon(n as i32)).collect()
    }

    #[tokio::test]
    async fn test_search_all_single_short_page() {
        let provider = MockProvider::default().with_search_pages([Some(page_of(3))]);
        let criteria = SearchCriteria::new(432).with_page_size(10);
        let all = provider.search_all(&criteria).await;
        assert_eq!(all.len(), 3);
        assert_eq!(provider.search_calls(), 1);
        assert_eq!(provider.search_offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_search_all_walks_with_overlapping_stride() {
        // Pages of [1000, 1000, 437] at page size 1000: the offset advances
        // by 999 per full page and every record returned is accumulated.
        let provider =
            MockProvider::default().with_search_pages([Some(page_of(1000)), Some(page_of(1000)), Some(page_of(437))]);
        let criteria = SearchCriteria::new(432);
        let all = provider.search_all(&criteria).await;
        assert_eq!(all.len(), 2437);
        assert_eq!(provider.search_calls(), 3);
        assert_eq!(provider.search_offsets(), vec![0, 999, 1998]);
    }

    #[tokio::test]
    async fn test_search_all_absent_page_terminates_quietly() {
        // A transport failure mid-walk is an empty page, which is short, so
        // the walk ends with whatever was accumulated. No error escapes.
        let provider = MockProvider::default().with_search_pages([Some(page_of(5)), None]);
        let criteria = SearchCriteria::new(432).with_page_size(5);
        let all = provider.search_all(&criteria).await;
        assert_eq!(all.len(), 5);
        assert_eq!(provider.search_calls(), 2);
    }

    #[tokio::test]
    async fn test_search_all_starts_from_criteria_index() {
        let provider = MockProvider::default().with_search_pages([Some(page_of(2))]);
        let criteria = SearchCriteria::new(432).with_page_size(5).with_index(40);
        provider.search_all(&criteria).await;
        assert_eq!(provider.search_offsets(), vec![40]);
    }

    #[tokio::test]
    async fn test_search_all_preserves_page_order() {
        let first = vec![sample_addon(1), sample_addon(2)];
        let second = vec![sample_addon(3)];
        let provider = MockProvider::default().with_search_pages([Some(first), Some(second)]);
        let criteria = SearchCriteria::new(432).with_page_size(2);
        let all = provider.search_all(&criteria).await;
        assert_eq!(all.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
