//! Mock data source answering page queries over a fixed record universe.

use super::{FeedResult, Record};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Body text shared by every generated record
pub const MOCK_BODY: &str = "LastMessage.";

/// Build `count` records with ids `item-1..item-count`.
pub fn generate(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|n| Record::new(format!("item-{}", n), format!("User {}", n), MOCK_BODY))
        .collect()
}

/// Anything the pagination controller can fetch pages from.
///
/// Pages are 1-based. An empty page means there is nothing left to load.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page of at most `page_size` records
    async fn fetch_page(&self, page_number: usize, page_size: usize) -> FeedResult<Vec<Record>>;
}

/// In-memory source with a fixed simulated latency
#[derive(Debug, Clone)]
pub struct MockDataSource {
    records: Vec<Record>,
    latency: Duration,
}

impl MockDataSource {
    /// Create a source holding `universe_size` generated records
    pub fn new(universe_size: usize, latency: Duration) -> Self {
        Self {
            records: generate(universe_size),
            latency,
        }
    }

    pub fn universe_size(&self) -> usize {
        self.records.len()
    }

    /// Number of non-empty pages for the given page size
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        (self.records.len() + page_size - 1) / page_size
    }

    /// Slice `[(page-1)*size, page*size)` clipped to the universe.
    ///
    /// Out-of-range pages (including page 0) yield an empty vector.
    pub fn get_page(&self, page_number: usize, page_size: usize) -> Vec<Record> {
        if page_number == 0 || page_size == 0 {
            return Vec::new();
        }
        let start = (page_number - 1).saturating_mul(page_size);
        if start >= self.records.len() {
            return Vec::new();
        }
        let end = start.saturating_add(page_size).min(self.records.len());
        self.records[start..end].to_vec()
    }
}

#[async_trait]
impl PageSource for MockDataSource {
    async fn fetch_page(&self, page_number: usize, page_size: usize) -> FeedResult<Vec<Record>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let page = self.get_page(page_number, page_size);
        debug!("Mock source served page {} ({} records)", page_number, page.len());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_generate_is_deterministic() {
        let records = generate(3);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], Record::new("item-1", "User 1", MOCK_BODY));
        assert_eq!(records[2].id, "item-3");
        assert_eq!(generate(3), records);
        assert!(generate(0).is_empty());
    }

    #[test]
    fn test_get_page_slices() {
        let source = MockDataSource::new(25, Duration::ZERO);

        let first = source.get_page(1, 10);
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id, "item-1");
        assert_eq!(first[9].id, "item-10");

        let last = source.get_page(3, 10);
        assert_eq!(last.len(), 5);
        assert_eq!(last[0].id, "item-21");
        assert_eq!(last[4].id, "item-25");
    }

    #[test]
    fn test_get_page_out_of_range_is_empty() {
        let source = MockDataSource::new(100, Duration::ZERO);
        assert_eq!(source.total_pages(10), 10);
        assert!(source.get_page(11, 10).is_empty());
        assert!(source.get_page(usize::MAX, 10).is_empty());
        assert!(source.get_page(0, 10).is_empty());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let source = MockDataSource::new(101, Duration::ZERO);
        assert_eq!(source.total_pages(10), 11);
        assert_eq!(MockDataSource::new(0, Duration::ZERO).total_pages(10), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_page_waits_for_latency() {
        let source = MockDataSource::new(100, Duration::from_millis(800));
        let started = Instant::now();

        let page = source.fetch_page(2, 10).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(800));
        assert_eq!(page.first().map(|r| r.id.as_str()), Some("item-11"));
    }
}
