//! Cached rate table with TTL and a single-flight fetch guard.
//!
//! The table lives behind a tokio `Mutex` held across the fetch, so
//! concurrent cache misses queue behind one request instead of racing the
//! pricing service. Freshness is re-checked after the lock is acquired:
//! a waiter whose predecessor just refreshed the table reuses it.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::error::FxError;
use super::rates::{RateSource, RateTable};

pub struct RateCache {
    source: Arc<dyn RateSource>,
    ttl: Duration,
    table: Mutex<Option<RateTable>>,
}

impl RateCache {
    pub fn new(source: Arc<dyn RateSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            table: Mutex::new(None),
        }
    }

    /// Look up the multiplier for `code`, fetching the table if the cache
    /// is empty or stale.
    pub async fn rate(&self, code: &str) -> Result<f64, FxError> {
        let mut slot = self.table.lock().await;

        if let Some(table) = slot.as_ref() {
            if table.fetched_at.elapsed() < self.ttl {
                return table.rate(code);
            }
        }

        let table = slot.insert(self.source.fetch().await?);
        table.rate(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::rates::test_support::StaticRates;

    #[tokio::test]
    async fn fetches_once_within_ttl() {
        let source = Arc::new(StaticRates::new(&[("USD", 0.013)]));
        let cache = RateCache::new(source.clone(), Duration::from_secs(60));

        assert_eq!(cache.rate("USD").await.unwrap(), 0.013);
        assert_eq!(cache.rate("USD").await.unwrap(), 0.013);
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn refetches_after_ttl_expiry() {
        let source = Arc::new(StaticRates::new(&[("USD", 0.013)]));
        let cache = RateCache::new(source.clone(), Duration::from_millis(10));

        cache.rate("USD").await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        cache.rate("USD").await.unwrap();
        assert_eq!(source.fetch_count(), 2);
    }

    #[tokio::test]
    async fn concurrent_misses_fetch_once() {
        let source = Arc::new(StaticRates::new(&[("USD", 0.013)]));
        let cache = Arc::new(RateCache::new(source.clone(), Duration::from_secs(60)));

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let cache = cache.clone();
            tasks.push(tokio::spawn(async move { cache.rate("USD").await }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), 0.013);
        }
        assert_eq!(source.fetch_count(), 1);
    }

    #[tokio::test]
    async fn unknown_code_after_successful_fetch() {
        let source = Arc::new(StaticRates::new(&[("USD", 0.013)]));
        let cache = RateCache::new(source, Duration::from_secs(60));

        assert!(matches!(
            cache.rate("ZZZ").await,
            Err(FxError::UnknownCurrency(code)) if code == "ZZZ"
        ));
    }
}
