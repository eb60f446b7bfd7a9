//! Memoizing fetcher — one remote fetch per float id per process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use ac_protocol::{Dataset, FloatId};

use crate::error::FetchResult;
use crate::fetcher::DatasetFetcher;

/// Wraps another fetcher and caches successful results by float id.
///
/// Failures are not cached, so a later request retries the backend.
pub struct CachedFetcher {
    inner: Arc<dyn DatasetFetcher>,
    cache: Mutex<HashMap<FloatId, Arc<Dataset>>>,
}

impl CachedFetcher {
    pub fn new(inner: Arc<dyn DatasetFetcher>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Cached dataset for `float_id`, if any.
    pub fn lookup(&self, float_id: FloatId) -> Option<Arc<Dataset>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&float_id)
            .cloned()
    }

    pub fn cached_count(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn store(&self, float_id: FloatId, dataset: Arc<Dataset>) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(float_id, dataset);
    }
}

#[async_trait]
impl DatasetFetcher for CachedFetcher {
    async fn fetch(&self, float_id: FloatId) -> FetchResult<Arc<Dataset>> {
        if let Some(dataset) = self.lookup(float_id) {
            tracing::debug!(float_id = %float_id, "dataset cache hit");
            return Ok(dataset);
        }

        let dataset = self.inner.fetch(float_id).await?;
        self.store(float_id, dataset.clone());
        Ok(dataset)
    }

    fn name(&self) -> &str {
        "cached"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::mock::MockFetcher;

    fn cached_mock() -> (Arc<MockFetcher>, CachedFetcher) {
        let mock = Arc::new(MockFetcher::with_sample_floats());
        let cached = CachedFetcher::new(mock.clone());
        (mock, cached)
    }

    #[tokio::test]
    async fn repeated_fetch_hits_backend_once() {
        let (mock, cached) = cached_mock();
        let a = cached.fetch(FloatId(2903893)).await.unwrap();
        let b = cached.fetch(FloatId(2903893)).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(mock.calls(), vec![FloatId(2903893)]);
        assert_eq!(cached.cached_count(), 1);
    }

    #[tokio::test]
    async fn distinct_ids_fetched_separately() {
        let (mock, cached) = cached_mock();
        cached.fetch(FloatId(2903893)).await.unwrap();
        cached.fetch(FloatId(2903892)).await.unwrap();
        assert_eq!(mock.call_count(), 2);
        assert!(cached.lookup(FloatId(2903892)).is_some());
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let (mock, cached) = cached_mock();
        let err = cached.fetch(FloatId(1111111)).await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
        assert!(cached.fetch(FloatId(1111111)).await.is_err());
        assert_eq!(mock.call_count(), 2);
        assert_eq!(cached.cached_count(), 0);
    }
}
