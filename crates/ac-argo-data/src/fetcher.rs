//! Dataset fetcher abstraction.

use std::sync::Arc;

use async_trait::async_trait;

use ac_protocol::{Dataset, FloatId};

use crate::error::FetchResult;

/// Source of float datasets.
///
/// Enables mocking for tests and swappable backends (remote archive,
/// cache wrapper, fixtures).
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    /// Fetch the full measurement history of one float.
    async fn fetch(&self, float_id: FloatId) -> FetchResult<Arc<Dataset>>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
