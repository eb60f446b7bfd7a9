//! Argo dataset retrieval for ArgoChat.
//!
//! A `DatasetFetcher` abstraction with three implementations: the ERDDAP
//! HTTP client, a memoizing `CachedFetcher` wrapper, and `MockFetcher` with
//! synthetic floats for tests and offline use.

pub mod cache;
pub mod erddap;
pub mod error;
pub mod fetcher;
pub mod mock;

pub use cache::CachedFetcher;
pub use erddap::{ErddapConfig, ErddapFetcher};
pub use error::{FetchError, FetchResult};
pub use fetcher::DatasetFetcher;
pub use mock::MockFetcher;
