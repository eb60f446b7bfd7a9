//! Dataset retrieval error types.

use thiserror::Error;

use ac_protocol::FloatId;

/// Errors that can occur while fetching a float's dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("float {0} not found in the archive")]
    NotFound(FloatId),

    #[error("archive request failed: {0}")]
    Http(String),

    #[error("archive returned HTTP {status} for float {float_id}")]
    Status { float_id: FloatId, status: u16 },

    #[error("invalid archive response: {0}")]
    Decode(String),
}

/// Convenience alias for fetch results.
pub type FetchResult<T> = Result<T, FetchError>;
