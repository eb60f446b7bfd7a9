//! Per-turn error types. None of these escape a turn; the router turns
//! each into the reply for that turn.

use thiserror::Error;

use ac_argo_data::FetchError;
use ac_protocol::{FloatId, Intent};

#[derive(Debug, Error)]
pub enum TurnError {
    /// A float number was required but the input was not an integer.
    #[error("not a float number: {0:?}")]
    Parse(String),

    #[error("failed to load float {float_id}: {source}")]
    Fetch {
        float_id: FloatId,
        #[source]
        source: FetchError,
    },

    /// The intent needs one float but none was named and zero or several
    /// are loaded.
    #[error("no target float for {0}")]
    AmbiguousTarget(Intent),
}

/// Convenience alias for turn-level results.
pub type TurnResult<T> = Result<T, TurnError>;
