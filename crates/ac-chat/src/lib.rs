//! ArgoChat — conversational access to Argo float data.
//!
//! Re-exports all modules so the binary and `ac-e2e-tests` can drive a
//! conversation through `DialogueRouter` and `Shell`.

pub mod config;
pub mod error;
pub mod output;
pub mod replies;
pub mod router;
pub mod session;
pub mod shell;
pub mod sidebar;

pub use error::{TurnError, TurnResult};
pub use router::{Action, DialogueRouter, NamedChart, TurnOutcome};
pub use session::{DialogueState, Session};
pub use shell::Shell;
