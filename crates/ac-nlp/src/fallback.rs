//! Positional fallback — broad navigation vocabulary mapped to `trajectory`.
//!
//! Consulted only after the rule table misses. Every keyword here is also in
//! the `trajectory` rule, so with the standard rule table this tier cannot
//! currently fire; it stays as a separate stage so the rule table can shrink
//! without losing positional phrasing.

use ac_protocol::Intent;

use super::{Classification, IntentEngine};

/// Keywords that indicate a position / navigation request.
pub const POSITIONAL_KEYWORDS: &[&str] = &[
    "map",
    "where is",
    "position",
    "location",
    "track",
    "path",
    "route",
];

/// Second-pass engine that reclassifies positional phrasing as `trajectory`.
pub struct PositionalFallback;

impl PositionalFallback {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PositionalFallback {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentEngine for PositionalFallback {
    fn classify(&self, text: &str) -> Option<Classification> {
        let lower = text.to_lowercase();
        let keyword = POSITIONAL_KEYWORDS.iter().find(|k| lower.contains(*k))?;
        tracing::debug!(keyword, "positional fallback matched");
        Some(Classification {
            intent: Intent::Trajectory,
            rule: "positional_fallback",
            tier: self.tier_name(),
        })
    }

    fn tier_name(&self) -> &'static str {
        "fallback"
    }
}
