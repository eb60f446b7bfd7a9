//! Tiered engine — rule table first, positional fallback on a miss.

use super::{Classification, IntentEngine};

/// Composite engine that consults `fallback` only when `primary` misses.
pub struct TieredEngine {
    primary: Box<dyn IntentEngine>,
    fallback: Box<dyn IntentEngine>,
}

impl TieredEngine {
    pub fn new(primary: Box<dyn IntentEngine>, fallback: Box<dyn IntentEngine>) -> Self {
        Self { primary, fallback }
    }
}

impl IntentEngine for TieredEngine {
    fn classify(&self, text: &str) -> Option<Classification> {
        if let Some(result) = self.primary.classify(text) {
            return Some(result);
        }

        tracing::debug!(
            tier = self.fallback.tier_name(),
            "primary engine missed, trying fallback"
        );
        self.fallback.classify(text)
    }

    fn tier_name(&self) -> &'static str {
        "tiered"
    }
}
