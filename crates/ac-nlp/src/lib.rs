//! Natural-language interpretation of chat utterances.
//!
//! Turns free text ("temperature 2903893", "where is my float?") into an
//! [`Interpretation`]: one [`Intent`] plus the float ids mentioned in the text.
//!
//! Two tiers:
//! - **Rule-based**: an ordered, first-match-wins rule table.
//! - **Positional fallback**: a broader keyword pass consulted only when the
//!   rule table has nothing to say.

pub mod extract;
pub mod fallback;
pub mod rules;
pub mod tiered;

use serde::Serialize;

use ac_protocol::{FloatId, Intent};

pub use extract::extract_float_ids;
pub use fallback::PositionalFallback;
pub use rules::RuleBasedEngine;
pub use tiered::TieredEngine;

/// A successful classification and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub intent: Intent,
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// Tier that produced the result.
    pub tier: &'static str,
}

/// Trait for engines that map an utterance to an intent.
pub trait IntentEngine: Send + Sync {
    /// Classify text. Returns None if the engine has no opinion.
    fn classify(&self, text: &str) -> Option<Classification>;

    /// Name of this tier (for debug output and logs).
    fn tier_name(&self) -> &'static str;
}

/// Everything the dialogue layer needs to know about one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub intent: Intent,
    pub float_ids: Vec<FloatId>,
    /// Rule/tier that decided the intent; None when nothing matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<Classification>,
}

/// Run extraction and classification over `text`.
///
/// Both passes see the raw utterance independently. A miss from the engine
/// resolves to [`Intent::Unknown`].
pub fn interpret(engine: &dyn IntentEngine, text: &str) -> Interpretation {
    let matched = engine.classify(text);
    let intent = matched.map_or(Intent::Unknown, |c| c.intent);
    let float_ids = extract_float_ids(text);
    tracing::debug!(
        intent = %intent,
        rule = matched.map(|c| c.rule),
        ids = float_ids.len(),
        "utterance interpreted"
    );
    Interpretation {
        intent,
        float_ids,
        matched,
    }
}

/// The standard two-tier engine: rule table, then positional fallback.
pub fn default_engine() -> TieredEngine {
    TieredEngine::new(
        Box::new(RuleBasedEngine::new()),
        Box::new(PositionalFallback::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_with_two_ids() {
        let engine = default_engine();
        let i = interpret(&engine, "compare 2903893 vs 2903892");
        assert_eq!(i.intent, Intent::CompareFloats);
        assert_eq!(i.float_ids, vec![FloatId(2903893), FloatId(2903892)]);
    }

    #[test]
    fn temperature_with_id() {
        let engine = default_engine();
        let i = interpret(&engine, "temperature 2903893");
        assert_eq!(i.intent, Intent::Temperature);
        assert_eq!(i.float_ids, vec![FloatId(2903893)]);
    }

    #[test]
    fn where_is_resolves_in_rule_table() {
        // "where is" is part of the trajectory rule itself, so the fallback
        // tier never sees this utterance.
        let engine = default_engine();
        let i = interpret(&engine, "where is 2903893");
        assert_eq!(i.intent, Intent::Trajectory);
        let matched = i.matched.unwrap();
        assert_eq!(matched.rule, "trajectory");
        assert_eq!(matched.tier, "rules");
    }

    #[test]
    fn miss_is_unknown() {
        let engine = default_engine();
        let i = interpret(&engine, "the quick brown fox");
        assert_eq!(i.intent, Intent::Unknown);
        assert!(i.matched.is_none());
        assert!(i.float_ids.is_empty());
    }

    #[test]
    fn interpretation_is_deterministic() {
        let engine = default_engine();
        for text in ["info float 2903893", "why argo", "hey", "xyz"] {
            assert_eq!(interpret(&engine, text), interpret(&engine, text));
        }
    }

    #[test]
    fn serializes_for_debug_output() {
        let engine = default_engine();
        let json = serde_json::to_value(interpret(&engine, "salinity 2903893")).unwrap();
        assert_eq!(json["intent"], "salinity");
        assert_eq!(json["float_ids"][0], 2903893);
        assert_eq!(json["matched"]["rule"], "salinity");
    }
}
