//! Rule-based intent engine — ordered keyword rules, first match wins.
//!
//! Categories overlap ("info about float" vs "info about salinity"), so the
//! order of [`rules()`] is the precedence. Multi-word phrases use plain
//! substring containment; short words (`temp`, `sal`, `pres`, `hi`, `hey`,
//! `bye`) only match on word boundaries.

use std::sync::LazyLock;

use regex::Regex;

use ac_protocol::Intent;

use super::{Classification, IntentEngine};

/// A single keyword test against lower-cased text.
#[derive(Debug)]
pub enum Pattern {
    /// Substring containment.
    Phrase(&'static str),
    /// Whole-word match.
    Word(&'static str, Regex),
}

impl Pattern {
    fn word(word: &'static str) -> Self {
        let re = Regex::new(&format!(r"\b{}\b", regex::escape(word))).unwrap();
        Self::Word(word, re)
    }

    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Phrase(p) => text.contains(p),
            Self::Word(_, re) => re.is_match(text),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Phrase(p) | Self::Word(p, _) => p,
        }
    }
}

/// A named rule: fires when every group has at least one matching pattern.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub intent: Intent,
    groups: Vec<Vec<Pattern>>,
}

impl Rule {
    fn new(name: &'static str, intent: Intent, groups: Vec<Vec<Pattern>>) -> Self {
        Self {
            name,
            intent,
            groups,
        }
    }

    /// Test against already lower-cased text.
    pub fn matches(&self, text: &str) -> bool {
        self.groups
            .iter()
            .all(|group| group.iter().any(|p| p.matches(text)))
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(build_rules);

/// The rule table in precedence order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// First rule matching `text` (case-insensitive).
pub fn first_match(text: &str) -> Option<&'static Rule> {
    let lower = text.to_lowercase();
    rules().iter().find(|rule| rule.matches(&lower))
}

/// Classify with the rule table alone; a miss is [`Intent::Unknown`].
pub fn classify(text: &str) -> Intent {
    first_match(text).map_or(Intent::Unknown, |rule| rule.intent)
}

/// Pattern-matching engine over the static rule table.
pub struct RuleBasedEngine;

impl RuleBasedEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuleBasedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentEngine for RuleBasedEngine {
    fn classify(&self, text: &str) -> Option<Classification> {
        let rule = first_match(text)?;
        tracing::debug!(rule = rule.name, intent = %rule.intent, "rule matched");
        Some(Classification {
            intent: rule.intent,
            rule: rule.name,
            tier: self.tier_name(),
        })
    }

    fn tier_name(&self) -> &'static str {
        "rules"
    }
}

fn phrases(list: &[&'static str]) -> Vec<Pattern> {
    list.iter().map(|p| Pattern::Phrase(p)).collect()
}

// ── Topic vocabularies ──────────────────────────────────────────

fn temperature_topic() -> Vec<Pattern> {
    vec![Pattern::Phrase("temperature"), Pattern::word("temp")]
}

fn salinity_topic() -> Vec<Pattern> {
    vec![
        Pattern::Phrase("salinity"),
        Pattern::word("sal"),
        Pattern::Phrase("psal"),
    ]
}

fn pressure_topic() -> Vec<Pattern> {
    vec![Pattern::Phrase("pressure"), Pattern::word("pres")]
}

fn knowledge_request() -> Vec<Pattern> {
    phrases(&["info", "what is", "tell me about", "why"])
}

fn build_rules() -> Vec<Rule> {
    vec![
        // ── Capabilities / listing ──────────────────────────────
        Rule::new(
            "help",
            Intent::Help,
            vec![phrases(&[
                "help",
                "what can you do",
                "how to use",
                "commands",
                "options",
            ])],
        ),
        Rule::new(
            "list_floats",
            Intent::ListFloats,
            vec![phrases(&[
                "which floats",
                "loaded floats",
                "list floats",
                "show floats",
                "what floats",
            ])],
        ),
        // Must precede the generic "info" knowledge rules.
        Rule::new(
            "float_info",
            Intent::FloatInfo,
            vec![
                phrases(&["float"]),
                phrases(&["info", "details", "about", "summary", "status"]),
            ],
        ),
        Rule::new(
            "compare_floats",
            Intent::CompareFloats,
            vec![phrases(&["compare", " vs ", " versus ", "difference between"])],
        ),
        // ── Knowledge requests ("what is salinity", "info regarding temp") ──
        Rule::new(
            "knowledge_temperature",
            Intent::ImportanceTemperature,
            vec![knowledge_request(), temperature_topic()],
        ),
        Rule::new(
            "knowledge_salinity",
            Intent::ImportanceSalinity,
            vec![knowledge_request(), salinity_topic()],
        ),
        Rule::new(
            "knowledge_pressure",
            Intent::ImportancePressure,
            vec![knowledge_request(), pressure_topic()],
        ),
        Rule::new(
            "knowledge_argo",
            Intent::ImportanceArgo,
            vec![knowledge_request(), phrases(&["argo"])],
        ),
        // ── Variable profiles ───────────────────────────────────
        Rule::new(
            "temperature",
            Intent::Temperature,
            vec![vec![
                Pattern::Phrase("temperature profile"),
                Pattern::Phrase("temp profile"),
                Pattern::Phrase("temp data"),
                Pattern::Phrase("temperature"),
                Pattern::word("temp"),
                Pattern::Phrase("heat"),
            ]],
        ),
        Rule::new("salinity", Intent::Salinity, vec![salinity_topic()]),
        Rule::new(
            "pressure",
            Intent::Pressure,
            vec![vec![
                Pattern::Phrase("pressure"),
                Pattern::word("pres"),
                Pattern::Phrase("depth profile"),
                Pattern::Phrase("depth data"),
            ]],
        ),
        Rule::new(
            "trajectory",
            Intent::Trajectory,
            vec![phrases(&[
                "trajectory",
                "path",
                "track",
                "route",
                "map",
                "position",
                "location",
                "where is",
            ])],
        ),
        Rule::new(
            "ask_float",
            Intent::AskFloat,
            vec![phrases(&[
                "add float",
                "load float",
                "include float",
                "add another float",
            ])],
        ),
        // ── Social ──────────────────────────────────────────────
        Rule::new(
            "greeting",
            Intent::Greeting,
            vec![vec![
                Pattern::Phrase("hello"),
                Pattern::word("hi"),
                Pattern::word("hey"),
                Pattern::Phrase("good morning"),
                Pattern::Phrase("good evening"),
            ]],
        ),
        Rule::new(
            "thanks",
            Intent::Thanks,
            vec![phrases(&["thanks", "thank you"])],
        ),
        Rule::new(
            "goodbye",
            Intent::Goodbye,
            vec![vec![
                Pattern::word("bye"),
                Pattern::Phrase("goodbye"),
                Pattern::Phrase("see you"),
            ]],
        ),
        // ── Explicit "importance of X" phrasing ─────────────────
        Rule::new(
            "importance_temperature",
            Intent::ImportanceTemperature,
            vec![phrases(&["importance of temperature"])],
        ),
        Rule::new(
            "importance_salinity",
            Intent::ImportanceSalinity,
            vec![phrases(&["importance of salinity"])],
        ),
        Rule::new(
            "importance_pressure",
            Intent::ImportancePressure,
            vec![phrases(&["importance of pressure"])],
        ),
        Rule::new(
            "importance_argo",
            Intent::ImportanceArgo,
            vec![phrases(&["why argo", "importance of argo"])],
        ),
    ]
}
