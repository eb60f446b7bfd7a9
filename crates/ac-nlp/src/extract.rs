//! Float id extraction — standalone 6 to 8 digit tokens.

use std::sync::LazyLock;

use regex::Regex;

use ac_protocol::FloatId;

static RE_FLOAT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[0-9]{6,8}\b").unwrap());

/// All float ids in `text`, left to right, duplicates kept.
pub fn extract_float_ids(text: &str) -> Vec<FloatId> {
    RE_FLOAT_ID
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .map(FloatId)
        .collect()
}
