//! Canned reply texts.

use ac_protocol::{Dataset, FloatId, Intent, Variable};

use crate::error::TurnError;

pub const IMPORTANCE_TEMPERATURE: &str = "🌡️ **Temperature** is critical for understanding the \
ocean's heat content, which influences currents, weather patterns, and climate change.";

pub const IMPORTANCE_SALINITY: &str = "🧂 **Salinity** affects the density of seawater, driving \
ocean circulation and influencing marine ecosystems.";

pub const IMPORTANCE_PRESSURE: &str = "⏱️ **Pressure** increases with depth and helps determine \
the density and stability of ocean layers, critical for understanding deep-sea processes.";

pub const IMPORTANCE_ARGO: &str = "🌊 **Argo data** is essential for monitoring global ocean \
conditions. It provides free, high-quality temperature, salinity, and pressure profiles from \
thousands of floats worldwide to support climate and weather research.";

pub const GREETING: &str =
    "Hello! You can ask about Argo floats or type a float number to get started.";

pub const THANKS: &str = "You're welcome! 🌊";

pub const GOODBYE: &str = "Goodbye! If you need me again, just send a message. 👋";

pub const HELP: &str = "Here's what I can do:\n\
- Ask about variables: 'temperature', 'salinity', 'pressure'\n\
- Show a float's 'trajectory' or 'info'\n\
- 'compare' two or more floats (e.g., 'compare 2903893 vs 2903892')\n\
- 'add float' to load new data\n\
- 'list floats' to see what's loaded\n\
Tip: Include a float number like 2903893, or load exactly one float to avoid ambiguity.";

pub const UNKNOWN: &str = "I didn't quite get that. You can say things like:\n\
'temperature 2903893', 'trajectory', 'compare 2903893 2903892', 'info float 2903893', or 'help'.";

pub const ASK_FLOAT: &str = "Please type the float number you want to add.";

pub const INVALID_FLOAT_NUMBER: &str = "Please enter a valid float number (integer).";

pub const COMPARE_NEEDS_TWO: &str = "Please specify at least two float numbers to compare \
or add multiple floats from the sidebar.";

pub const NO_FLOATS_LOADED: &str =
    "No floats loaded yet. Use the sidebar or type 'add float' to load one.";

pub fn float_loaded(float_id: FloatId) -> String {
    format!(
        "Float {float_id} loaded. You can now ask: temperature, salinity, pressure, \
         trajectory, info, or add float."
    )
}

pub fn fetch_failed(float_id: FloatId) -> String {
    format!("Failed to load float {float_id}. Please try another ID.")
}

pub fn loaded_floats(ids: &[FloatId]) -> String {
    if ids.is_empty() {
        return NO_FLOATS_LOADED.to_string();
    }
    format!("Loaded floats: {}", join_ids(ids))
}

pub fn profile_displayed(variable: Variable, float_id: FloatId) -> String {
    format!("{} profile for float {float_id} displayed.", variable.title())
}

pub fn trajectory_displayed(float_id: FloatId) -> String {
    format!("Full trajectory for float {float_id} displayed.")
}

pub fn comparing(ids: &[FloatId]) -> String {
    format!("Comparing floats: {}. See graphs below.", join_ids(ids))
}

/// One-line summary of the latest cycle of a float.
pub fn float_info(float_id: FloatId, dataset: &Dataset) -> String {
    let lat = dataset.latest_latitude().unwrap_or(f64::NAN);
    let lon = dataset.latest_longitude().unwrap_or(f64::NAN);
    let cycle = dataset
        .latest_cycle()
        .map_or_else(|| "Unknown".to_string(), |c| c.to_string());
    let date = dataset
        .latest_time()
        .map_or_else(|| "Unknown".to_string(), |t| t.format("%Y-%m-%d").to_string());
    format!("Float {float_id}: Latest cycle {cycle}, at {lat:.2}°N, {lon:.2}°E on {date}.")
}

/// Prompt asking the user to name a float for `intent`.
pub fn ambiguous_target(intent: Intent) -> String {
    match intent {
        Intent::FloatInfo => "Please specify which float you want info for \
             (e.g., 'info float 2903893'), or load exactly one float."
            .to_string(),
        other => format!(
            "Please specify the float number (e.g., '{other} 2903893') or load exactly one float."
        ),
    }
}

/// Static reply for intents that need no data, or None.
pub fn fixed(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::ImportanceTemperature => Some(IMPORTANCE_TEMPERATURE),
        Intent::ImportanceSalinity => Some(IMPORTANCE_SALINITY),
        Intent::ImportancePressure => Some(IMPORTANCE_PRESSURE),
        Intent::ImportanceArgo => Some(IMPORTANCE_ARGO),
        Intent::Greeting => Some(GREETING),
        Intent::Thanks => Some(THANKS),
        Intent::Goodbye => Some(GOODBYE),
        Intent::Help => Some(HELP),
        Intent::Unknown => Some(UNKNOWN),
        _ => None,
    }
}

/// User-facing text for a recovered turn error.
pub fn for_error(err: &TurnError) -> String {
    match err {
        TurnError::Parse(_) => INVALID_FLOAT_NUMBER.to_string(),
        TurnError::Fetch { float_id, .. } => fetch_failed(*float_id),
        TurnError::AmbiguousTarget(intent) => ambiguous_target(*intent),
    }
}

fn join_ids(ids: &[FloatId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
