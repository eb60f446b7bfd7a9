use serde::{Deserialize, Serialize};

use crate::float::Variable;

/// Classified purpose of a single utterance.
///
/// The label set is closed: every utterance resolves to exactly one of these,
/// with `Unknown` as the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Help,
    ListFloats,
    FloatInfo,
    CompareFloats,
    ImportanceTemperature,
    ImportanceSalinity,
    ImportancePressure,
    ImportanceArgo,
    Temperature,
    Salinity,
    Pressure,
    Trajectory,
    AskFloat,
    Greeting,
    Thanks,
    Goodbye,
    Unknown,
}

impl Intent {
    pub const ALL: [Intent; 17] = [
        Self::Help,
        Self::ListFloats,
        Self::FloatInfo,
        Self::CompareFloats,
        Self::ImportanceTemperature,
        Self::ImportanceSalinity,
        Self::ImportancePressure,
        Self::ImportanceArgo,
        Self::Temperature,
        Self::Salinity,
        Self::Pressure,
        Self::Trajectory,
        Self::AskFloat,
        Self::Greeting,
        Self::Thanks,
        Self::Goodbye,
        Self::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::ListFloats => "list_floats",
            Self::FloatInfo => "float_info",
            Self::CompareFloats => "compare_floats",
            Self::ImportanceTemperature => "importance_temperature",
            Self::ImportanceSalinity => "importance_salinity",
            Self::ImportancePressure => "importance_pressure",
            Self::ImportanceArgo => "importance_argo",
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::Pressure => "pressure",
            Self::Trajectory => "trajectory",
            Self::AskFloat => "ask_float",
            Self::Greeting => "greeting",
            Self::Thanks => "thanks",
            Self::Goodbye => "goodbye",
            Self::Unknown => "unknown",
        }
    }

    /// Profile variable for the three variable intents.
    pub fn variable(&self) -> Option<Variable> {
        match self {
            Self::Temperature => Some(Variable::Temperature),
            Self::Salinity => Some(Variable::Salinity),
            Self::Pressure => Some(Variable::Pressure),
            _ => None,
        }
    }

    /// Whether answering needs a loaded dataset for a single target float.
    pub fn requires_target(&self) -> bool {
        matches!(
            self,
            Self::Temperature | Self::Salinity | Self::Pressure | Self::Trajectory | Self::FloatInfo
        )
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
