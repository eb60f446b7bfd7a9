use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Argo float platform number (WMO id), e.g. `2903893`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloatId(pub u32);

impl FloatId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for FloatId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for FloatId {
    type Err = ParseIntError;

    /// Parses a bare integer, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

impl std::fmt::Display for FloatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Measured profile variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variable {
    Temperature,
    Salinity,
    Pressure,
}

impl Variable {
    pub const ALL: [Variable; 3] = [Self::Temperature, Self::Salinity, Self::Pressure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::Pressure => "pressure",
        }
    }

    /// Argo parameter code (`TEMP`, `PSAL`, `PRES`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Temperature => "TEMP",
            Self::Salinity => "PSAL",
            Self::Pressure => "PRES",
        }
    }

    /// Axis label with unit.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature (°C)",
            Self::Salinity => "Salinity (psu)",
            Self::Pressure => "Pressure (dbar)",
        }
    }

    /// Name with a leading capital, as used in chat replies.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Salinity => "Salinity",
            Self::Pressure => "Pressure",
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_id_parses_trimmed_integer() {
        assert_eq!(" 2903893\n".parse::<FloatId>().unwrap(), FloatId(2903893));
        assert!("float 2903893".parse::<FloatId>().is_err());
        assert!("".parse::<FloatId>().is_err());
        assert!("-5".parse::<FloatId>().is_err());
    }

    #[test]
    fn float_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&FloatId(6902746)).unwrap(), "6902746");
    }

    #[test]
    fn variable_codes() {
        let codes: Vec<_> = Variable::ALL.iter().map(Variable::code).collect();
        assert_eq!(codes, vec!["TEMP", "PSAL", "PRES"]);
    }
}
