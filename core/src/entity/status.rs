use serde::{Deserialize, Serialize};

/// Status color derived from a vehicle's remaining power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Orange,
    Red,
}

impl StatusColor {
    /// Above 50 is green, strictly between 20 and 50 is orange, anything
    /// else (including exactly 50 and a missing reading) is red.
    pub fn from_power(power_level_percent: Option<f64>) -> Self {
        match power_level_percent {
            Some(power) if power > 50.0 => StatusColor::Green,
            Some(power) if power < 50.0 && power > 20.0 => StatusColor::Orange,
            _ => StatusColor::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Orange => "orange",
            StatusColor::Red => "red",
        }
    }
}
