use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trust level of a contribution, used only as a tiebreak below priority.
///
/// Variants are declared weakest first so the derived `Ord` matches the tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    VeryLow,
    Low,
    Medium,
    High,
    Explicit,
}

impl Confidence {
    pub fn weight(self) -> u8 {
        match self {
            Confidence::Explicit => 100,
            Confidence::High => 75,
            Confidence::Medium => 50,
            Confidence::Low => 25,
            Confidence::VeryLow => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Explicit => "EXPLICIT",
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
            Confidence::VeryLow => "VERY_LOW",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
