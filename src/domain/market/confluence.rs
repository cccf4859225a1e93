use serde::{Serialize, Serializer};
use std::fmt;

/// One scoring factor that fired. Variants are declared in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfluenceReason {
    DefinedStructure,
    FastMaAboveSlowMa,
    ExtremeRsi,
    AboveAverageVolume,
}

impl ConfluenceReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfluenceReason::DefinedStructure => "defined structure",
            ConfluenceReason::FastMaAboveSlowMa => "fast MA above slow MA",
            ConfluenceReason::ExtremeRsi => "extreme RSI",
            ConfluenceReason::AboveAverageVolume => "above-average volume",
        }
    }
}

impl fmt::Display for ConfluenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConfluenceReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConfluenceResult {
    pub score: u8,
    pub reasons: Vec<ConfluenceReason>,
}

impl ConfluenceResult {
    pub fn add(&mut self, reason: ConfluenceReason) {
        self.score += 1;
        self.reasons.push(reason);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Wait,
    Promising,
    Avoid,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Wait => write!(f, "WAIT"),
            Decision::Promising => write!(f, "PROMISING"),
            Decision::Avoid => write!(f, "AVOID"),
        }
    }
}
