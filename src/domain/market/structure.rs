use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwingKind {
    High,
    Low,
}

/// A local extremum at `index` in the candle series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwingPoint {
    pub index: usize,
    pub value: f64,
    pub kind: SwingKind,
}

/// Swing highs and lows, each in ascending index order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Swings {
    pub highs: Vec<SwingPoint>,
    pub lows: Vec<SwingPoint>,
}

impl Swings {
    /// The two most recent swing-high values as `(older, newer)`
    pub fn last_two_highs(&self) -> Option<(f64, f64)> {
        last_two(&self.highs)
    }

    /// The two most recent swing-low values as `(older, newer)`
    pub fn last_two_lows(&self) -> Option<(f64, f64)> {
        last_two(&self.lows)
    }
}

fn last_two(points: &[SwingPoint]) -> Option<(f64, f64)> {
    match points {
        [.., older, newer] => Some((older.value, newer.value)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StructureLabel {
    Uptrend,
    Downtrend,
    Range,
}

impl StructureLabel {
    pub fn is_directional(&self) -> bool {
        !matches!(self, StructureLabel::Range)
    }
}

impl fmt::Display for StructureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureLabel::Uptrend => write!(f, "UPTREND"),
            StructureLabel::Downtrend => write!(f, "DOWNTREND"),
            StructureLabel::Range => write!(f, "RANGE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn high(index: usize, value: f64) -> SwingPoint {
        SwingPoint {
            index,
            value,
            kind: SwingKind::High,
        }
    }

    #[test]
    fn test_last_two_takes_most_recent_pair() {
        let swings = Swings {
            highs: vec![high(3, 10.0), high(9, 12.0), high(15, 11.0)],
            lows: vec![],
        };
        assert_eq!(swings.last_two_highs(), Some((12.0, 11.0)));
        assert_eq!(swings.last_two_lows(), None);
    }

    #[test]
    fn test_structure_label_serializes_uppercase() {
        let json = serde_json::to_string(&StructureLabel::Downtrend).unwrap();
        assert_eq!(json, "\"DOWNTREND\"");
    }
}
