use crate::domain::market::{StructureLabel, Swings};

/// Classify market structure from the two most recent swing highs and lows.
///
/// Higher high with higher low is an uptrend, lower high with lower low a
/// downtrend. Mixed signals, equal swings, or fewer than two swings of either
/// kind fall through to `Range`.
pub fn classify_structure(swings: &Swings) -> StructureLabel {
    let (Some((h1, h2)), Some((l1, l2))) = (swings.last_two_highs(), swings.last_two_lows())
    else {
        return StructureLabel::Range;
    };

    if h2 > h1 && l2 > l1 {
        StructureLabel::Uptrend
    } else if h2 < h1 && l2 < l1 {
        StructureLabel::Downtrend
    } else {
        StructureLabel::Range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::{SwingKind, SwingPoint};

    fn points(values: &[f64], kind: SwingKind, offset: usize) -> Vec<SwingPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| SwingPoint {
                index: offset + i * 10,
                value,
                kind,
            })
            .collect()
    }

    fn swings(highs: &[f64], lows: &[f64]) -> Swings {
        Swings {
            highs: points(highs, SwingKind::High, 5),
            lows: points(lows, SwingKind::Low, 0),
        }
    }

    #[test]
    fn test_higher_highs_and_lows_is_uptrend() {
        assert_eq!(
            classify_structure(&swings(&[10.0, 12.0], &[4.0, 6.0])),
            StructureLabel::Uptrend
        );
    }

    #[test]
    fn test_lower_highs_and_lows_is_downtrend() {
        assert_eq!(
            classify_structure(&swings(&[12.0, 10.0], &[6.0, 4.0])),
            StructureLabel::Downtrend
        );
    }

    #[test]
    fn test_mixed_signals_is_range() {
        assert_eq!(
            classify_structure(&swings(&[10.0, 12.0], &[6.0, 4.0])),
            StructureLabel::Range
        );
        assert_eq!(
            classify_structure(&swings(&[12.0, 10.0], &[4.0, 6.0])),
            StructureLabel::Range
        );
    }

    #[test]
    fn test_equal_swings_is_range() {
        assert_eq!(
            classify_structure(&swings(&[10.0, 10.0], &[4.0, 6.0])),
            StructureLabel::Range
        );
    }

    #[test]
    fn test_too_few_swings_is_range() {
        assert_eq!(
            classify_structure(&swings(&[10.0], &[4.0, 6.0])),
            StructureLabel::Range
        );
        assert_eq!(
            classify_structure(&swings(&[10.0, 12.0], &[])),
            StructureLabel::Range
        );
        assert_eq!(classify_structure(&Swings::default()), StructureLabel::Range);
    }

    #[test]
    fn test_only_last_two_swings_count() {
        // Older swings trend down, the latest pair trends up
        assert_eq!(
            classify_structure(&swings(&[20.0, 10.0, 12.0], &[9.0, 4.0, 6.0])),
            StructureLabel::Uptrend
        );
    }
}
