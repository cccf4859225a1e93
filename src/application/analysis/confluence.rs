use crate::domain::market::{ConfluenceReason, ConfluenceResult, IndicatorSnapshot, StructureLabel};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Count the agreeing signals at the latest bar, one point each.
///
/// Factors are evaluated in a fixed order so the reasons list is reproducible.
/// An undefined input disables its factor. The moving-average factor checks
/// `ma_fast > ma_slow` whatever the structure direction.
pub fn score_confluence(
    structure: StructureLabel,
    latest: &IndicatorSnapshot,
) -> ConfluenceResult {
    let mut result = ConfluenceResult::default();

    if structure.is_directional() {
        result.add(ConfluenceReason::DefinedStructure);
    }

    if let (Some(fast), Some(slow)) = (latest.ma_fast, latest.ma_slow)
        && fast > slow
    {
        result.add(ConfluenceReason::FastMaAboveSlowMa);
    }

    if let Some(rsi) = latest.rsi
        && (rsi < RSI_OVERSOLD || rsi > RSI_OVERBOUGHT)
    {
        result.add(ConfluenceReason::ExtremeRsi);
    }

    if let Some(avg) = latest.volume_avg
        && latest.volume > avg
    {
        result.add(ConfluenceReason::AboveAverageVolume);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(
        ma_fast: f64,
        ma_slow: f64,
        rsi: f64,
        volume: f64,
        volume_avg: f64,
    ) -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: 100.0,
            volume,
            rsi: Some(rsi),
            ma_fast: Some(ma_fast),
            ma_slow: Some(ma_slow),
            volume_avg: Some(volume_avg),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_factors_fire_in_order() {
        let result = score_confluence(
            StructureLabel::Uptrend,
            &snapshot(110.0, 100.0, 25.0, 500.0, 300.0),
        );

        assert_eq!(result.score, 4);
        assert_eq!(
            result.reasons,
            vec![
                ConfluenceReason::DefinedStructure,
                ConfluenceReason::FastMaAboveSlowMa,
                ConfluenceReason::ExtremeRsi,
                ConfluenceReason::AboveAverageVolume,
            ]
        );
    }

    #[test]
    fn test_nothing_fires() {
        let result = score_confluence(
            StructureLabel::Range,
            &snapshot(90.0, 100.0, 50.0, 100.0, 300.0),
        );
        assert_eq!(result.score, 0);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_ma_factor_ignores_direction() {
        let result = score_confluence(
            StructureLabel::Downtrend,
            &snapshot(110.0, 100.0, 50.0, 100.0, 300.0),
        );
        assert_eq!(result.score, 2);
        assert_eq!(
            result.reasons,
            vec![
                ConfluenceReason::DefinedStructure,
                ConfluenceReason::FastMaAboveSlowMa
            ]
        );
    }

    #[test]
    fn test_rsi_thresholds_are_strict() {
        for rsi in [30.0, 50.0, 70.0] {
            let result =
                score_confluence(StructureLabel::Range, &snapshot(1.0, 2.0, rsi, 1.0, 2.0));
            assert_eq!(result.score, 0, "rsi {} should not score", rsi);
        }
        let high = score_confluence(StructureLabel::Range, &snapshot(1.0, 2.0, 70.1, 1.0, 2.0));
        assert_eq!(high.reasons, vec![ConfluenceReason::ExtremeRsi]);
    }

    #[test]
    fn test_undefined_inputs_disable_factors() {
        let latest = IndicatorSnapshot {
            close: 100.0,
            volume: 1_000.0,
            ..Default::default()
        };
        let result = score_confluence(StructureLabel::Uptrend, &latest);

        assert_eq!(result.score, 1);
        assert_eq!(result.reasons, vec![ConfluenceReason::DefinedStructure]);
    }
}
