use crate::domain::errors::AnalysisError;
use crate::domain::market::{SwingKind, SwingPoint, Swings};

pub const DEFAULT_EXTREMA_RADIUS: usize = 5;

/// Detect swing highs and lows over a symmetric window of `radius` bars.
///
/// Bar `i` is a swing high when `highs[i]` is strictly greater than every other
/// high in `[i - radius, i + radius]`, and a swing low when `lows[i]` is strictly
/// less than every other low in that window. Ties never qualify. The first and
/// last `radius` bars lack a full window and are never swing points.
pub fn detect_swings(highs: &[f64], lows: &[f64], radius: usize) -> Result<Swings, AnalysisError> {
    if radius == 0 {
        return Err(AnalysisError::malformed("extrema radius must be >= 1"));
    }
    if highs.len() != lows.len() {
        return Err(AnalysisError::malformed(format!(
            "high and low series differ in length ({} vs {})",
            highs.len(),
            lows.len()
        )));
    }

    let mut swings = Swings::default();
    let n = highs.len();
    // Needs at least 2 * radius + 1 bars, written so huge radii cannot overflow
    if radius >= n || n - radius <= radius {
        return Ok(swings);
    }

    for i in radius..n - radius {
        let window = || (i - radius..i).chain(i + 1..=i + radius);

        if window().all(|j| highs[i] > highs[j]) {
            swings.highs.push(SwingPoint {
                index: i,
                value: highs[i],
                kind: SwingKind::High,
            });
        }

        if window().all(|j| lows[i] < lows[j]) {
            swings.lows.push(SwingPoint {
                index: i,
                value: lows[i],
                kind: SwingKind::Low,
            });
        }
    }

    Ok(swings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(points: &[SwingPoint]) -> Vec<usize> {
        points.iter().map(|p| p.index).collect()
    }

    #[test]
    fn test_single_spike_is_one_swing_high() {
        let highs = [1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0];
        let swings = detect_swings(&highs, &highs, 2).unwrap();

        assert_eq!(swings.highs.len(), 1);
        assert_eq!(swings.highs[0].index, 3);
        assert_eq!(swings.highs[0].value, 5.0);
        assert_eq!(swings.highs[0].kind, SwingKind::High);
        assert!(swings.lows.is_empty());
    }

    #[test]
    fn test_single_dip_is_one_swing_low() {
        let lows = [4.0, 4.0, 4.0, 1.0, 4.0, 4.0, 4.0];
        let swings = detect_swings(&lows, &lows, 2).unwrap();

        assert!(swings.highs.is_empty());
        assert_eq!(indices(&swings.lows), vec![3]);
    }

    #[test]
    fn test_monotonic_series_has_no_swings() {
        let highs: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let lows: Vec<f64> = highs.iter().map(|h| h - 0.5).collect();
        let swings = detect_swings(&highs, &lows, 5).unwrap();

        assert!(swings.highs.is_empty());
        assert!(swings.lows.is_empty());
    }

    #[test]
    fn test_flat_top_does_not_qualify() {
        let highs = [1.0, 2.0, 5.0, 5.0, 2.0, 1.0];
        let swings = detect_swings(&highs, &highs, 1).unwrap();
        assert!(swings.highs.is_empty());
    }

    #[test]
    fn test_edge_bars_are_excluded() {
        // Global max sits on the last bar
        let highs = [1.0, 2.0, 3.0, 2.0, 1.0, 9.0];
        let swings = detect_swings(&highs, &highs, 2).unwrap();
        assert_eq!(indices(&swings.highs), vec![2]);
    }

    #[test]
    fn test_radius_widens_neighbourhood() {
        // Bar 3 beats its immediate neighbours but not bar 6
        let highs = [1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 6.0, 2.0, 1.0, 0.5];
        let narrow = detect_swings(&highs, &highs, 1).unwrap();
        let wide = detect_swings(&highs, &highs, 3).unwrap();
        assert_eq!(indices(&narrow.highs), vec![3, 6]);
        assert_eq!(indices(&wide.highs), vec![6]);
    }

    #[test]
    fn test_short_series_yields_nothing() {
        let highs = [1.0, 3.0, 1.0];
        let swings = detect_swings(&highs, &highs, 5).unwrap();
        assert!(swings.highs.is_empty());
    }

    #[test]
    fn test_oversized_radius_yields_nothing() {
        let highs: Vec<f64> = (0..300).map(|i| ((i % 20) as f64 - 10.0).abs()).collect();

        for radius in [150, 300, 1_000, usize::MAX / 2 + 1, usize::MAX] {
            let swings = detect_swings(&highs, &highs, radius).unwrap();
            assert!(swings.highs.is_empty(), "radius {}", radius);
            assert!(swings.lows.is_empty(), "radius {}", radius);
        }

        // Largest radius that still fits one full window
        let swings = detect_swings(&highs, &highs, 149).unwrap();
        assert!(swings.highs.len() <= 1);
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(detect_swings(&[1.0], &[1.0], 0).is_err());
        assert!(detect_swings(&[1.0, 2.0], &[1.0], 1).is_err());
    }
}
