//! recalibration/grid.rs
//! Exhaustive search over the fixed threshold grid.

use crate::constants::recalibration::{ENTROPY_GRID_TENTHS_MAX, ENTROPY_GRID_TENTHS_MIN, SIZE_GRID};
use crate::recalibration::replay::replay_accuracy;
use crate::recalibration::types::Observation;
use crate::selector::ThresholdConfig;

/// Entropy candidates 2.0, 2.1, ..., 5.0 computed from integer tenths.
pub fn entropy_grid() -> impl Iterator<Item = f64> {
    (ENTROPY_GRID_TENTHS_MIN..=ENTROPY_GRID_TENTHS_MAX).map(|k| k as f64 / 10.0)
}

/// Every grid pair in enumeration order: entropy outer, size inner.
pub fn candidates() -> impl Iterator<Item = ThresholdConfig> {
    entropy_grid().flat_map(|e| SIZE_GRID.iter().map(move |&s| ThresholdConfig::new(e, s)))
}

/// Best-scoring grid pair and its accuracy. Ties keep the earliest pair.
pub fn best_grid_pair(observations: &[Observation]) -> (ThresholdConfig, f64) {
    let mut best: Option<(ThresholdConfig, f64)> = None;
    for candidate in candidates() {
        let score = replay_accuracy(observations, &candidate);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    // the grid is never empty
    best.unwrap_or((ThresholdConfig::default(), 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_31_by_4_pairs_without_float_drift() {
        let all: Vec<_> = candidates().collect();
        assert_eq!(all.len(), 124);
        assert_eq!(all[0], ThresholdConfig::new(2.0, 1_000_000));
        assert_eq!(all[1], ThresholdConfig::new(2.0, 5_000_000));
        assert_eq!(all[123], ThresholdConfig::new(5.0, 20_000_000));
        assert!(entropy_grid().any(|e| e == 2.3));
    }

    #[test]
    fn empty_window_returns_first_pair() {
        let (cfg, score) = best_grid_pair(&[]);
        assert_eq!(cfg, ThresholdConfig::new(2.0, 1_000_000));
        assert_eq!(score, 0.0);
    }
}
