//! recalibration/smoothing.rs

use crate::constants::recalibration::{SMOOTHING_ADOPT, SMOOTHING_RETAIN};
use crate::recalibration::types::Observation;
use crate::selector::ThresholdConfig;
use crate::utils::median;

/// `new = 0.7·old + 0.3·median` for both fields, size rounded to the byte.
/// `None` for an empty window.
pub fn smoothed(observations: &[Observation], current: &ThresholdConfig) -> Option<ThresholdConfig> {
    let entropies: Vec<f64> = observations.iter().map(|o| o.entropy).collect();
    let sizes: Vec<f64> = observations.iter().map(|o| o.size as f64).collect();
    let median_entropy = median(&entropies)?;
    let median_size = median(&sizes)?;

    let entropy = SMOOTHING_RETAIN * current.entropy_threshold + SMOOTHING_ADOPT * median_entropy;
    let size = SMOOTHING_RETAIN * current.size_threshold as f64 + SMOOTHING_ADOPT * median_size;
    Some(ThresholdConfig::new(entropy, size.round().max(0.0) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::Algorithm;

    #[test]
    fn blends_toward_medians() {
        let obs = [
            Observation::new(1.0, 1_000, Algorithm::Gzip),
            Observation::new(2.0, 3_000, Algorithm::Gzip),
            Observation::new(9.0, 2_000_000, Algorithm::Gzip),
        ];
        let cfg = smoothed(&obs, &ThresholdConfig::new(3.5, 5_000_000)).unwrap();
        assert!((cfg.entropy_threshold - (0.7 * 3.5 + 0.3 * 2.0)).abs() < 1e-12);
        assert_eq!(cfg.size_threshold, 3_500_900);
    }

    #[test]
    fn empty_window_has_no_proposal() {
        assert!(smoothed(&[], &ThresholdConfig::default()).is_none());
    }
}
