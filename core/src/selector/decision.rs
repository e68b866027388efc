//! selector/decision.rs
//! Append-only record of one selection.

use serde::{Deserialize, Serialize};

use crate::compression::Algorithm;
use crate::features::FeatureVector;
use crate::selector::rules::select;
use crate::selector::thresholds::ThresholdConfig;
use crate::utils::unix_timestamp;

/// What the selector chose for a file and under which thresholds.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub file_name: String,
    pub algorithm: Algorithm,
    pub entropy_threshold_used: f64,
    pub size_threshold_used: u64,
    pub features: FeatureVector,
    pub timestamp: f64,
    /// Caller overrode the rule chain.
    #[serde(default)]
    pub forced: bool,
}

impl Decision {
    /// Run the rule chain and stamp the thresholds it ran under.
    pub fn decide(file_name: impl Into<String>, features: FeatureVector, thresholds: &ThresholdConfig) -> Self {
        let algorithm = select(&features, thresholds);
        Self::build(file_name.into(), algorithm, features, thresholds, false)
    }

    /// Record an explicit caller choice. Thresholds are still stamped so the
    /// row is comparable with rule-chain decisions.
    pub fn forced(
        file_name: impl Into<String>,
        algorithm: Algorithm,
        features: FeatureVector,
        thresholds: &ThresholdConfig,
    ) -> Self {
        Self::build(file_name.into(), algorithm, features, thresholds, true)
    }

    fn build(
        file_name: String,
        algorithm: Algorithm,
        features: FeatureVector,
        thresholds: &ThresholdConfig,
        forced: bool,
    ) -> Self {
        Self {
            file_name,
            algorithm,
            entropy_threshold_used: thresholds.entropy_threshold,
            size_threshold_used: thresholds.size_threshold,
            features,
            timestamp: unix_timestamp(),
            forced,
        }
    }

    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig::new(self.entropy_threshold_used, self.size_threshold_used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ContentClass;

    #[test]
    fn decide_stamps_thresholds_used() {
        let fv = FeatureVector::new(0.0, 10, ContentClass::Binary, "application/octet-stream");
        let t = ThresholdConfig::new(4.0, 1_000_000);
        let d = Decision::decide("zeros.bin", fv, &t);
        assert_eq!(d.algorithm, Algorithm::Gzip);
        assert_eq!(d.thresholds(), t);
        assert!(!d.forced);
        assert!(d.timestamp > 0.0);
    }

    #[test]
    fn forced_keeps_caller_choice() {
        let fv = FeatureVector::new(0.0, 10, ContentClass::Binary, "application/octet-stream");
        let d = Decision::forced("zeros.bin", Algorithm::Zstd, fv, &ThresholdConfig::default());
        assert_eq!(d.algorithm, Algorithm::Zstd);
        assert!(d.forced);
    }
}
