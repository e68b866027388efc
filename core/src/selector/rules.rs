//! selector/rules.rs
//! The algorithm decision function.
//!
//! Rules are evaluated in a fixed order and the first match wins. The order is
//! part of the catalog's observable behaviour: reordering changes which
//! algorithm existing inputs map to.

use crate::compression::Algorithm;
use crate::constants::rules::*;
use crate::features::FeatureVector;
use crate::selector::thresholds::ThresholdConfig;

/// 1. entropy > 7.5                          → skip
/// 2. entropy > entropy_threshold            → brotli
/// 3. size > size_threshold                  → lz4
/// 4. size < 1000                            → gzip
/// 5. 1000 ≤ size ≤ 100000, entropy < 2.5    → bz2
/// 6. entropy < 1.5                          → lzma
/// 7. otherwise                              → zstd
pub fn choose_algorithm(entropy: f64, size: u64, thresholds: &ThresholdConfig) -> Algorithm {
    if entropy > SKIP_ENTROPY {
        Algorithm::Skip
    } else if entropy > thresholds.entropy_threshold {
        Algorithm::Brotli
    } else if size > thresholds.size_threshold {
        Algorithm::Lz4
    } else if size < SMALL_FILE_LIMIT {
        Algorithm::Gzip
    } else if size <= MID_SIZE_MAX && entropy < MID_SIZE_LOW_ENTROPY {
        Algorithm::Bz2
    } else if entropy < REPETITIVE_ENTROPY {
        Algorithm::Lzma
    } else {
        Algorithm::Zstd
    }
}

/// Pure selection over a feature vector. The content class is carried for
/// the decision record but does not influence the rule chain.
pub fn select(features: &FeatureVector, thresholds: &ThresholdConfig) -> Algorithm {
    choose_algorithm(features.entropy, features.size, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> ThresholdConfig {
        ThresholdConfig::default()
    }

    #[test]
    fn each_rule_fires_in_its_band() {
        let t = defaults();
        assert_eq!(choose_algorithm(7.9, 10, &t), Algorithm::Skip);
        assert_eq!(choose_algorithm(5.0, 10, &t), Algorithm::Brotli);
        assert_eq!(choose_algorithm(3.0, 6_000_000, &t), Algorithm::Lz4);
        assert_eq!(choose_algorithm(3.0, 999, &t), Algorithm::Gzip);
        assert_eq!(choose_algorithm(2.0, 1_000, &t), Algorithm::Bz2);
        assert_eq!(choose_algorithm(2.0, 100_000, &t), Algorithm::Bz2);
        assert_eq!(choose_algorithm(1.0, 100_001, &t), Algorithm::Lzma);
        assert_eq!(choose_algorithm(3.0, 50_000, &t), Algorithm::Zstd);
    }

    #[test]
    fn boundaries_are_strict_where_the_rules_say_so() {
        let t = defaults();
        // exactly at the entropy threshold is not "greater than"
        assert_eq!(choose_algorithm(3.5, 50_000, &t), Algorithm::Zstd);
        // exactly 7.5 is not skipped
        assert_eq!(choose_algorithm(7.5, 50_000, &t), Algorithm::Brotli);
        // exactly at the size threshold is not lz4
        assert_eq!(choose_algorithm(3.0, 5_000_000, &t), Algorithm::Zstd);
    }

    #[test]
    fn small_file_rule_precedes_low_entropy_rules() {
        assert_eq!(choose_algorithm(0.0, 10, &defaults()), Algorithm::Gzip);
    }

    #[test]
    fn thresholds_shift_the_decision() {
        let strict = ThresholdConfig::new(2.0, 1_000_000);
        assert_eq!(choose_algorithm(3.0, 50_000, &strict), Algorithm::Brotli);
        assert_eq!(choose_algorithm(1.8, 2_000_000, &strict), Algorithm::Lz4);
    }
}
