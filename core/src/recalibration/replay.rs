//! recalibration/replay.rs
//! Score a threshold pair against recorded decisions.

use crate::recalibration::types::Observation;
use crate::selector::{choose_algorithm, ThresholdConfig};

/// Fraction of observations whose replayed algorithm equals the recorded one.
/// An empty window scores `0.0`.
pub fn replay_accuracy(observations: &[Observation], thresholds: &ThresholdConfig) -> f64 {
    if observations.is_empty() {
        return 0.0;
    }
    let hits = observations
        .iter()
        .filter(|o| choose_algorithm(o.entropy, o.size, thresholds) == o.algorithm)
        .count();
    hits as f64 / observations.len() as f64
}
