//! recalibration/recalibrator.rs
//! Closed loop: read the recent decision window, propose thresholds, install.
//!
//! Recorded decisions are only ever read. A proposal that replays worse than
//! the thresholds already in force is discarded, so installing never lowers
//! replay accuracy over the window it was computed from.

use log::{debug, info};

use crate::catalog::MetadataCatalog;
use crate::constants::recalibration::MIN_OBSERVATIONS;
use crate::recalibration::grid::best_grid_pair;
use crate::recalibration::replay::replay_accuracy;
use crate::recalibration::smoothing::smoothed;
use crate::recalibration::types::{Observation, ObservationSource, RecalibrationOutcome, Strategy};
use crate::recovery::DecisionLog;
use crate::selector::{ThresholdConfig, ThresholdStore};
use crate::types::CatalogResult;

/// Pure proposal over an observation window. Identical input gives
/// identical output.
pub fn propose(
    observations: &[Observation],
    current: ThresholdConfig,
    strategy: Strategy,
    source: ObservationSource,
) -> RecalibrationOutcome {
    let baseline = replay_accuracy(observations, &current);
    let unchanged = |confidence: f64| RecalibrationOutcome {
        previous: current,
        thresholds: current,
        confidence,
        baseline_accuracy: baseline,
        samples: observations.len(),
        strategy,
        source,
        installed: false,
    };

    if observations.len() < MIN_OBSERVATIONS {
        return unchanged(0.0);
    }

    let candidate = match strategy {
        Strategy::GridSearch => best_grid_pair(observations).0,
        Strategy::Smoothing => smoothed(observations, &current).unwrap_or(current),
    };
    let accuracy = replay_accuracy(observations, &candidate);
    if accuracy < baseline {
        debug!(
            "[RECALIBRATE] {strategy} candidate scored {accuracy:.3} < baseline {baseline:.3}, keeping current"
        );
        return unchanged(baseline);
    }

    RecalibrationOutcome {
        thresholds: candidate,
        confidence: accuracy,
        ..unchanged(accuracy)
    }
}

pub struct Recalibrator<'a> {
    thresholds: &'a ThresholdStore,
    log: Option<&'a DecisionLog>,
    catalog: Option<&'a MetadataCatalog>,
}

impl<'a> Recalibrator<'a> {
    pub fn new(thresholds: &'a ThresholdStore) -> Self {
        Self { thresholds, log: None, catalog: None }
    }

    pub fn with_log(mut self, log: &'a DecisionLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Catalog rows are the fallback window when the log is empty.
    pub fn with_catalog(mut self, catalog: &'a MetadataCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Copy of the most recent `window` rule-chain observations and where
    /// they came from. A non-empty log is used even if every record in it was
    /// forced.
    pub fn load_window(&self, window: usize) -> CatalogResult<(Vec<Observation>, ObservationSource)> {
        if let Some(log) = self.log {
            let records = log.load_all()?;
            if !records.is_empty() {
                // forced records are operator choices, not rule-chain outcomes
                let mut obs: Vec<Observation> =
                    records.iter().filter(|r| !r.forced).map(Observation::from).collect();
                let excess = obs.len().saturating_sub(window);
                obs.drain(..excess);
                return Ok((obs, ObservationSource::DecisionLog));
            }
        }
        let obs = match self.catalog {
            Some(catalog) => catalog
                .recent_entries(window)?
                .iter()
                .filter_map(Observation::from_entry)
                .collect(),
            None => Vec::new(),
        };
        Ok((obs, ObservationSource::Catalog))
    }

    pub fn run(&self, window: usize, strategy: Strategy) -> CatalogResult<RecalibrationOutcome> {
        let (observations, source) = self.load_window(window)?;
        self.run_on(&observations, strategy, source)
    }

    /// Propose from a caller-supplied window and install the result.
    pub fn run_on(
        &self,
        observations: &[Observation],
        strategy: Strategy,
        source: ObservationSource,
    ) -> CatalogResult<RecalibrationOutcome> {
        let current = self.thresholds.current();
        let mut outcome = propose(observations, current, strategy, source);

        if outcome.changed() {
            self.thresholds.install(outcome.thresholds, strategy.as_str(), Some(outcome.confidence))?;
            outcome.installed = true;
        }

        info!(
            "[RECALIBRATE] {strategy} over {} {:?} sample(s): entropy_threshold {:.3} -> {:.3}, size_threshold {} -> {}, confidence {:.3}",
            outcome.samples,
            outcome.source,
            outcome.previous.entropy_threshold,
            outcome.thresholds.entropy_threshold,
            outcome.previous.size_threshold,
            outcome.thresholds.size_threshold,
            outcome.confidence,
        );
        Ok(outcome)
    }
}
