//! scheduler/policy.rs
//! When recalibration runs: every K recorded decisions, or only on demand.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::constants::recalibration::DEFAULT_WINDOW;
use crate::recalibration::Strategy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecalibrationPolicy {
    /// `None` disables automatic recalibration.
    pub every_k_decisions: Option<u64>,
    pub window: usize,
    pub strategy: Strategy,
}

impl Default for RecalibrationPolicy {
    fn default() -> Self {
        Self::on_demand()
    }
}

impl RecalibrationPolicy {
    pub fn on_demand() -> Self {
        Self { every_k_decisions: None, window: DEFAULT_WINDOW, strategy: Strategy::GridSearch }
    }

    pub fn every(k: u64, window: usize, strategy: Strategy) -> Self {
        Self { every_k_decisions: Some(k).filter(|k| *k > 0), window, strategy }
    }
}

/// Counts recorded decisions and fires once per K.
#[derive(Debug)]
pub struct RecalibrationTrigger {
    every_k: Option<u64>,
    seen: AtomicU64,
}

impl RecalibrationTrigger {
    pub fn new(policy: &RecalibrationPolicy) -> Self {
        Self { every_k: policy.every_k_decisions.filter(|k| *k > 0), seen: AtomicU64::new(0) }
    }

    /// Register one decision. Exactly one caller observes `true` per K
    /// decisions, even under concurrent ingestion.
    pub fn observe(&self) -> bool {
        match self.every_k {
            Some(k) => (self.seen.fetch_add(1, Ordering::AcqRel) + 1) % k == 0,
            None => {
                self.seen.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    pub fn observed(&self) -> u64 {
        self.seen.load(Ordering::Acquire)
    }
}
