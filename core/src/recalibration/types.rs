//! recalibration/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::compression::Algorithm;
use crate::recovery::LogRecord;
use crate::selector::{Decision, ThresholdConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Exhaustive search over the fixed threshold grid.
    #[default]
    GridSearch,
    /// Blend current thresholds toward the observed medians.
    Smoothing,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::GridSearch => "grid_search",
            Strategy::Smoothing  => "smoothing",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" | "grid_search" | "grid-search" => Ok(Strategy::GridSearch),
            "smoothing" | "smooth" | "exponential" => Ok(Strategy::Smoothing),
            other => Err(format!("unknown recalibration strategy: {other}")),
        }
    }
}

/// The three fields replay needs from a historical record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub entropy: f64,
    pub size: u64,
    pub algorithm: Algorithm,
}

impl Observation {
    pub fn new(entropy: f64, size: u64, algorithm: Algorithm) -> Self {
        Self { entropy, size, algorithm }
    }

    /// Rows awaiting entropy backfill carry no signal.
    pub fn from_entry(entry: &CatalogEntry) -> Option<Self> {
        entry.entropy.map(|entropy| Self::new(entropy, entry.original_size, entry.algorithm))
    }
}

impl From<&LogRecord> for Observation {
    fn from(rec: &LogRecord) -> Self {
        Self::new(rec.entropy, rec.size, rec.algorithm)
    }
}

impl From<&Decision> for Observation {
    fn from(d: &Decision) -> Self {
        Self::new(d.features.entropy, d.features.size, d.algorithm)
    }
}

/// Where the observation window came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationSource {
    DecisionLog,
    Catalog,
    /// Passed in directly by the caller.
    Supplied,
}

/// Result of one recalibration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalibrationOutcome {
    pub previous: ThresholdConfig,
    pub thresholds: ThresholdConfig,
    /// Replay accuracy of `thresholds` over the window, in `[0, 1]`.
    /// Zero when the window was too small to act on.
    pub confidence: f64,
    /// Replay accuracy of `previous` over the same window.
    pub baseline_accuracy: f64,
    pub samples: usize,
    pub strategy: Strategy,
    pub source: ObservationSource,
    /// The thresholds changed and were installed.
    pub installed: bool,
}

impl RecalibrationOutcome {
    pub fn changed(&self) -> bool {
        self.thresholds != self.previous
    }
}
