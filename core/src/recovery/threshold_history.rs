//! recovery/threshold_history.rs
//! JSONL trail of every installed threshold configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::recovery::jsonl::{read_records, JsonlWriter};
use crate::selector::ThresholdConfig;
use crate::types::CatalogResult;

const TAG: &str = "THRESHOLD-HISTORY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdHistoryRecord {
    pub entropy_threshold: f64,
    pub size_threshold: u64,
    pub timestamp: f64,
    /// `operator`, `grid_search`, `smoothing`; absent in older files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ThresholdHistoryRecord {
    pub fn config(&self) -> ThresholdConfig {
        ThresholdConfig::new(self.entropy_threshold, self.size_threshold)
    }
}

#[derive(Debug)]
pub struct ThresholdHistory {
    writer: JsonlWriter,
}

impl ThresholdHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { writer: JsonlWriter::new(path) }
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    pub fn append(
        &self,
        config: &ThresholdConfig,
        timestamp: f64,
        source: &str,
        confidence: Option<f64>,
    ) -> CatalogResult<()> {
        self.writer.append(&ThresholdHistoryRecord {
            entropy_threshold: config.entropy_threshold,
            size_threshold: config.size_threshold,
            timestamp,
            source: Some(source.to_string()),
            confidence,
        })
    }

    /// All recorded installs, oldest first.
    pub fn load(&self) -> CatalogResult<Vec<ThresholdHistoryRecord>> {
        read_records(self.path(), TAG)
    }

    /// Remove the history file. Returns whether one existed.
    pub fn reset(&self) -> CatalogResult<bool> {
        self.writer.reset()
    }
}
