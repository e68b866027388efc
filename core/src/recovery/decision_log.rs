//! recovery/decision_log.rs
//! The running JSONL log of decisions and their measured outcomes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compression::Algorithm;
use crate::features::ContentClass;
use crate::recovery::jsonl::{read_records, JsonlWriter};
use crate::selector::Decision;
use crate::types::CatalogResult;

const TAG: &str = "DECISION-LOG";

/// One line of the decision log. Older logs spell some fields differently;
/// the aliases accept them on read, writes always use the canonical names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(alias = "file_entropy")]
    pub entropy: f64,
    #[serde(alias = "original_size", alias = "file_size")]
    pub size: u64,
    #[serde(default, alias = "type", alias = "mime_type")]
    pub mime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_class: Option<ContentClass>,
    #[serde(alias = "algo")]
    pub algorithm: Algorithm,
    pub timestamp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entropy_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comp_time_sec: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub forced: bool,
}

impl LogRecord {
    /// Build the record written after a successful store.
    pub fn from_outcome(decision: &Decision, compressed_size: u64, compression_ratio: f64, comp_time_sec: f64) -> Self {
        Self {
            file_name: Some(decision.file_name.clone()),
            entropy: decision.features.entropy,
            size: decision.features.size,
            mime: decision.features.mime.clone(),
            content_class: Some(decision.features.content_class),
            algorithm: decision.algorithm,
            timestamp: decision.timestamp,
            entropy_threshold: Some(decision.entropy_threshold_used),
            size_threshold: Some(decision.size_threshold_used),
            compressed_size: Some(compressed_size),
            compression_ratio: Some(compression_ratio),
            comp_time_sec: Some(comp_time_sec),
            forced: decision.forced,
        }
    }
}

#[derive(Debug)]
pub struct DecisionLog {
    writer: JsonlWriter,
}

impl DecisionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { writer: JsonlWriter::new(path) }
    }

    pub fn path(&self) -> &Path {
        self.writer.path()
    }

    pub fn append(&self, record: &LogRecord) -> CatalogResult<()> {
        self.writer.append(record)
    }

    pub fn load_all(&self) -> CatalogResult<Vec<LogRecord>> {
        read_records(self.path(), TAG)
    }

    /// The last `window` well-formed records, oldest first.
    pub fn load_window(&self, window: usize) -> CatalogResult<Vec<LogRecord>> {
        let mut records = self.load_all()?;
        let excess = records.len().saturating_sub(window);
        records.drain(..excess);
        Ok(records)
    }
}
