//! telemetry/snapshot.rs
//! Immutable report handed back at the end of a batch.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compression::Algorithm;
use crate::telemetry::counters::IngestCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Stored,
    /// Missing input or blob; nothing was written.
    Skipped,
    Failed,
}

/// What happened to one input of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutcome {
    /// Input path, or catalog id for maintenance runs.
    pub item: String,
    pub status: ItemStatus,
    pub algorithm: Option<Algorithm>,
    pub entry_id: Option<i64>,
    pub message: Option<String>,
}

impl ItemOutcome {
    pub fn stored(item: impl Into<String>, algorithm: Algorithm, entry_id: i64) -> Self {
        Self {
            item: item.into(),
            status: ItemStatus::Stored,
            algorithm: Some(algorithm),
            entry_id: Some(entry_id),
            message: None,
        }
    }

    pub fn skipped(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            status: ItemStatus::Skipped,
            algorithm: None,
            entry_id: None,
            message: Some(message.into()),
        }
    }

    pub fn failed(item: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            status: ItemStatus::Failed,
            algorithm: None,
            entry_id: None,
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub counters: IngestCounters,
    /// `bytes_compressed / bytes_original`; 1.0 when nothing was stored.
    pub compression_ratio: f64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
    /// In input order.
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn from(counters: IngestCounters, timer: &TelemetryTimer, items: Vec<ItemOutcome>) -> Self {
        let elapsed = timer.elapsed();
        let compression_ratio = if counters.bytes_original > 0 {
            counters.bytes_compressed as f64 / counters.bytes_original as f64
        } else {
            1.0
        };
        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_original as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        Self {
            counters,
            compression_ratio,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
            items,
        }
    }

    pub fn succeeded(&self) -> u64 {
        self.counters.succeeded
    }

    pub fn skipped(&self) -> u64 {
        self.counters.skipped
    }

    pub fn failed(&self) -> u64 {
        self.counters.failed
    }

    /// Counts agree with the per-item list.
    pub fn sanity_check(&self) -> bool {
        let count = |s: ItemStatus| self.items.iter().filter(|i| i.status == s).count() as u64;
        count(ItemStatus::Stored) == self.counters.succeeded
            && count(ItemStatus::Skipped) == self.counters.skipped
            && count(ItemStatus::Failed) == self.counters.failed
    }
}
