//! telemetry/counters.rs
//! Mutable counters collected while ingesting or maintaining the catalog.
//!
//! Each worker owns its own counters and they are merged once at the end.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::compression::Algorithm;

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngestCounters {
    pub succeeded: u64,
    pub skipped: u64,
    pub failed: u64,
    pub bytes_original: u64,
    pub bytes_compressed: u64,
    pub per_algorithm: BTreeMap<Algorithm, u64>,
}

impl IngestCounters {
    /// Record one stored (or updated) item.
    pub fn add_success(&mut self, algorithm: Algorithm, original: u64, compressed: u64) {
        self.succeeded += 1;
        self.bytes_original += original;
        self.bytes_compressed += compressed;
        *self.per_algorithm.entry(algorithm).or_insert(0) += 1;
    }

    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_failed(&mut self) {
        self.failed += 1;
    }

    pub fn total(&self) -> u64 {
        self.succeeded + self.skipped + self.failed
    }

    pub fn count_for(&self, algorithm: Algorithm) -> u64 {
        self.per_algorithm.get(&algorithm).copied().unwrap_or(0)
    }

    pub fn merge(&mut self, other: &IngestCounters) {
        self.succeeded += other.succeeded;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.bytes_original += other.bytes_original;
        self.bytes_compressed += other.bytes_compressed;
        for (alg, n) in &other.per_algorithm {
            *self.per_algorithm.entry(*alg).or_insert(0) += n;
        }
    }
}

impl AddAssign for IngestCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
