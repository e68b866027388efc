//! engine/parallelism.rs
//! Worker and in-flight limits for batch ingestion.

use log::info;
use serde::{Deserialize, Serialize};

/// Whole files are held in memory while in flight, so `inflight_files`
/// bounds peak memory at roughly `inflight_files * largest file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelismProfile {
    pub worker_count: usize,
    pub inflight_files: usize,
}

impl Default for ParallelismProfile {
    fn default() -> Self {
        Self::single_threaded()
    }
}

impl ParallelismProfile {
    pub fn single_threaded() -> Self {
        Self { worker_count: 1, inflight_files: 1 }
    }

    /// Zero values are raised to one.
    pub fn new(worker_count: usize, inflight_files: usize) -> Self {
        Self {
            worker_count: worker_count.max(1),
            inflight_files: inflight_files.max(1),
        }
    }

    /// Size the pool from the host: one worker per core minus one, and as
    /// many in-flight files of `max_file_size` as fit in `mem_fraction` of
    /// available memory, capped at `hard_cap`.
    pub fn dynamic(max_file_size: u64, mem_fraction: f64, hard_cap: usize) -> Self {
        let cores = num_cpus::get();
        let worker_count = cores.saturating_sub(1).max(1);

        let mut sys = sysinfo::System::new();
        sys.refresh_memory();
        let avail_bytes = sys.available_memory();

        let budget = (avail_bytes as f64 * mem_fraction.clamp(0.0, 1.0)) as u64;
        let max_files = budget / max_file_size.max(1);
        let inflight_files = (max_files.min(hard_cap as u64) as usize).max(1);

        info!(
            "[PROFILE] cores={cores} worker_count={worker_count} inflight_files={inflight_files} (available {} MiB)",
            avail_bytes / (1024 * 1024)
        );
        Self { worker_count, inflight_files }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_never_yields_zero() {
        assert_eq!(ParallelismProfile::new(0, 0), ParallelismProfile::single_threaded());
    }

    #[test]
    fn dynamic_respects_hard_cap() {
        let p = ParallelismProfile::dynamic(1, 0.5, 3);
        assert!(p.worker_count >= 1);
        assert!((1..=3).contains(&p.inflight_files));
    }
}
