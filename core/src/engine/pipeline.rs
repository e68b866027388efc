//! engine/pipeline.rs
//! Batch ingestion on a bounded worker pool.
//!
//! feeder ──(bounded jobs)──▶ N workers ──(bounded outcomes)──▶ collector
//!
//! Each worker keeps its own counters and stage times; they are merged once
//! the scope ends. Per-file errors are logged and counted, never fatal.

use std::path::Path;
use std::thread;

use crossbeam::channel::bounded;
use log::{debug, error, info, warn};

use crate::engine::smartzip::SmartZip;
use crate::telemetry::{BatchReport, IngestCounters, ItemOutcome, StageTimes, TelemetryTimer};

impl SmartZip {
    /// Store every path with rule-chain selection. Outcomes are reported in
    /// input order.
    pub fn store_batch<P>(&self, paths: &[P]) -> BatchReport
    where
        P: AsRef<Path> + Sync,
    {
        let mut timer = TelemetryTimer::new();
        let profile = &self.config.parallelism;
        let workers = profile.worker_count.clamp(1, paths.len().max(1));
        let inflight = profile.inflight_files.max(1);
        info!("[INGEST] batch of {} file(s) on {workers} worker(s), {inflight} in flight", paths.len());

        let (job_tx, job_rx) = bounded::<(usize, &Path)>(inflight);
        let (out_tx, out_rx) = bounded::<(usize, ItemOutcome)>(inflight);

        let (counters, stage_times, mut items) = thread::scope(|scope| {
            // ---- Feeder ----
            scope.spawn(move || {
                for (index, path) in paths.iter().enumerate() {
                    if job_tx.send((index, path.as_ref())).is_err() {
                        warn!("[INGEST] all workers gone, stopping feeder at item {index}");
                        break;
                    }
                }
            });

            // ---- Workers ----
            let handles: Vec<_> = (0..workers)
                .map(|i| {
                    let rx = job_rx.clone();
                    let tx = out_tx.clone();
                    scope.spawn(move || {
                        debug!("[WORKER-{i}] starting");
                        let mut counters = IngestCounters::default();
                        let mut times = StageTimes::default();
                        for (index, path) in rx.iter() {
                            let outcome = self.batch_item(path, &mut counters, &mut times);
                            if tx.send((index, outcome)).is_err() {
                                break;
                            }
                        }
                        debug!("[WORKER-{i}] finished");
                        (counters, times)
                    })
                })
                .collect();
            drop(job_rx);
            drop(out_tx);

            // ---- Collector ----
            let items: Vec<(usize, ItemOutcome)> = out_rx.iter().collect();

            let mut counters = IngestCounters::default();
            let mut times = StageTimes::default();
            for handle in handles {
                match handle.join() {
                    Ok((c, t)) => {
                        counters.merge(&c);
                        times.merge(&t);
                    }
                    Err(_) => error!("[INGEST] a worker panicked; its in-flight item is lost"),
                }
            }
            (counters, times, items)
        });

        items.sort_by_key(|(index, _)| *index);
        timer.stage_times.merge(&stage_times);
        timer.finish();

        let report = BatchReport::from(counters, &timer, items.into_iter().map(|(_, o)| o).collect());
        info!(
            "[INGEST] batch done: {} stored, {} skipped, {} failed, ratio {:.3}",
            report.succeeded(),
            report.skipped(),
            report.failed(),
            report.compression_ratio
        );
        report
    }

    fn batch_item(&self, path: &Path, counters: &mut IngestCounters, times: &mut StageTimes) -> ItemOutcome {
        let label = path.display().to_string();
        match self.store_timed(path, None, times) {
            Ok(out) => {
                counters.add_success(out.entry.algorithm, out.entry.original_size, out.entry.compressed_size);
                ItemOutcome::stored(label, out.entry.algorithm, out.entry.id)
            }
            Err(e) if e.is_skippable() => {
                warn!("[INGEST] skipped {label}: {e}");
                counters.add_skipped();
                ItemOutcome::skipped(label, e.to_string())
            }
            Err(e) => {
                error!("[INGEST] failed {label}: {e}");
                counters.add_failed();
                ItemOutcome::failed(label, e.to_string())
            }
        }
    }
}
