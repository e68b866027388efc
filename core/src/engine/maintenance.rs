//! engine/maintenance.rs
//! Catalog upkeep: entropy backfill and aggregate statistics.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, CatalogStats, QueryFilter};
use crate::engine::smartzip::SmartZip;
use crate::features::shannon_entropy;
use crate::telemetry::{BatchReport, IngestCounters, ItemOutcome, Stage, StageTimes, TelemetryTimer};
use crate::types::CatalogResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackfillMode {
    /// Rows whose entropy is NULL.
    Missing,
    /// Recompute every row.
    All,
    /// List rows with missing entropy; change nothing.
    CheckOnly,
}

impl SmartZip {
    /// Recompute entropy from stored blobs. Only the entropy column changes.
    /// Rows whose blob is gone are skipped; rows with an unknown algorithm
    /// and decode failures are counted as failed. None of them abort the run.
    pub fn backfill_entropy(&self, mode: BackfillMode) -> CatalogResult<BatchReport> {
        let mut timer = TelemetryTimer::new();
        let rows = match mode {
            BackfillMode::Missing | BackfillMode::CheckOnly => self.catalog.scan_missing_entropy()?,
            BackfillMode::All => self.catalog.scan_query(&QueryFilter::default())?,
        };
        info!("[BACKFILL] {:?}: {} row(s) selected", mode, rows.len());

        let mut counters = IngestCounters::default();
        let mut items = Vec::with_capacity(rows.len());

        for row in &rows {
            let entry = match row {
                Ok(entry) => entry,
                Err(bad) => {
                    let e = bad.error();
                    error!("[BACKFILL] id={} {}: {e}", bad.id, bad.file_name);
                    counters.add_failed();
                    items.push(ItemOutcome::failed(bad.id.to_string(), e.to_string()));
                    continue;
                }
            };
            let label = entry.id.to_string();
            if mode == BackfillMode::CheckOnly {
                counters.add_skipped();
                items.push(
                    ItemOutcome::skipped(label, format!("{} ({}) has no entropy", entry.file_name, entry.algorithm)),
                );
                continue;
            }
            let outcome = self.backfill_one(entry, &mut counters, &mut timer.stage_times);
            items.push(outcome);
        }

        timer.finish();
        let report = BatchReport::from(counters, &timer, items);
        info!(
            "[BACKFILL] done: {} updated, {} skipped, {} failed",
            report.succeeded(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }

    fn backfill_one(&self, entry: &CatalogEntry, counters: &mut IngestCounters, times: &mut StageTimes) -> ItemOutcome {
        let label = entry.id.to_string();
        let key = match entry.storage_key() {
            Ok(k) => k,
            Err(e) => {
                error!("[BACKFILL] id={label}: {e}");
                counters.add_failed();
                return ItemOutcome::failed(label, e.to_string());
            }
        };

        let blob = match self.store.get(&key) {
            Ok(b) => b,
            Err(e) if e.is_skippable() => {
                warn!("[BACKFILL] skipping id={label}: {e}");
                counters.add_skipped();
                return ItemOutcome::skipped(label, e.to_string());
            }
            Err(e) => {
                error!("[BACKFILL] id={label}: {e}");
                counters.add_failed();
                return ItemOutcome::failed(label, e.to_string());
            }
        };

        let data = match times.measure(Stage::Decompress, || crate::compression::decompress(entry.algorithm, &blob)) {
            Ok(d) => d,
            Err(e) => {
                error!("[BACKFILL] id={label}: {e}");
                counters.add_failed();
                return ItemOutcome::failed(label, e.to_string());
            }
        };

        let entropy = times.measure(Stage::Extract, || shannon_entropy(&data));
        let updated = times.measure(Stage::Record, || self.catalog.update_entropy(entry.id, entropy));
        match updated {
            Ok(()) => {
                info!("[BACKFILL] id={label} {} -> entropy={entropy:.3}", entry.file_name);
                counters.add_success(entry.algorithm, data.len() as u64, blob.len() as u64);
                ItemOutcome::stored(label, entry.algorithm, entry.id)
                    .with_message(format!("entropy={entropy:.6}"))
            }
            Err(e) => {
                error!("[BACKFILL] id={label}: {e}");
                counters.add_failed();
                ItemOutcome::failed(label, e.to_string())
            }
        }
    }

    pub fn catalog_stats(&self) -> CatalogResult<CatalogStats> {
        self.catalog.stats()
    }
}
