//! engine/ingest.rs
//! Single-file store and retrieval.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, NewEntry};
use crate::compression::{self, Algorithm};
use crate::engine::smartzip::SmartZip;
use crate::features::extract as extract_features;
use crate::recovery::LogRecord;
use crate::selector::Decision;
use crate::telemetry::{Stage, StageTimes};
use crate::types::{CatalogError, CatalogResult};
use crate::utils::sha256_hex;

/// Everything a successful store produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreOutcome {
    pub entry: CatalogEntry,
    pub blob_path: PathBuf,
    pub decision: Decision,
    pub comp_time: Duration,
}

fn base_name(path: &Path) -> CatalogResult<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CatalogError::Persistence(format!("{} has no usable file name", path.display())))
}

impl SmartZip {
    /// Read `path`, pick (or use the forced) algorithm, compress, store the
    /// blob and record the entry.
    pub fn store(&self, path: impl AsRef<Path>, algorithm: Option<Algorithm>) -> CatalogResult<StoreOutcome> {
        self.store_timed(path.as_ref(), algorithm, &mut StageTimes::default())
    }

    pub(crate) fn store_timed(
        &self,
        path: &Path,
        algorithm: Option<Algorithm>,
        times: &mut StageTimes,
    ) -> CatalogResult<StoreOutcome> {
        let file_name = base_name(path)?;
        let t = Instant::now();
        let data = fs::read(path).map_err(|e| CatalogError::io(path, e))?;
        times.add(Stage::Read, t.elapsed());
        self.store_bytes_timed(&file_name, &data, algorithm, times)
    }

    /// Store in-memory bytes under `file_name` (a base name).
    pub fn store_bytes(&self, file_name: &str, data: &[u8], algorithm: Option<Algorithm>) -> CatalogResult<StoreOutcome> {
        self.store_bytes_timed(file_name, data, algorithm, &mut StageTimes::default())
    }

    pub(crate) fn store_bytes_timed(
        &self,
        file_name: &str,
        data: &[u8],
        algorithm: Option<Algorithm>,
        times: &mut StageTimes,
    ) -> CatalogResult<StoreOutcome> {
        crate::storage::validate_file_name(file_name)?;

        let features = times.measure(Stage::Extract, || extract_features(file_name, data));

        let thresholds = self.thresholds.snapshot();
        let decision = times.measure(Stage::Select, || match algorithm {
            Some(forced) => Decision::forced(file_name, forced, features.clone(), &thresholds.config),
            None => Decision::decide(file_name, features.clone(), &thresholds.config),
        });
        self.catalog.record_decision(&decision)?;
        debug!(
            "[INGEST] {file_name}: entropy={:.3} size={} class={} -> {}{}",
            features.entropy,
            features.size,
            features.content_class,
            decision.algorithm,
            if decision.forced { " (forced)" } else { "" }
        );

        let t = Instant::now();
        let compressed = compression::compress(decision.algorithm, data)?;
        let comp_time = t.elapsed();
        times.add(Stage::Compress, comp_time);

        let t = Instant::now();
        let key = self.store.put(file_name, decision.algorithm, &compressed)?;
        times.add(Stage::Write, t.elapsed());

        let t = Instant::now();
        let new_entry = NewEntry::from_store(
            file_name,
            sha256_hex(data),
            &features,
            decision.algorithm,
            compressed.len() as u64,
        );
        let id = self.catalog.record(&new_entry)?;
        let entry = new_entry.into_entry(id);
        times.add(Stage::Record, t.elapsed());

        let record = LogRecord::from_outcome(
            &decision,
            entry.compressed_size,
            entry.compression_ratio,
            comp_time.as_secs_f64(),
        );
        if let Err(e) = self.decision_log.append(&record) {
            warn!("[DECISION-LOG] append for {file_name} failed: {e}");
        }

        info!(
            "[INGEST] stored id={} {} as {} ({} -> {} bytes, ratio {:.3})",
            entry.id, file_name, entry.algorithm, entry.original_size, entry.compressed_size, entry.compression_ratio
        );

        self.after_decision();

        Ok(StoreOutcome {
            blob_path: self.store.path_for(&key),
            entry,
            decision,
            comp_time,
        })
    }

    /// Decompress the entry named by `id_or_name` into `out_path`.
    /// Nothing is written unless the bytes match the recorded hash.
    pub fn get(&self, id_or_name: &str, out_path: impl AsRef<Path>) -> CatalogResult<PathBuf> {
        let out_path = out_path.as_ref();
        let (entry, data) = self.fetch(id_or_name)?;
        fs::write(out_path, &data).map_err(|e| CatalogError::io(out_path, e))?;
        info!("[RESTORE] id={} {} -> {}", entry.id, entry.file_name, out_path.display());
        Ok(out_path.to_path_buf())
    }

    /// Look up and decode an entry in memory.
    pub fn fetch(&self, id_or_name: &str) -> CatalogResult<(CatalogEntry, Vec<u8>)> {
        let entry = self.catalog.lookup(id_or_name)?;
        let data = self.fetch_entry(&entry, &mut StageTimes::default())?;
        Ok((entry, data))
    }

    pub(crate) fn fetch_entry(&self, entry: &CatalogEntry, times: &mut StageTimes) -> CatalogResult<Vec<u8>> {
        let key = entry.storage_key()?;

        let t = Instant::now();
        let blob = self.store.get(&key)?;
        times.add(Stage::Read, t.elapsed());

        let data = times.measure(Stage::Decompress, || compression::decompress(entry.algorithm, &blob))?;

        let actual = times.measure(Stage::Verify, || sha256_hex(&data));
        if actual != entry.content_hash {
            return Err(CatalogError::DecodeMismatch {
                file_name: entry.file_name.clone(),
                expected: entry.content_hash.clone(),
                actual,
            });
        }
        Ok(data)
    }
}
