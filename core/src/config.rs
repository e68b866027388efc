//! config.rs
//! Engine configuration: file layout, recalibration policy, parallelism.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::paths;
use crate::engine::ParallelismProfile;
use crate::scheduler::RecalibrationPolicy;
use crate::types::{CatalogError, CatalogResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding the compressed blobs.
    pub storage_root: PathBuf,
    pub catalog_path: PathBuf,
    pub thresholds_path: PathBuf,
    pub decision_log_path: PathBuf,
    pub threshold_history_path: PathBuf,
    pub recalibration: RecalibrationPolicy,
    pub parallelism: ParallelismProfile,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::under(".")
    }
}

impl EngineConfig {
    /// Conventional layout rooted at `root`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            storage_root: root.join(paths::STORAGE_DIR),
            catalog_path: root.join(paths::CATALOG_FILE),
            thresholds_path: root.join(paths::THRESHOLDS_FILE),
            decision_log_path: root.join(paths::DECISION_LOG_FILE),
            threshold_history_path: root.join(paths::THRESHOLD_HISTORY_FILE),
            recalibration: RecalibrationPolicy::default(),
            parallelism: ParallelismProfile::default(),
        }
    }

    /// Load from JSON; omitted fields take their `under(".")` defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| CatalogError::Persistence(format!("invalid config {}: {e}", path.display())))
    }

    pub fn with_recalibration(mut self, policy: RecalibrationPolicy) -> Self {
        self.recalibration = policy;
        self
    }

    pub fn with_parallelism(mut self, profile: ParallelismProfile) -> Self {
        self.parallelism = profile;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recalibration::Strategy;

    #[test]
    fn under_uses_conventional_names() {
        let cfg = EngineConfig::under("/srv/sz");
        assert_eq!(cfg.storage_root, PathBuf::from("/srv/sz/compressed"));
        assert_eq!(cfg.catalog_path, PathBuf::from("/srv/sz/smartzip_catalog.db"));
        assert_eq!(cfg.thresholds_path, PathBuf::from("/srv/sz/smartzip_thresholds.json"));
        assert_eq!(cfg.decision_log_path, PathBuf::from("/srv/sz/adaptive_log.jsonl"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(
            &path,
            r#"{"storage_root": "/blobs", "recalibration": {"every_k_decisions": 50, "window": 200, "strategy": "smoothing"}}"#,
        )
        .unwrap();
        let cfg = EngineConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.storage_root, PathBuf::from("/blobs"));
        assert_eq!(cfg.recalibration.every_k_decisions, Some(50));
        assert_eq!(cfg.recalibration.strategy, Strategy::Smoothing);
        assert_eq!(cfg.parallelism, ParallelismProfile::single_threaded());
    }
}
