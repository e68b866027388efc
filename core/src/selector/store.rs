//! selector/store.rs
//! Process-wide holder of the current thresholds.
//!
//! Readers clone an `Arc<ThresholdSnapshot>` and always see a consistent
//! pair. Installs are serialized, persisted first, then swapped in whole.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};
use parking_lot::{Mutex, RwLock};

use crate::recovery::ThresholdHistory;
use crate::selector::thresholds::{ThresholdConfig, ThresholdSnapshot};
use crate::types::{CatalogError, CatalogResult};
use crate::utils::unix_timestamp;

#[derive(Debug)]
pub struct ThresholdStore {
    current: RwLock<Arc<ThresholdSnapshot>>,
    install_lock: Mutex<()>,
    path: Option<PathBuf>,
    history: Option<ThresholdHistory>,
}

impl ThresholdStore {
    /// Holder with no backing file; installs only affect this process.
    pub fn in_memory(config: ThresholdConfig) -> Self {
        Self::with_initial(config, None, None)
    }

    /// Load thresholds from `path` (defaults when absent or malformed).
    pub fn open(path: impl Into<PathBuf>, history: Option<ThresholdHistory>) -> Self {
        let path = path.into();
        let config = ThresholdConfig::load_or_default(&path);
        info!(
            "[THRESHOLDS] loaded entropy_threshold={:.3} size_threshold={} from {}",
            config.entropy_threshold,
            config.size_threshold,
            path.display()
        );
        Self::with_initial(config, Some(path), history)
    }

    fn with_initial(config: ThresholdConfig, path: Option<PathBuf>, history: Option<ThresholdHistory>) -> Self {
        let snapshot = ThresholdSnapshot { config, version: 0, installed_at: unix_timestamp() };
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            install_lock: Mutex::new(()),
            path,
            history,
        }
    }

    pub fn snapshot(&self) -> Arc<ThresholdSnapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn current(&self) -> ThresholdConfig {
        self.current.read().config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn history(&self) -> Option<&ThresholdHistory> {
        self.history.as_ref()
    }

    /// Persist `config`, swap it in, then append it to the history.
    ///
    /// A failed save leaves the previous snapshot in place. A failed history
    /// append is only logged: the new thresholds are already live.
    pub fn install(
        &self,
        config: ThresholdConfig,
        source: &str,
        confidence: Option<f64>,
    ) -> CatalogResult<Arc<ThresholdSnapshot>> {
        if !config.is_valid() {
            return Err(CatalogError::Persistence(format!(
                "refusing to install invalid thresholds: entropy_threshold={}",
                config.entropy_threshold
            )));
        }

        let _guard = self.install_lock.lock();
        if let Some(path) = &self.path {
            config.save(path)?;
        }

        let installed_at = unix_timestamp();
        let next = {
            let mut current = self.current.write();
            let next = Arc::new(ThresholdSnapshot {
                config,
                version: current.version + 1,
                installed_at,
            });
            *current = Arc::clone(&next);
            next
        };

        info!(
            "[THRESHOLDS] installed v{} entropy_threshold={:.3} size_threshold={} ({source})",
            next.version, config.entropy_threshold, config.size_threshold
        );

        if let Some(history) = &self.history {
            if let Err(e) = history.append(&config, installed_at, source, confidence) {
                warn!("[THRESHOLDS] history append failed: {e}");
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_bumps_version_and_swaps_whole_pair() {
        let store = ThresholdStore::in_memory(ThresholdConfig::default());
        let before = store.snapshot();
        let after = store.install(ThresholdConfig::new(4.1, 10_000_000), "operator", None).unwrap();
        assert_eq!(after.version, before.version + 1);
        assert_eq!(store.current(), ThresholdConfig::new(4.1, 10_000_000));
        // old readers keep their snapshot
        assert_eq!(before.config, ThresholdConfig::default());
    }

    #[test]
    fn invalid_config_is_rejected_and_nothing_changes() {
        let store = ThresholdStore::in_memory(ThresholdConfig::default());
        assert!(store.install(ThresholdConfig::new(f64::NAN, 1), "operator", None).is_err());
        assert_eq!(store.snapshot().version, 0);
    }
}
