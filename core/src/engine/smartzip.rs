//! engine/smartzip.rs
//! The `SmartZip` facade: owns every component and wires the control flow
//! extract → select → compress → store → record → recalibrate.

use std::sync::Arc;

use log::{info, warn};

use crate::catalog::{CatalogEntry, MetadataCatalog, QueryFilter};
use crate::config::EngineConfig;
use crate::recalibration::{RecalibrationOutcome, Recalibrator, Strategy};
use crate::recovery::{DecisionLog, ThresholdHistory, ThresholdHistoryRecord};
use crate::scheduler::RecalibrationTrigger;
use crate::selector::{Decision, ThresholdConfig, ThresholdSnapshot, ThresholdStore};
use crate::storage::ContentStore;
use crate::types::CatalogResult;

/// One catalog instance. Shareable across threads; every method takes `&self`.
#[derive(Debug)]
pub struct SmartZip {
    pub(crate) config: EngineConfig,
    pub(crate) store: ContentStore,
    pub(crate) catalog: MetadataCatalog,
    pub(crate) thresholds: ThresholdStore,
    pub(crate) decision_log: DecisionLog,
    pub(crate) trigger: RecalibrationTrigger,
}

impl SmartZip {
    /// Open (creating where absent) the blob directory, catalog, threshold
    /// file and logs named by `config`. Safe to call repeatedly.
    pub fn open(config: EngineConfig) -> CatalogResult<Self> {
        let store = ContentStore::open(&config.storage_root)?;
        let catalog = MetadataCatalog::open(&config.catalog_path)?;
        let history = ThresholdHistory::new(&config.threshold_history_path);
        let thresholds = ThresholdStore::open(&config.thresholds_path, Some(history));
        let decision_log = DecisionLog::new(&config.decision_log_path);
        let trigger = RecalibrationTrigger::new(&config.recalibration);

        info!(
            "[ENGINE] ready: storage={} catalog={} recalibration every {:?} decision(s)",
            config.storage_root.display(),
            config.catalog_path.display(),
            config.recalibration.every_k_decisions
        );
        Ok(Self { config, store, catalog, thresholds, decision_log, trigger })
    }

    /// `open(EngineConfig::under(root))`
    pub fn open_under(root: impl AsRef<std::path::Path>) -> CatalogResult<Self> {
        Self::open(EngineConfig::under(root))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    pub fn content_store(&self) -> &ContentStore {
        &self.store
    }

    pub fn threshold_store(&self) -> &ThresholdStore {
        &self.thresholds
    }

    pub fn decision_log(&self) -> &DecisionLog {
        &self.decision_log
    }

    pub fn query(&self, filter: &QueryFilter) -> CatalogResult<Vec<CatalogEntry>> {
        self.catalog.query(filter)
    }

    pub fn lookup(&self, id_or_name: &str) -> CatalogResult<CatalogEntry> {
        self.catalog.lookup(id_or_name)
    }

    /// The most recent `window` decisions from the catalog, oldest first.
    pub fn decisions(&self, window: usize) -> CatalogResult<Vec<Decision>> {
        self.catalog.decisions(window)
    }

    pub fn thresholds(&self) -> Arc<ThresholdSnapshot> {
        self.thresholds.snapshot()
    }

    /// Operator override: install and persist `config` as-is.
    pub fn set_thresholds(&self, config: ThresholdConfig) -> CatalogResult<Arc<ThresholdSnapshot>> {
        self.thresholds.install(config, "operator", None)
    }

    pub fn threshold_history(&self) -> CatalogResult<Vec<ThresholdHistoryRecord>> {
        match self.thresholds.history() {
            Some(history) => history.load(),
            None => Ok(Vec::new()),
        }
    }

    /// Delete the threshold history file. Returns whether one existed.
    pub fn reset_threshold_history(&self) -> CatalogResult<bool> {
        match self.thresholds.history() {
            Some(history) => history.reset(),
            None => Ok(false),
        }
    }

    /// Recalibrate over the last `window` records (policy window when `None`).
    pub fn recalibrate(&self, window: Option<usize>, strategy: Strategy) -> CatalogResult<RecalibrationOutcome> {
        let window = window.unwrap_or(self.config.recalibration.window);
        Recalibrator::new(&self.thresholds)
            .with_log(&self.decision_log)
            .with_catalog(&self.catalog)
            .run(window, strategy)
    }

    /// Count one recorded decision and recalibrate when the policy says so.
    /// Failures are logged; the store that triggered it has already succeeded.
    pub(crate) fn after_decision(&self) {
        if !self.trigger.observe() {
            return;
        }
        let policy = &self.config.recalibration;
        info!("[ENGINE] {} decisions recorded, recalibrating", self.trigger.observed());
        if let Err(e) = self.recalibrate(Some(policy.window), policy.strategy) {
            warn!("[RECALIBRATE] automatic recalibration failed: {e}");
        }
    }
}
