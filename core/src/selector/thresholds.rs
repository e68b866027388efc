//! selector/thresholds.rs
//! The tunable entropy/size cut-offs and their JSON file.

use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENTROPY_THRESHOLD, DEFAULT_SIZE_THRESHOLD};
use crate::storage::atomic_write;
use crate::types::CatalogResult;

/// `{entropy_threshold, size_threshold}`; both fields always present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub entropy_threshold: f64,
    /// Bytes.
    pub size_threshold: u64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            size_threshold: DEFAULT_SIZE_THRESHOLD,
        }
    }
}

impl ThresholdConfig {
    pub fn new(entropy_threshold: f64, size_threshold: u64) -> Self {
        Self { entropy_threshold, size_threshold }
    }

    pub fn is_valid(&self) -> bool {
        self.entropy_threshold.is_finite() && self.entropy_threshold >= 0.0
    }

    /// Lenient parse of the threshold file: extra fields are ignored and an
    /// integral float is accepted for `size_threshold`. `None` when either
    /// field is missing or not a usable number.
    pub fn parse(text: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(text).ok()?;
        let entropy_threshold = value.get("entropy_threshold")?.as_f64()?;
        let size = value.get("size_threshold")?;
        let size_threshold = size.as_u64().or_else(|| {
            size.as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u64)
        })?;
        let config = Self { entropy_threshold, size_threshold };
        config.is_valid().then_some(config)
    }

    /// Load the threshold file, falling back to defaults when it is absent or
    /// unreadable. Never surfaces an error to the caller.
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match Self::parse(&text) {
                Some(config) => config,
                None => {
                    warn!("[THRESHOLDS] {} is malformed, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("[THRESHOLDS] {} not found, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("[THRESHOLDS] cannot read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Persist as pretty JSON via write-then-rename.
    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        let json = serde_json::to_vec_pretty(self)?;
        atomic_write(path, &json)
    }
}

/// One installed configuration. `version` increases with every install in
/// this process; `installed_at` is Unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSnapshot {
    pub config: ThresholdConfig,
    pub version: u64,
    pub installed_at: f64,
}
