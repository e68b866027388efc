//! smartzip-core
//!
//! Adaptive compression catalog: per-file algorithm selection from entropy
//! and size, content-addressed blob storage, a SQLite metadata catalog and
//! closed-loop threshold recalibration.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;
pub mod types;
pub mod utils;

// Leaves
pub mod compression;
pub mod features;
pub mod selector;
pub mod storage;
pub mod telemetry;

// Persistence and learning
pub mod catalog;
pub mod recalibration;
pub mod recovery;
pub mod scheduler;

// Facade
pub mod engine;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::catalog::{CatalogEntry, CatalogStats, MetadataCatalog, QueryFilter};
    pub use crate::compression::{Algorithm, CompressionError};
    pub use crate::config::EngineConfig;
    pub use crate::engine::{BackfillMode, ParallelismProfile, SmartZip, StoreOutcome};
    pub use crate::features::{ContentClass, FeatureVector};
    pub use crate::recalibration::{RecalibrationOutcome, Strategy};
    pub use crate::scheduler::RecalibrationPolicy;
    pub use crate::selector::{Decision, ThresholdConfig};
    pub use crate::telemetry::{BatchReport, ItemStatus};
    pub use crate::types::{CatalogError, CatalogResult};
}
