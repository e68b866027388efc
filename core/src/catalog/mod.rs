//! catalog/mod.rs
//! Durable index of stored entries and selection decisions.

pub mod entry;
pub mod filter;
pub mod schema;
pub mod stats;
pub mod store;

pub use entry::{CatalogEntry, NewEntry, UndecodableRow};
pub use filter::QueryFilter;
pub use schema::SCHEMA_VERSION;
pub use stats::{AlgorithmStats, CatalogStats};
pub use store::{MetadataCatalog, ScannedRow};
