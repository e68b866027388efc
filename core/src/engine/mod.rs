//! engine/mod.rs
//! The `SmartZip` facade and its ingest, batch and maintenance paths.

pub mod ingest;
pub mod maintenance;
pub mod parallelism;
pub mod pipeline;
pub mod smartzip;

pub use ingest::StoreOutcome;
pub use maintenance::BackfillMode;
pub use parallelism::ParallelismProfile;
pub use smartzip::SmartZip;
