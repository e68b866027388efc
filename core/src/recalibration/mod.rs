//! recalibration/mod.rs
//! Learning threshold updates from past decisions.

pub mod grid;
pub mod recalibrator;
pub mod replay;
pub mod smoothing;
pub mod types;

pub use grid::*;
pub use recalibrator::*;
pub use replay::*;
pub use smoothing::*;
pub use types::*;
