//! telemetry/mod.rs
//! Counters, stage timers and the immutable batch report built from them.

pub mod counters;
pub mod snapshot;
pub mod timers;

pub use counters::*;
pub use snapshot::*;
pub use timers::*;
