//! selector/mod.rs
//! Algorithm selection: the rule chain, the decision record and the
//! current-thresholds holder.

pub mod decision;
pub mod rules;
pub mod store;
pub mod thresholds;

pub use decision::*;
pub use rules::*;
pub use store::*;
pub use thresholds::*;
