pub mod decision_log;
pub mod jsonl;
pub mod threshold_history;

pub use decision_log::*;
pub use jsonl::*;
pub use threshold_history::*;
