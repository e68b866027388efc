/// Default thresholds when no threshold file exists or it cannot be parsed.
pub const DEFAULT_ENTROPY_THRESHOLD: f64 = 3.5;
pub const DEFAULT_SIZE_THRESHOLD: u64 = 5_000_000;

/// Upper bound of Shannon entropy in bits per byte.
pub const MAX_ENTROPY: f64 = 8.0;

/// Fixed cut-offs of the selection rules (the tunable pair lives in
/// `ThresholdConfig`).
pub mod rules {
    /// Above this entropy data is stored verbatim.
    pub const SKIP_ENTROPY: f64 = 7.5;
    /// Files strictly smaller than this go to gzip.
    pub const SMALL_FILE_LIMIT: u64 = 1_000;
    /// Inclusive upper bound of the mid-size band.
    pub const MID_SIZE_MAX: u64 = 100_000;
    /// Mid-size files under this entropy go to bz2.
    pub const MID_SIZE_LOW_ENTROPY: f64 = 2.5;
    /// Highly repetitive data goes to lzma.
    pub const REPETITIVE_ENTROPY: f64 = 1.5;
}

/// Number of leading bytes inspected by the text sniffer.
pub const TEXT_SAMPLE_LEN: usize = 1_000;

pub mod recalibration {
    /// Fewer observations than this leave thresholds untouched.
    pub const MIN_OBSERVATIONS: usize = 3;
    /// Entropy grid in tenths: 2.0, 2.1, ..., 5.0.
    pub const ENTROPY_GRID_TENTHS_MIN: u32 = 20;
    pub const ENTROPY_GRID_TENTHS_MAX: u32 = 50;
    /// Size grid in bytes (decimal megabytes).
    pub const SIZE_GRID: [u64; 4] = [1_000_000, 5_000_000, 10_000_000, 20_000_000];
    /// Smoothing: `new = RETAIN * old + ADOPT * median`.
    pub const SMOOTHING_RETAIN: f64 = 0.7;
    pub const SMOOTHING_ADOPT: f64 = 0.3;
    /// Default number of most recent records considered.
    pub const DEFAULT_WINDOW: usize = 500;
}

/// Conventional file layout under an engine root.
pub mod paths {
    pub const STORAGE_DIR: &str = "compressed";
    pub const CATALOG_FILE: &str = "smartzip_catalog.db";
    pub const THRESHOLDS_FILE: &str = "smartzip_thresholds.json";
    pub const DECISION_LOG_FILE: &str = "adaptive_log.jsonl";
    pub const THRESHOLD_HISTORY_FILE: &str = "threshold_history.jsonl";
}

/// Fallback MIME type for unrecognised content.
pub const DEFAULT_MIME: &str = "application/octet-stream";
