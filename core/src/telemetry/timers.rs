//! telemetry/timers.rs
//! Per-stage durations for store, retrieval and maintenance runs.

use std::collections::{hash_map, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Read,
    Extract,
    Select,
    Compress,
    Write,
    Record,
    Decompress,
    Verify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read       => "read",
            Stage::Extract    => "extract",
            Stage::Select     => "select",
            Stage::Compress   => "compress",
            Stage::Write      => "write",
            Stage::Record     => "record",
            Stage::Decompress => "decompress",
            Stage::Verify     => "verify",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: HashMap<Stage, Duration>,
}

impl StageTimes {
    /// Accumulates if the stage is already present.
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_insert(Duration::ZERO) += dur;
    }

    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or(Duration::ZERO)
    }

    pub fn total(&self) -> Duration {
        self.times.values().copied().sum()
    }

    pub fn merge(&mut self, other: &StageTimes) {
        for (stage, dur) in &other.times {
            self.add(*stage, *dur);
        }
    }

    /// Time `f` and charge it to `stage`.
    pub fn measure<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.add(stage, t.elapsed());
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stage, &Duration)> {
        self.times.iter()
    }
}

impl<'a> IntoIterator for &'a StageTimes {
    type Item = (&'a Stage, &'a Duration);
    type IntoIter = hash_map::Iter<'a, Stage, Duration>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

/// Wall clock for one run plus its accumulated stage times.
#[derive(Clone, Debug)]
pub struct TelemetryTimer {
    pub start_time: Instant,
    pub end_time: Option<Instant>,
    pub stage_times: StageTimes,
}

impl Default for TelemetryTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTimer {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            stage_times: StageTimes::default(),
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_times_accumulate_and_merge() {
        let mut a = StageTimes::default();
        a.add(Stage::Compress, Duration::from_millis(3));
        a.add(Stage::Compress, Duration::from_millis(2));
        let mut b = StageTimes::default();
        b.add(Stage::Read, Duration::from_millis(1));
        a.merge(&b);
        assert_eq!(a.get(Stage::Compress), Duration::from_millis(5));
        assert_eq!(a.total(), Duration::from_millis(6));
        assert_eq!(a.get(Stage::Verify), Duration::ZERO);
    }

    #[test]
    fn measure_returns_closure_value() {
        let mut t = StageTimes::default();
        assert_eq!(t.measure(Stage::Extract, || 41 + 1), 42);
        assert_eq!(t.iter().count(), 1);
    }
}
