//! Wall-clock timestamps for profiling kernels in the field.

use chrono::Utc;
use tracing::debug;

/// Nanoseconds since the Unix epoch, saturating at the `u64` range.
pub fn timestamp_ns() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .map_or(0, |nanos| u64::try_from(nanos).unwrap_or(0))
}

/// Measures one interval between [`start`](Self::start) and
/// [`stop`](Self::stop).
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    label: &'static str,
    started: u64,
}

impl Stopwatch {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            started: timestamp_ns(),
        }
    }

    /// Elapsed nanoseconds; zero if the clock stepped backwards.
    pub fn stop(self) -> u64 {
        let elapsed = timestamp_ns().saturating_sub(self.started);
        debug!(label = self.label, elapsed_ns = elapsed, "stopwatch");
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_after_2020() {
        assert!(timestamp_ns() > 1_577_836_800_000_000_000);
    }

    #[test]
    fn test_stopwatch_measures_work() {
        let watch = Stopwatch::start("sleep");
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(watch.stop() >= 1_000_000);
    }
}
