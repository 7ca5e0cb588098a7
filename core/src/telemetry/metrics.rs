use std::sync::Mutex;

/// Thread-safe counters for transformed frames and rejected runs.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    frames: usize,
    failures: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                frames: 0,
                failures: 0,
            }),
        }
    }

    pub fn record_frames(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.frames += count;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
        }
    }

    /// `(frames transformed, failed runs)`
    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.frames, metrics.failures)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_frames(3);
        metrics.record_frames(2);
        metrics.record_failure();
        assert_eq!(metrics.snapshot(), (5, 1));
    }
}
