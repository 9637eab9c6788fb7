/// Fetch counters shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchMetrics {
    pub applied: usize,
    pub failed: usize,
    pub stale: usize,
}

#[derive(Debug, Default)]
pub struct MetricsRecorder {
    inner: FetchMetrics,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_applied(&mut self) {
        self.inner.applied += 1;
    }

    pub fn record_failed(&mut self) {
        self.inner.failed += 1;
    }

    pub fn record_stale(&mut self) {
        self.inner.stale += 1;
    }

    pub fn snapshot(&self) -> FetchMetrics {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_recorded_events() {
        let mut metrics = MetricsRecorder::new();
        metrics.record_applied();
        metrics.record_applied();
        metrics.record_stale();
        assert_eq!(
            metrics.snapshot(),
            FetchMetrics {
                applied: 2,
                failed: 0,
                stale: 1
            }
        );
    }
}
