use std::time::Duration;

/// Ring buffer of recent frame durations, for the debug overlay and the
/// periodic frame report.
#[derive(Debug)]
pub struct FrameStats {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn recorded(&self) -> &[Duration] {
        let count = if self.filled { self.capacity } else { self.index };
        &self.history[..count]
    }

    pub fn count(&self) -> usize {
        self.recorded().len()
    }

    pub fn average(&self) -> Duration {
        let recorded = self.recorded();
        if recorded.is_empty() {
            return Duration::ZERO;
        }
        recorded.iter().sum::<Duration>() / recorded.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Frames per second derived from the average, zero when nothing is recorded.
    pub fn fps(&self) -> f64 {
        let avg = self.average().as_secs_f64();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats_are_zero() {
        let stats = FrameStats::new(4);
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.average(), Duration::ZERO);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn tracks_history() {
        let mut stats = FrameStats::new(3);
        stats.record(Duration::from_millis(10));
        stats.record(Duration::from_millis(20));
        stats.record(Duration::from_millis(30));

        assert_eq!(stats.count(), 3);
        assert_eq!(stats.average(), Duration::from_millis(20));
        assert_eq!(stats.max(), Duration::from_millis(30));
        assert_eq!(stats.min(), Duration::from_millis(10));
        assert!((stats.fps() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn wraps_around() {
        let mut stats = FrameStats::new(2);
        stats.record(Duration::from_millis(10));
        stats.record(Duration::from_millis(20));
        stats.record(Duration::from_millis(30));

        assert_eq!(stats.count(), 2);
        assert_eq!(stats.average(), Duration::from_millis(25));
    }
}
