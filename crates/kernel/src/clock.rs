use std::time::{Duration, Instant};

/// Wall-clock stopwatch measuring one frame.
///
/// `start` marks the beginning of a frame, `stop` returns the time elapsed
/// since then. Stopping a clock that was never started yields zero.
#[derive(Debug, Default)]
pub struct Clock {
    started: Option<Instant>,
    last: Duration,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Time elapsed since `start`, without stopping.
    pub fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
    }

    pub fn stop(&mut self) -> Duration {
        self.last = self.elapsed();
        self.started = None;
        self.last
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Duration returned by the last `stop`.
    pub fn last(&self) -> Duration {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_is_zero() {
        let mut clock = Clock::new();
        assert_eq!(clock.stop(), Duration::ZERO);
        assert!(!clock.is_running());
    }

    #[test]
    fn stop_measures_wall_time() {
        let mut clock = Clock::new();
        let outer = Instant::now();
        clock.start();
        std::thread::sleep(Duration::from_millis(5));
        let measured = clock.stop();
        let bound = outer.elapsed();

        assert!(measured >= Duration::from_millis(5));
        assert!(measured <= bound);
        assert_eq!(clock.last(), measured);
    }

    #[test]
    fn restart_resets_origin() {
        let mut clock = Clock::new();
        clock.start();
        std::thread::sleep(Duration::from_millis(5));
        clock.start();
        assert!(clock.elapsed() < Duration::from_millis(5));
    }
}
