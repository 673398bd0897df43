use std::collections::BTreeMap;
use std::time::Duration;

/// Identifier of a timer registered with a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// How many times a timer fires before it is retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Times(u32),
    Infinity,
}

/// A named timer firing every `frequency`.
///
/// Timers are not scheduled on their own: they advance by the frame time
/// passed to [`World::update`] and fire at most once per update.
#[derive(Debug, Clone)]
pub struct Timer {
    name: String,
    frequency: Duration,
    repeat: Repeat,
    elapsed: Duration,
    fired: u32,
}

impl Timer {
    pub fn new(name: impl Into<String>, frequency: Duration, repeat: Repeat) -> Self {
        Self {
            name: name.into(),
            frequency,
            repeat,
            elapsed: Duration::ZERO,
            fired: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Duration {
        self.frequency
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Number of times this timer has fired.
    pub fn fired(&self) -> u32 {
        self.fired
    }

    pub fn is_finished(&self) -> bool {
        match self.repeat {
            Repeat::Once => self.fired >= 1,
            Repeat::Times(n) => self.fired >= n,
            Repeat::Infinity => false,
        }
    }

    /// Advance by `dt`; returns true when the timer fires.
    fn advance(&mut self, dt: Duration) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed < self.frequency {
            return false;
        }
        self.elapsed -= self.frequency;
        // No catch-up bursts after a long frame.
        if self.elapsed >= self.frequency {
            self.elapsed = Duration::ZERO;
        }
        self.fired += 1;
        true
    }
}

/// Aggregates the timers of a session and advances them once per frame.
#[derive(Debug, Default)]
pub struct World {
    timers: BTreeMap<TimerId, Timer>,
    next_id: u64,
    frame: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `update` calls so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn add_timer(&mut self, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        tracing::debug!(id = id.0, name = timer.name(), "timer registered");
        self.timers.insert(id, timer);
        id
    }

    pub fn remove_timer(&mut self, id: TimerId) -> Option<Timer> {
        self.timers.remove(&id)
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.get(&id)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Advance every timer by `dt` and return the ones that fired, in id order.
    ///
    /// Timers that have used up their repeats are dropped afterwards.
    pub fn update(&mut self, dt: Duration) -> Vec<TimerId> {
        self.frame += 1;
        let fired: Vec<TimerId> = self
            .timers
            .iter_mut()
            .filter_map(|(id, timer)| timer.advance(dt).then_some(*id))
            .collect();

        self.timers.retain(|id, timer| {
            let keep = !timer.is_finished();
            if !keep {
                tracing::trace!(id = id.0, name = timer.name(), "timer retired");
            }
            keep
        });
        fired
    }
}
