//! Frame timing: the [`Time`] resource and the clocks that feed it.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Frame timing resource, refreshed by [`Core`](crate::Core) before each update tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    delta: Duration,
    elapsed: Duration,
    frame_count: u64,
}

impl Time {
    /// Time between the previous tick and this one.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Time since startup finished.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Number of update ticks started so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }
}

/// A monotonic time source.
pub trait Clock {
    /// Time since the clock's own origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same reading.
///
/// ```
/// use std::time::Duration;
/// use orbit_ecs::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_millis(16));
/// assert_eq!(clock.now(), Duration::from_millis(16));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    reading: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, reading: Duration) {
        self.reading.set(reading);
    }

    pub fn advance(&self, by: Duration) {
        self.reading.set(self.reading.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.reading.get()
    }
}

/// Turns successive clock readings into non-negative deltas.
pub(crate) struct FrameTimer {
    clock: Box<dyn Clock>,
    last: Duration,
}

impl FrameTimer {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let last = clock.now();
        Self { clock, last }
    }

    /// Restart measurement from the current reading.
    pub fn reset(&mut self) {
        self.last = self.clock.now();
    }

    /// Time since the previous call. A reading behind the last one yields zero.
    pub fn tick(&mut self) -> Duration {
        let now = self.clock.now();
        let delta = now.saturating_sub(self.last);
        self.last = self.last.max(now);
        delta
    }
}
