use crate::clock::FrameClock;
use std::time::Duration;

/// Deterministic [`FrameClock`]: every frame lasts exactly `step`.
///
/// `sleep` only records the requested duration.
#[derive(Debug, Clone)]
pub struct ManualClock {
    step: Duration,
    restarts: u64,
    slept: Duration,
}

impl ManualClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            restarts: 0,
            slept: Duration::ZERO,
        }
    }

    pub fn set_step(&mut self, step: Duration) {
        self.step = step;
    }

    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Total time the caller asked to sleep.
    pub fn slept(&self) -> Duration {
        self.slept
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

impl FrameClock for ManualClock {
    fn restart(&mut self) -> Duration {
        self.restarts += 1;
        self.step
    }

    fn elapsed(&self) -> Duration {
        self.step
    }

    fn sleep(&mut self, duration: Duration) {
        self.slept += duration;
    }
}
