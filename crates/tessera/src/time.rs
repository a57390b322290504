use crate::composite::ObjectCounts;
use std::{
    fmt::{self, Write as _},
    time::{Duration, Instant},
};
use tessera_test_utils::FrameClock;

/// [`FrameClock`] backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    last_restart: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last_restart: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last_restart;
        self.last_restart = now;
        elapsed
    }

    fn elapsed(&self) -> Duration {
        self.last_restart.elapsed()
    }
}

/// Phase timings of the previous form cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeProfile {
    /// Whole cycle, measured from restart to restart.
    pub cycle: Duration,
    pub window: Duration,
    pub form_update: Duration,
    pub object_update: Duration,
    pub form_draw: Duration,
    pub object_draw: Duration,
    /// Time left in the frame budget, slept away by the frame limiter.
    pub spare: Duration,
}

impl TimeProfile {
    /// Multi-line report in microseconds, followed by object counts.
    pub fn report(&self, counts: ObjectCounts) -> String {
        let mut out = self.to_string();
        let _ = write!(
            out,
            "\nObjects: {} ({} updatable, {} drawable)",
            counts.objects, counts.updatables, counts.drawables
        );
        out
    }
}

impl fmt::Display for TimeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let us = |d: Duration| d.as_micros();
        writeln!(f, "Cycle:  {}us", us(self.cycle))?;
        writeln!(f, "Window: {}us", us(self.window))?;
        writeln!(
            f,
            "Update: {}us form, {}us objects",
            us(self.form_update),
            us(self.object_update)
        )?;
        writeln!(
            f,
            "Draw:   {}us form, {}us objects",
            us(self.form_draw),
            us(self.object_draw)
        )?;
        write!(f, "Spare:  {}us", us(self.spare))
    }
}
