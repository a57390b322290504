use std::time::Duration;

/// Monotonic frame timer.
pub trait FrameClock {
    /// Time since the previous restart; starts a new measurement.
    fn restart(&mut self) -> Duration;

    /// Time since the previous restart.
    fn elapsed(&self) -> Duration;

    /// Block for `duration`. Used for frame limiting.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
