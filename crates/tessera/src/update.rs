use std::time::Duration;

/// Per-cycle tick.
pub trait Updatable: 'static {
    fn update(&mut self, ctx: &mut UpdateContext);
}

/// Frame information passed to [`Updatable::update`].
#[derive(Debug, Clone)]
pub struct UpdateContext {
    delta: Duration,
    frame: u64,
    delete_requested: bool,
}

impl UpdateContext {
    pub fn new(delta: Duration, frame: u64) -> Self {
        Self {
            delta,
            frame,
            delete_requested: false,
        }
    }

    /// Duration of the previous cycle.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Ask the owning composite to delete the object being updated once the
    /// current update pass over its siblings has finished.
    pub fn request_delete(&mut self) {
        self.delete_requested = true;
    }

    pub fn is_delete_requested(&self) -> bool {
        self.delete_requested
    }

    /// Same frame data, no pending request.
    pub(crate) fn for_child(&self) -> Self {
        Self::new(self.delta, self.frame)
    }
}
