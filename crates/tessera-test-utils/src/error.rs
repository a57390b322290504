use thiserror::Error;

/// Failure reported by a render or window backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("failed to allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },
    #[error("failed to create window: {0}")]
    WindowCreation(String),
    #[error("window is not open")]
    WindowClosed,
}
