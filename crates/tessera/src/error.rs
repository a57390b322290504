use tessera_test_utils::BackendError;
use thiserror::Error;

/// Why an object failed to initialize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    #[error("failed to allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },
    #[error("{0}")]
    Failed(String),
}

impl InitError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Why [`Form::open`](crate::Form::open) gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form initialization failed: {0}")]
    Init(#[from] InitError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}
