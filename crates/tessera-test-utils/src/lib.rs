//! Backend abstractions for the Tessera runtime, plus test doubles.
//!
//! The runtime never draws pixels or talks to a windowing system itself. It
//! goes through three object-safe traits:
//!
//! - [`RenderBackend`] - allocates surfaces, clears, composites and presents
//! - [`WindowBackend`] - the top-level window a form runs in
//! - [`FrameClock`] - monotonic frame timing
//!
//! With the `mock` feature the crate also provides `MockRenderBackend`,
//! `MockWindow` and `ManualClock`, which record every call so tests can assert
//! on exactly what the runtime did.
//!
//! ```rust
//! # #[cfg(feature = "mock")]
//! # {
//! use tessera_test_utils::{Color, MockRenderBackend, RenderBackend};
//!
//! let backend = MockRenderBackend::new();
//! let surface = backend.create_surface(60, 20).unwrap();
//! backend.clear(&surface, Color::BLACK);
//! backend.present(&surface);
//!
//! assert_eq!(backend.count_surface_creates(), 1);
//! assert_eq!(backend.presents_of(&surface), 1);
//! # }
//! ```
//!
//! Mock implementations use `parking_lot::Mutex` so that `&self` methods can
//! record calls while the traits stay `Send + Sync`.

pub mod clock;
pub mod error;
pub mod render_backend;
pub mod surface;
pub mod window;

#[cfg(feature = "mock")]
pub mod mock_clock;
#[cfg(feature = "mock")]
pub mod mock_render;
#[cfg(feature = "mock")]
pub mod mock_window;

pub use clock::*;
pub use error::*;
pub use render_backend::*;
pub use surface::*;
pub use window::*;

#[cfg(feature = "mock")]
pub use mock_clock::*;
#[cfg(feature = "mock")]
pub use mock_render::*;
#[cfg(feature = "mock")]
pub use mock_window::*;
