//! Math types for transforms and surface geometry.
//!
//! Re-exports the SIMD-accelerated [`glam`] types. Positions are [`Vec2`],
//! pixel sizes are [`UVec2`] and window coordinates are [`IVec2`].
//!
//! ```
//! use tessera_core::math::{UVec2, Vec2};
//!
//! let position = Vec2::new(10.0, 20.0);
//! let size = UVec2::new(60, 20);
//! let center = position + size.as_vec2() * 0.5;
//! assert_eq!(center, Vec2::new(40.0, 30.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{IVec2, UVec2, Vec2};
