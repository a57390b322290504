//! Tessera Core
//!
//! This crate contains the shared building blocks of the Tessera runtime:
//! hashing collections and the generational arena, logging and profiling
//! setup, engine configuration and the math types used for transforms.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;
