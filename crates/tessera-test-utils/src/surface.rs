//! Surface handles and colors.

use glam::UVec2;
use std::fmt;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack `0xRRGGBBAA`.
    pub const fn from_rgba_u32(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }

    pub const fn to_rgba_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_rgba_u32())
    }
}

/// Backend-assigned surface identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u64);

/// Handle to an offscreen or window surface owned by a [`RenderBackend`].
///
/// The handle is cheap to clone and does not free anything when dropped;
/// call [`RenderBackend::release_surface`] for that.
///
/// [`RenderBackend`]: crate::RenderBackend
/// [`RenderBackend::release_surface`]: crate::RenderBackend::release_surface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Surface {
    id: SurfaceId,
    size: UVec2,
}

impl Surface {
    pub fn new(id: SurfaceId, size: UVec2) -> Self {
        Self { id, size }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }
}
