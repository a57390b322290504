//! Mock implementation of [`RenderBackend`] for testing.
//!
//! Records every operation without touching pixels.

use crate::{
    render_backend::RenderBackend,
    surface::{Color, Surface, SurfaceId},
};
use glam::{UVec2, Vec2};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateSurface {
        surface: SurfaceId,
        width: u32,
        height: u32,
    },
    Clear {
        surface: SurfaceId,
        color: Color,
    },
    Composite {
        target: SurfaceId,
        source: SurfaceId,
        position: Vec2,
    },
    Present {
        surface: SurfaceId,
    },
    ReleaseSurface {
        surface: SurfaceId,
    },
}

/// Recording [`RenderBackend`].
///
/// ```rust
/// use tessera_test_utils::{MockRenderBackend, RenderBackend};
///
/// let mock = MockRenderBackend::new();
/// mock.set_fail_allocations(true);
/// assert!(mock.create_surface(60, 20).is_none());
/// assert_eq!(mock.call_count(), 0);
/// ```
pub struct MockRenderBackend {
    calls: Mutex<Vec<RenderCall>>,
    live: Mutex<Vec<SurfaceId>>,
    next_surface: AtomicU64,
    fail_allocations: AtomicBool,
}

impl MockRenderBackend {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            live: Mutex::new(Vec::new()),
            next_surface: AtomicU64::new(1),
            fail_allocations: AtomicBool::new(false),
        }
    }

    /// Make every following `create_surface` fail.
    pub fn set_fail_allocations(&self, fail: bool) {
        self.fail_allocations.store(fail, Ordering::SeqCst);
    }

    /// Copy of all recorded calls.
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.lock().clone()
    }

    fn count(&self, predicate: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }

    pub fn count_surface_creates(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::CreateSurface { .. }))
    }

    pub fn count_clears(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::Clear { .. }))
    }

    pub fn count_composites(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::Composite { .. }))
    }

    pub fn count_presents(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::Present { .. }))
    }

    pub fn count_releases(&self) -> usize {
        self.count(|call| matches!(call, RenderCall::ReleaseSurface { .. }))
    }

    /// Number of times `surface` was presented.
    pub fn presents_of(&self, surface: &Surface) -> usize {
        let id = surface.id();
        self.count(|call| matches!(call, RenderCall::Present { surface } if *surface == id))
    }

    /// Number of times `surface` was cleared.
    pub fn clears_of(&self, surface: &Surface) -> usize {
        let id = surface.id();
        self.count(|call| matches!(call, RenderCall::Clear { surface, .. } if *surface == id))
    }

    /// Composites onto `target`, in call order, as `(source, position)`.
    pub fn composites_onto(&self, target: &Surface) -> Vec<(SurfaceId, Vec2)> {
        let id = target.id();
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                RenderCall::Composite {
                    target,
                    source,
                    position,
                } if *target == id => Some((*source, *position)),
                _ => None,
            })
            .collect()
    }

    /// Surfaces created and not yet released.
    pub fn live_surfaces(&self) -> usize {
        self.live.lock().len()
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: RenderCall) {
        self.calls.lock().push(call);
    }
}

impl Default for MockRenderBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for MockRenderBackend {
    fn create_surface(&self, width: u32, height: u32) -> Option<Surface> {
        if self.fail_allocations.load(Ordering::SeqCst) {
            return None;
        }
        let id = SurfaceId(self.next_surface.fetch_add(1, Ordering::Relaxed));
        self.live.lock().push(id);
        self.record(RenderCall::CreateSurface {
            surface: id,
            width,
            height,
        });
        Some(Surface::new(id, UVec2::new(width, height)))
    }

    fn clear(&self, surface: &Surface, color: Color) {
        self.record(RenderCall::Clear {
            surface: surface.id(),
            color,
        });
    }

    fn composite(&self, target: &Surface, source: &Surface, position: Vec2) {
        self.record(RenderCall::Composite {
            target: target.id(),
            source: source.id(),
            position,
        });
    }

    fn present(&self, surface: &Surface) {
        self.record(RenderCall::Present {
            surface: surface.id(),
        });
    }

    fn release_surface(&self, surface: &Surface) {
        self.live.lock().retain(|id| *id != surface.id());
        self.record(RenderCall::ReleaseSurface {
            surface: surface.id(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mock = MockRenderBackend::new();
        let target = mock.create_surface(100, 100).unwrap();
        let child = mock.create_surface(10, 10).unwrap();
        mock.clear(&target, Color::BLACK);
        mock.composite(&target, &child, Vec2::new(5.0, 6.0));
        mock.present(&target);

        assert_eq!(mock.count_surface_creates(), 2);
        assert_eq!(mock.clears_of(&target), 1);
        assert_eq!(mock.composites_onto(&target), vec![(child.id(), Vec2::new(5.0, 6.0))]);
        assert_eq!(mock.presents_of(&child), 0);
        assert_eq!(
            mock.calls().last(),
            Some(&RenderCall::Present {
                surface: target.id()
            })
        );
    }

    #[test]
    fn test_release_tracks_live_surfaces() {
        let mock = MockRenderBackend::new();
        let a = mock.create_surface(1, 1).unwrap();
        let _b = mock.create_surface(1, 1).unwrap();
        assert_eq!(mock.live_surfaces(), 2);

        mock.release_surface(&a);
        assert_eq!(mock.live_surfaces(), 1);
        assert_eq!(mock.count_releases(), 1);
    }
}
