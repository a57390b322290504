//! Trait abstracting 2D surface operations.

use crate::surface::{Color, Surface};
use glam::Vec2;

/// Surface allocation and pixel compositing.
///
/// Methods take `&self` and return owned handles, so one backend can be
/// shared through an `Arc` by every drawable in a tree.
///
/// ```rust,no_run
/// use glam::Vec2;
/// use tessera_test_utils::{Color, RenderBackend};
///
/// fn blit(backend: &dyn RenderBackend) -> Option<()> {
///     let target = backend.create_surface(500, 400)?;
///     let child = backend.create_surface(60, 20)?;
///     backend.clear(&target, Color::BLACK);
///     backend.composite(&target, &child, Vec2::new(10.0, 10.0));
///     backend.present(&target);
///     Some(())
/// }
/// ```
pub trait RenderBackend: Send + Sync {
    /// Allocate a surface. `None` when the backend is out of resources.
    fn create_surface(&self, width: u32, height: u32) -> Option<Surface>;

    fn clear(&self, surface: &Surface, color: Color);

    /// Draw `source` onto `target` with its top-left corner at `position`.
    fn composite(&self, target: &Surface, source: &Surface, position: Vec2);

    /// Finish drawing into `surface`.
    fn present(&self, surface: &Surface);

    /// Free the resources behind `surface`.
    fn release_surface(&self, _surface: &Surface) {}
}
