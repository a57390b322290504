//! Drawable state: transform, surface and dirty flag.

use crate::error::InitError;
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tessera_core::math::{UVec2, Vec2};
use tessera_event::Event;
use tessera_test_utils::{Color, RenderBackend, Surface};

/// Position and size of a drawable, in parent coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub size: UVec2,
}

impl Transform {
    pub const DEFAULT_SIZE: UVec2 = UVec2::new(60, 20);
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Self::DEFAULT_SIZE,
        }
    }
}

/// Shared "needs redraw" flag.
///
/// Clones share the same flag, which is how a child's position change can
/// mark its parent dirty without holding a reference to it.
#[derive(Clone, Default)]
pub struct DirtyFlag(Arc<AtomicBool>);

impl DirtyFlag {
    pub fn new(dirty: bool) -> Self {
        Self(Arc::new(AtomicBool::new(dirty)))
    }

    pub fn mark(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl fmt::Debug for DirtyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DirtyFlag").field(&self.is_set()).finish()
    }
}

/// Target a drawable renders into during one draw call.
#[derive(Clone)]
pub struct Canvas {
    backend: Arc<dyn RenderBackend>,
    surface: Surface,
}

impl Canvas {
    pub fn new(backend: Arc<dyn RenderBackend>, surface: Surface) -> Self {
        Self { backend, surface }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn size(&self) -> UVec2 {
        self.surface.size()
    }

    pub fn clear(&self, color: Color) {
        self.backend.clear(&self.surface, color);
    }

    /// Draw `source` at `position` on this canvas.
    pub fn composite(&self, source: &Surface, position: Vec2) {
        self.backend.composite(&self.surface, source, position);
    }

    pub fn present(&self) {
        self.backend.present(&self.surface);
    }

    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }
}

/// Render-side state of a drawable object.
///
/// A new view is dirty, so it is drawn on the first draw pass after init.
pub struct View {
    transform: Transform,
    surface: Option<Surface>,
    backend: Arc<dyn RenderBackend>,
    dirty: DirtyFlag,
    pub position_changed: Event<View, Vec2>,
    pub size_changed: Event<View, UVec2>,
}

impl View {
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self::with_transform(backend, Transform::default())
    }

    pub fn with_transform(backend: Arc<dyn RenderBackend>, transform: Transform) -> Self {
        Self {
            transform,
            surface: None,
            backend,
            dirty: DirtyFlag::new(true),
            position_changed: Event::new(),
            size_changed: Event::new(),
        }
    }

    /// (Re)allocate the surface at the current size.
    pub fn allocate(&mut self) -> Result<(), InitError> {
        self.release();
        let size = self.transform.size;
        let surface = self
            .backend
            .create_surface(size.x, size.y)
            .ok_or(InitError::SurfaceAllocation {
                width: size.x,
                height: size.y,
            })?;
        self.surface = Some(surface);
        self.dirty.mark();
        Ok(())
    }

    fn release(&mut self) {
        if let Some(surface) = self.surface.take() {
            self.backend.release_surface(&surface);
        }
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Canvas over this view's surface, `None` before allocation.
    pub fn canvas(&self) -> Option<Canvas> {
        self.surface
            .clone()
            .map(|surface| Canvas::new(self.backend.clone(), surface))
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn size(&self) -> UVec2 {
        self.transform.size
    }

    pub fn x(&self) -> f32 {
        self.transform.position.x
    }

    pub fn y(&self) -> f32 {
        self.transform.position.y
    }

    pub fn width(&self) -> u32 {
        self.transform.size.x
    }

    pub fn height(&self) -> u32 {
        self.transform.size.y
    }

    /// Move the view. The view itself stays clean; whoever composites it
    /// (the parent) is told through `position_changed`.
    pub fn set_position(&mut self, position: Vec2) {
        if self.transform.position == position {
            return;
        }
        self.transform.position = position;
        self.position_changed.invoke(self, &position);
    }

    pub fn set_x(&mut self, x: f32) {
        self.set_position(Vec2::new(x, self.transform.position.y));
    }

    pub fn set_y(&mut self, y: f32) {
        self.set_position(Vec2::new(self.transform.position.x, y));
    }

    /// Resize the view. An allocated surface is reallocated at the new size.
    pub fn set_size(&mut self, size: UVec2) {
        if self.transform.size == size {
            return;
        }
        self.transform.size = size;
        if self.surface.is_some() {
            if let Err(err) = self.allocate() {
                tracing::warn!("view resize failed: {err}");
            }
        }
        self.dirty.mark();
        self.size_changed.invoke(self, &size);
    }

    pub fn set_width(&mut self, width: u32) {
        self.set_size(UVec2::new(width, self.transform.size.y));
    }

    pub fn set_height(&mut self, height: u32) {
        self.set_size(UVec2::new(self.transform.size.x, height));
    }

    pub fn dirty(&self) -> &DirtyFlag {
        &self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_set()
    }

    pub fn mark_dirty(&self) {
        self.dirty.mark();
    }
}

impl Drop for View {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("transform", &self.transform)
            .field("surface", &self.surface)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

/// Something with a surface that can be drawn and composited.
pub trait Drawable: 'static {
    fn view(&self) -> &View;

    fn view_mut(&mut self) -> &mut View;

    /// Render this object's own content. Children are composited afterwards.
    fn draw(&mut self, _canvas: &Canvas) {}
}
