//! Scriptable [`WindowBackend`] for headless form tests.

use crate::{
    error::BackendError,
    render_backend::RenderBackend,
    surface::Surface,
    window::{WindowBackend, WindowDescriptor, WindowEvent},
};
use glam::{IVec2, UVec2};
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

#[derive(Debug, Default)]
struct WindowState {
    open: bool,
    descriptor: Option<WindowDescriptor>,
    title: String,
    size: UVec2,
    position: IVec2,
    monitor: Option<UVec2>,
    pending: VecDeque<WindowEvent>,
    drains: usize,
    close_after: Option<usize>,
    fail_open: bool,
    opens: usize,
}

/// In-memory window.
///
/// Events queued with [`MockWindowHandle::push_event`] are delivered on the
/// next drain. A drain ends when `poll_event` returns `None`, so one form
/// cycle is one drain.
pub struct MockWindow {
    backend: Arc<dyn RenderBackend>,
    state: Arc<Mutex<WindowState>>,
}

/// Shared view into a [`MockWindow`], usable after the window has been boxed
/// and handed to a form.
#[derive(Clone)]
pub struct MockWindowHandle {
    state: Arc<Mutex<WindowState>>,
}

impl MockWindow {
    /// The window surface is allocated from `backend` on open.
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(WindowState::default())),
        }
    }

    /// Report `size` as the monitor size.
    pub fn with_monitor(self, size: UVec2) -> Self {
        self.state.lock().monitor = Some(size);
        self
    }

    /// Deliver `Closed` once `cycles` drains have completed.
    pub fn close_after(self, cycles: usize) -> Self {
        self.state.lock().close_after = Some(cycles);
        self
    }

    /// Make `open` fail.
    pub fn failing(self) -> Self {
        self.state.lock().fail_open = true;
        self
    }

    pub fn handle(&self) -> MockWindowHandle {
        MockWindowHandle {
            state: self.state.clone(),
        }
    }
}

impl MockWindowHandle {
    pub fn push_event(&self, event: WindowEvent) {
        self.state.lock().pending.push_back(event);
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    /// Descriptor passed to the last `open`.
    pub fn descriptor(&self) -> Option<WindowDescriptor> {
        self.state.lock().descriptor.clone()
    }

    pub fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    pub fn size(&self) -> UVec2 {
        self.state.lock().size
    }

    pub fn position(&self) -> IVec2 {
        self.state.lock().position
    }

    /// Completed event drains.
    pub fn drains(&self) -> usize {
        self.state.lock().drains
    }

    pub fn opens(&self) -> usize {
        self.state.lock().opens
    }
}

impl WindowBackend for MockWindow {
    fn open(&mut self, descriptor: &WindowDescriptor) -> Result<Surface, BackendError> {
        let mut state = self.state.lock();
        if state.fail_open {
            return Err(BackendError::WindowCreation("mock window refused to open".into()));
        }
        let surface = self
            .backend
            .create_surface(descriptor.size.x, descriptor.size.y)
            .ok_or(BackendError::SurfaceAllocation {
                width: descriptor.size.x,
                height: descriptor.size.y,
            })?;

        state.open = true;
        state.opens += 1;
        state.title = descriptor.title.clone();
        state.size = descriptor.size;
        state.descriptor = Some(descriptor.clone());
        Ok(surface)
    }

    fn is_open(&self) -> bool {
        self.state.lock().open
    }

    fn close(&mut self) {
        self.state.lock().open = false;
    }

    fn poll_event(&mut self) -> Option<WindowEvent> {
        let mut state = self.state.lock();
        if let Some(event) = state.pending.pop_front() {
            return Some(event);
        }
        if state.close_after == Some(state.drains) {
            state.close_after = None;
            return Some(WindowEvent::Closed);
        }
        state.drains += 1;
        None
    }

    fn set_title(&mut self, title: &str) {
        self.state.lock().title = title.to_owned();
    }

    fn set_size(&mut self, size: UVec2) {
        self.state.lock().size = size;
    }

    fn set_position(&mut self, position: IVec2) {
        self.state.lock().position = position;
    }

    fn monitor_size(&self) -> Option<UVec2> {
        self.state.lock().monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MockRenderBackend, WindowStyle};

    fn descriptor() -> WindowDescriptor {
        WindowDescriptor {
            title: "mock".into(),
            size: UVec2::new(320, 240),
            style: WindowStyle::DEFAULT,
            frame_limit: 0,
        }
    }

    #[test]
    fn test_close_after_counts_drains() {
        let mut window = MockWindow::new(Arc::new(MockRenderBackend::new())).close_after(1);
        let handle = window.handle();
        window.open(&descriptor()).unwrap();

        handle.push_event(WindowEvent::FocusGained);
        assert_eq!(window.poll_event(), Some(WindowEvent::FocusGained));
        assert_eq!(window.poll_event(), None);
        assert_eq!(window.poll_event(), Some(WindowEvent::Closed));
        assert_eq!(window.poll_event(), None);
        assert_eq!(handle.drains(), 2);
    }

    #[test]
    fn test_open_allocates_window_surface() {
        let backend = Arc::new(MockRenderBackend::new());
        let mut window = MockWindow::new(backend.clone());
        let surface = window.open(&descriptor()).unwrap();

        assert_eq!(surface.size(), UVec2::new(320, 240));
        assert_eq!(backend.count_surface_creates(), 1);
        assert!(window.handle().is_open());
    }

    #[test]
    fn test_failing_window_reports_error() {
        let mut window = MockWindow::new(Arc::new(MockRenderBackend::new())).failing();
        assert!(matches!(
            window.open(&descriptor()),
            Err(BackendError::WindowCreation(_))
        ));
        assert!(!window.is_open());
    }
}
