//! Top-level window abstraction.

use crate::{error::BackendError, surface::Surface};
use bitflags::bitflags;
use glam::{IVec2, UVec2};

bitflags! {
    /// Window decoration flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        const NONE       = 0;
        const TITLEBAR   = 1 << 0;
        const RESIZE     = 1 << 1;
        const CLOSE      = 1 << 2;
        const FULLSCREEN = 1 << 3;

        /// Titlebar, resize border and close button.
        const DEFAULT = Self::TITLEBAR.bits() | Self::RESIZE.bits() | Self::CLOSE.bits();
    }
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowDescriptor {
    pub title: String,
    pub size: UVec2,
    pub style: WindowStyle,
    /// Frames per second, 0 for unlimited.
    pub frame_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Input and window notifications delivered by [`WindowBackend::poll_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Closed,
    Resized(UVec2),
    FocusGained,
    FocusLost,
    KeyPressed(u32),
    KeyReleased(u32),
    TextEntered(char),
    MouseMoved(IVec2),
    MouseButtonPressed(MouseButton),
    MouseButtonReleased(MouseButton),
    MouseWheelScrolled(f32),
}

/// Native window a form renders into.
pub trait WindowBackend {
    /// Create the window and return the surface it presents.
    fn open(&mut self, descriptor: &WindowDescriptor) -> Result<Surface, BackendError>;

    fn is_open(&self) -> bool;

    fn close(&mut self);

    /// Next pending event, `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<WindowEvent>;

    fn set_title(&mut self, title: &str);

    fn set_size(&mut self, size: UVec2);

    fn set_position(&mut self, position: IVec2);

    /// Size of the monitor the window is on, if the backend knows it.
    fn monitor_size(&self) -> Option<UVec2>;
}
