use tessera_core::math::{IVec2, UVec2};
use tessera_test_utils::{Color, WindowDescriptor, WindowStyle};

/// Initial configuration of a [`Form`](crate::Form).
#[derive(Debug, Clone, PartialEq)]
pub struct FormSettings {
    pub title: String,
    pub size: UVec2,
    /// Window position; `None` centers the window on the monitor.
    pub position: Option<IVec2>,
    pub style: WindowStyle,
    /// Frames per second, 0 for unlimited.
    pub frame_limit: u32,
    pub background: Color,
    /// Log a [`TimeProfile`](crate::TimeProfile) report four times a second.
    pub plot_stats: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            title: "Tessera".to_owned(),
            size: UVec2::new(500, 400),
            position: None,
            style: WindowStyle::DEFAULT,
            frame_limit: 60,
            background: Color::from_rgba_u32(0x000000FF),
            plot_stats: false,
        }
    }
}

impl FormSettings {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = UVec2::new(width, height);
        self
    }

    pub fn with_frame_limit(mut self, frame_limit: u32) -> Self {
        self.frame_limit = frame_limit;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_plot_stats(mut self, plot_stats: bool) -> Self {
        self.plot_stats = plot_stats;
        self
    }

    pub(crate) fn descriptor(&self) -> WindowDescriptor {
        WindowDescriptor {
            title: self.title.clone(),
            size: self.size,
            style: self.style,
            frame_limit: self.frame_limit,
        }
    }

    /// Top-left position that centers the window on `monitor`.
    pub(crate) fn centered_on(&self, monitor: UVec2) -> IVec2 {
        (monitor.as_ivec2() - self.size.as_ivec2()) / 2
    }
}
