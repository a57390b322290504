//! Top-level window composite and its frame loop.

mod settings;

pub use settings::FormSettings;

use crate::{
    composite::{Composite, ObjectCounts},
    error::{FormError, InitError},
    id::ObjectId,
    object::{Object, ObjectCore, Services, Spawn},
    owner::ObjectOwner,
    time::{SystemClock, TimeProfile},
    update::UpdateContext,
    view::{Canvas, DirtyFlag},
};
use std::time::Duration;
use tessera_core::{
    math::UVec2,
    profiling::{self, profile_function},
};
use tessera_event::Event;
use tessera_test_utils::{Color, FrameClock, Surface, WindowBackend, WindowEvent};

/// How often statistics are logged when `plot_stats` is on.
const STATS_INTERVAL: Duration = Duration::from_millis(250);

/// Application callbacks driven by [`Form::open`].
pub trait FormHandler {
    /// Runs once before the window opens. Typically creates the children.
    fn init(&mut self, _form: &mut Form) -> Result<(), InitError> {
        Ok(())
    }

    /// Runs every cycle before the children are updated. Requesting deletion
    /// through `ctx` closes the form.
    fn update(&mut self, _form: &mut Form, _ctx: &mut UpdateContext) {}

    /// Every window event except `Closed`.
    fn window_event(&mut self, _form: &mut Form, _event: &WindowEvent) {}

    /// Draws the form's own content before the children are composited.
    fn draw(&mut self, form: &Form, canvas: &Canvas) {
        canvas.clear(form.background());
    }
}

/// Handler that only uses the defaults.
pub struct DefaultHandler;

impl FormHandler for DefaultHandler {}

/// The root of an object tree, bound to a window.
///
/// Each cycle of the loop:
///
/// 1. restart the frame clock
/// 2. drain window events
/// 3. update the form (handler), then its children
/// 4. redraw dirty children; if any was redrawn the form becomes dirty
/// 5. if dirty: handler draw, composite children, present
/// 6. sleep the rest of the frame budget
pub struct Form {
    core: ObjectCore,
    composite: Composite,
    settings: FormSettings,
    services: Services,
    window: Box<dyn WindowBackend>,
    clock: Box<dyn FrameClock>,
    surface: Option<Surface>,
    dirty: DirtyFlag,
    shown: bool,
    time: TimeProfile,
    frame: u64,
    since_stats: Duration,
    pub opened: Event<Form, ()>,
    pub closed: Event<Form, ()>,
    pub title_changed: Event<Form, str>,
    pub size_changed: Event<Form, UVec2>,
    pub background_changed: Event<Form, Color>,
}

impl Form {
    pub fn new(settings: FormSettings, services: Services, window: Box<dyn WindowBackend>) -> Self {
        let core = ObjectCore::new(services.ids.next_id(), None, settings.title.clone());
        let dirty = DirtyFlag::new(true);
        let composite = Composite::new(core.id(), core.name(), services.clone(), dirty.clone());
        Self {
            core,
            composite,
            settings,
            services,
            window,
            clock: Box::new(SystemClock::new()),
            surface: None,
            dirty,
            shown: false,
            time: TimeProfile::default(),
            frame: 0,
            since_stats: Duration::ZERO,
            opened: Event::new(),
            closed: Event::new(),
            title_changed: Event::new(),
            size_changed: Event::new(),
            background_changed: Event::new(),
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn FrameClock>) -> Self {
        self.clock = clock;
        self
    }

    /// Initialize, open the window and run the loop until it closes.
    pub fn open(&mut self, handler: &mut dyn FormHandler) -> Result<(), FormError> {
        self.show(handler)?;
        while self.window.is_open() {
            self.run_frame(handler);
        }
        self.close();
        Ok(())
    }

    /// Initialize (once) and open the window without entering the loop.
    ///
    /// Drive the form with [`run_frame`](Self::run_frame) afterwards.
    pub fn show(&mut self, handler: &mut dyn FormHandler) -> Result<(), FormError> {
        profile_function!();
        if !self.core.is_initialized() {
            handler.init(self)?;
            self.core.mark_initialized();
        }

        let surface = match self.window.open(&self.settings.descriptor()) {
            Ok(surface) => surface,
            Err(err) => {
                tracing::error!(form = %self.core.name(), "failed to open window: {err}");
                return Err(err.into());
            }
        };
        let position = self.settings.position.or_else(|| {
            self.window
                .monitor_size()
                .map(|monitor| self.settings.centered_on(monitor))
        });
        if let Some(position) = position {
            self.window.set_position(position);
        }

        self.surface = Some(surface);
        self.shown = true;
        self.dirty.mark();
        self.clock.restart();
        tracing::info!(form = %self.core.name(), size = ?self.settings.size, "form opened");
        self.opened.invoke(self, &());
        Ok(())
    }

    /// Close the window. Raises `closed` if the form was shown.
    pub fn close(&mut self) {
        if self.window.is_open() {
            self.window.close();
        }
        if self.shown {
            self.shown = false;
            self.surface = None;
            tracing::info!(form = %self.core.name(), frames = self.frame, "form closed");
            self.closed.invoke(self, &());
        }
    }

    fn lap(&self, mark: &mut Duration) -> Duration {
        let now = self.clock.elapsed();
        let phase = now.saturating_sub(*mark);
        *mark = now;
        phase
    }

    /// Run one cycle of the loop. Returns whether the window is still open.
    pub fn run_frame(&mut self, handler: &mut dyn FormHandler) -> bool {
        profile_function!();
        profiling::new_frame();
        let delta = self.clock.restart();
        let mut profile = TimeProfile {
            cycle: delta,
            ..TimeProfile::default()
        };
        let mut mark = Duration::ZERO;

        while let Some(event) = self.window.poll_event() {
            match event {
                WindowEvent::Closed => {
                    self.close();
                    break;
                }
                WindowEvent::Resized(size) => {
                    self.apply_size(size);
                    handler.window_event(self, &event);
                }
                event => handler.window_event(self, &event),
            }
        }
        profile.window = self.lap(&mut mark);
        if !self.window.is_open() {
            self.time = profile;
            return false;
        }

        let mut ctx = UpdateContext::new(delta, self.frame);
        handler.update(self, &mut ctx);
        profile.form_update = self.lap(&mut mark);
        if ctx.is_delete_requested() {
            self.close();
            self.time = profile;
            return false;
        }
        self.composite.update(&ctx);
        profile.object_update = self.lap(&mut mark);

        if self.composite.draw_children() {
            self.dirty.mark();
        }
        profile.object_draw = self.lap(&mut mark);

        if self.dirty.is_set() {
            if let Some(canvas) = self.canvas() {
                handler.draw(self, &canvas);
                self.composite.composite_onto(&canvas);
                canvas.present();
            }
            self.dirty.clear();
        }
        profile.form_draw = self.lap(&mut mark);

        if self.settings.frame_limit > 0 {
            let budget = Duration::from_secs_f64(1.0 / f64::from(self.settings.frame_limit));
            if let Some(spare) = budget.checked_sub(self.clock.elapsed()) {
                profile.spare = spare;
                self.clock.sleep(spare);
            }
        }

        self.time = profile;
        self.frame += 1;
        self.since_stats += delta;
        if self.settings.plot_stats && self.since_stats >= STATS_INTERVAL {
            self.since_stats = Duration::ZERO;
            tracing::info!(
                form = %self.core.name(),
                "\n{}",
                self.time.report(self.composite.counts())
            );
        }
        self.window.is_open()
    }

    fn canvas(&self) -> Option<Canvas> {
        self.surface
            .clone()
            .map(|surface| Canvas::new(self.services.backend.clone(), surface))
    }

    fn apply_size(&mut self, size: UVec2) {
        if self.settings.size == size {
            return;
        }
        self.settings.size = size;
        self.dirty.mark();
        self.size_changed.invoke(self, &size);
    }

    pub fn title(&self) -> &str {
        &self.settings.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.settings.title == title {
            return;
        }
        self.window.set_title(&title);
        self.settings.title = title;
        self.title_changed.invoke(self, self.settings.title.as_str());
    }

    pub fn size(&self) -> UVec2 {
        self.settings.size
    }

    pub fn set_size(&mut self, size: UVec2) {
        if self.settings.size == size {
            return;
        }
        self.window.set_size(size);
        self.apply_size(size);
    }

    pub fn background(&self) -> Color {
        self.settings.background
    }

    pub fn set_background(&mut self, color: Color) {
        if self.settings.background == color {
            return;
        }
        self.settings.background = color;
        self.dirty.mark();
        self.background_changed.invoke(self, &color);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_set()
    }

    /// Force a redraw of the form on the next cycle.
    pub fn set_dirty(&self) {
        self.dirty.mark();
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn time_profile(&self) -> &TimeProfile {
        &self.time
    }

    /// Completed cycles.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn owner(&self) -> &ObjectOwner {
        self.composite.owner()
    }

    pub fn owner_mut(&mut self) -> &mut ObjectOwner {
        self.composite.owner_mut()
    }

    pub fn composite(&self) -> &Composite {
        &self.composite
    }

    pub fn create<T: Spawn>(&mut self, name: &str) -> Option<&mut T> {
        self.composite.create(name)
    }

    pub fn create_with<T: Object>(
        &mut self,
        name: &str,
        build: impl FnOnce(ObjectCore, &Services) -> T,
    ) -> Option<&mut T> {
        self.composite.create_with(name, build)
    }

    pub fn delete(&mut self, id: ObjectId) -> bool {
        self.composite.delete(id)
    }

    pub fn counts(&self) -> ObjectCounts {
        self.composite.counts()
    }
}

impl Object for Form {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn as_owner(&self) -> Option<&ObjectOwner> {
        Some(self.composite.owner())
    }

    fn as_owner_mut(&mut self) -> Option<&mut ObjectOwner> {
        Some(self.composite.owner_mut())
    }
}
