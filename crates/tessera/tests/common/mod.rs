//! Test objects shared by the integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;
use tessera::prelude::*;
use tessera::{IdGenerator, InitError};
use tessera_test_utils::MockRenderBackend;

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn services(backend: &Arc<MockRenderBackend>) -> Services {
    Services::new(backend.clone()).with_ids(Arc::new(IdGenerator::seeded(0x7e55e7a)))
}

/// Updatable + drawable leaf that counts what happened to it.
pub struct Blip {
    core: ObjectCore,
    view: View,
    pub updates: u32,
    pub draws: u32,
    /// Request deletion on this update number.
    pub delete_on: Option<u32>,
    pub log: Option<Log>,
}

impl Blip {
    pub fn logging(core: ObjectCore, services: &Services, log: Log) -> Self {
        let mut blip = Self::spawn(core, services);
        blip.log = Some(log);
        blip
    }

    fn record(&self, what: &str) {
        if let Some(log) = &self.log {
            log.lock().push(format!("{what} {}", self.core.name()));
        }
    }
}

impl Spawn for Blip {
    fn spawn(core: ObjectCore, services: &Services) -> Self {
        Self {
            core,
            view: View::new(services.backend.clone()),
            updates: 0,
            draws: 0,
            delete_on: None,
            log: None,
        }
    }
}

impl Object for Blip {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn as_updatable(&self) -> Option<&dyn Updatable> {
        Some(self)
    }

    fn as_updatable_mut(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }
}

impl Updatable for Blip {
    fn update(&mut self, ctx: &mut UpdateContext) {
        self.updates += 1;
        self.record("update");
        if self.delete_on == Some(self.updates) {
            ctx.request_delete();
        }
    }
}

impl Drawable for Blip {
    fn view(&self) -> &View {
        &self.view
    }

    fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    fn draw(&mut self, canvas: &Canvas) {
        self.draws += 1;
        self.record("draw");
        canvas.clear(Color::WHITE);
    }
}

/// Container that logs its own update and draw.
pub struct Group {
    core: ObjectCore,
    control: Control,
    pub log: Option<Log>,
}

impl Group {
    pub fn logging(core: ObjectCore, services: &Services, log: Log) -> Self {
        let mut group = Self::spawn(core, services);
        group.log = Some(log);
        group
    }

    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut Control {
        &mut self.control
    }

    fn record(&self, what: &str) {
        if let Some(log) = &self.log {
            log.lock().push(format!("{what} {}", self.core.name()));
        }
    }
}

impl Spawn for Group {
    fn spawn(core: ObjectCore, services: &Services) -> Self {
        let control = Control::new(&core, services);
        Self {
            core,
            control,
            log: None,
        }
    }
}

impl Object for Group {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn as_control(&self) -> Option<&Control> {
        Some(&self.control)
    }

    fn as_control_mut(&mut self) -> Option<&mut Control> {
        Some(&mut self.control)
    }

    fn as_updatable(&self) -> Option<&dyn Updatable> {
        Some(self)
    }

    fn as_updatable_mut(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }
}

impl Updatable for Group {
    fn update(&mut self, _ctx: &mut UpdateContext) {
        self.record("update");
    }
}

impl Drawable for Group {
    fn view(&self) -> &View {
        self.control.view()
    }

    fn view_mut(&mut self) -> &mut View {
        self.control.view_mut()
    }

    fn draw(&mut self, _canvas: &Canvas) {
        self.record("draw");
    }
}

/// Object whose initialization always fails.
pub struct Faulty {
    core: ObjectCore,
    view: View,
}

impl Spawn for Faulty {
    fn spawn(core: ObjectCore, services: &Services) -> Self {
        Self {
            core,
            view: View::new(services.backend.clone()),
        }
    }
}

impl Object for Faulty {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn init(&mut self) -> Result<(), InitError> {
        Err(InitError::failed("faulty by construction"))
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }
}

impl Drawable for Faulty {
    fn view(&self) -> &View {
        &self.view
    }

    fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }
}

/// Object with no capabilities.
pub struct Tag {
    core: ObjectCore,
}

impl Spawn for Tag {
    fn spawn(core: ObjectCore, _: &Services) -> Self {
        Self { core }
    }
}

impl Object for Tag {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }
}
