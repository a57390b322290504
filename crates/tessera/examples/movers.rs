//! Thirteen squares bouncing left and right inside a form.
//!
//! Runs headless on the mock window and render backends for a fixed number
//! of frames, logging the frame statistics four times a second.
//!
//! ```sh
//! cargo run -p tessera --example movers
//! ```

use std::{sync::Arc, time::Duration};
use tessera::prelude::*;
use tessera_core::config::{Config, ProfilingMode};
use tessera_test_utils::{ManualClock, MockRenderBackend, MockWindow};

const LEFT: f32 = 10.0;
const RIGHT: f32 = 370.0;
const FRAMES: usize = 120;

/// Green square that travels between `LEFT` and `RIGHT`.
struct Mover {
    core: ObjectCore,
    control: Control,
    speed: f32,
    going_right: bool,
}

impl Spawn for Mover {
    fn spawn(core: ObjectCore, services: &Services) -> Self {
        let control = Control::new(&core, services);
        Self {
            core,
            control,
            speed: 200.0,
            going_right: true,
        }
    }
}

impl Object for Mover {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn init(&mut self) -> Result<(), InitError> {
        self.control.view_mut().set_size(UVec2::new(20, 20));
        self.control.set_background(Color::from_rgba_u32(0x00FF00FF));
        Ok(())
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

impl Updatable for Mover {
    fn update(&mut self, ctx: &mut UpdateContext) {
        let view = self.control.view_mut();
        if view.x() <= LEFT {
            self.going_right = true;
        } else if view.x() >= RIGHT {
            self.going_right = false;
        }

        let step = ctx.delta_secs() * self.speed;
        let x = if self.going_right {
            view.x() + step
        } else {
            view.x() - step
        };
        view.set_x(x.clamp(LEFT, RIGHT));
    }
}

impl Drawable for Mover {
    fn view(&self) -> &View {
        self.control.view()
    }

    fn view_mut(&mut self) -> &mut View {
        self.control.view_mut()
    }
}

struct Movers;

impl FormHandler for Movers {
    fn init(&mut self, form: &mut Form) -> Result<(), InitError> {
        for i in 0..13 {
            let offset = 10.0 + 30.0 * i as f32;
            let mover = form
                .create::<Mover>(&format!("mover{i}"))
                .ok_or_else(|| InitError::failed(format!("mover{i} failed to initialize")))?;
            mover.view_mut().set_position(Vec2::new(offset, offset));
        }
        Ok(())
    }
}

fn main() {
    Config {
        profiling: ProfilingMode::On,
        ..Config::default()
    }
    .apply();

    let backend = Arc::new(MockRenderBackend::new());
    let window = MockWindow::new(backend.clone()).close_after(FRAMES);
    let settings = FormSettings::default()
        .with_title("Movers")
        .with_size(400, 400)
        .with_plot_stats(true);
    let mut form = Form::new(settings, Services::new(backend.clone()), Box::new(window))
        .with_clock(Box::new(ManualClock::new(Duration::from_millis(16))));

    if let Err(err) = form.open(&mut Movers) {
        tracing::error!("movers failed: {err}");
        return;
    }

    tracing::info!(
        frames = form.frame(),
        presents = backend.count_presents(),
        composites = backend.count_composites(),
        "done"
    );
}
