//! Controls: drawable composites that own child objects.

use crate::{
    composite::Composite,
    id::ObjectId,
    object::{Object, ObjectCore, Services, Spawn},
    owner::ObjectOwner,
    update::{UpdateContext, Updatable},
    view::{Canvas, Drawable, View},
};
use std::fmt;
use tessera_event::Event;
use tessera_test_utils::Color;

/// Composite state embedded by objects that own children and render them.
///
/// An object embedding a control returns it from [`Object::as_control`]. That
/// alone makes it updatable and drawable through the control; objects with
/// their own `update` or `draw` override `as_updatable` and `as_drawable` and
/// forward [`Drawable::view`] to [`Control::view`]. During
/// the draw phase the runtime clears the control's surface with its
/// background, calls the object's own `draw`, then composites its children.
pub struct Control {
    composite: Composite,
    view: View,
    background: Color,
    pub background_changed: Event<Control, Color>,
}

impl Control {
    pub fn new(core: &ObjectCore, services: &Services) -> Self {
        let view = View::new(services.backend.clone());
        let composite = Composite::new(
            core.id(),
            core.name(),
            services.clone(),
            view.dirty().clone(),
        );
        Self {
            composite,
            view,
            background: Color::BLACK,
            background_changed: Event::new(),
        }
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

    pub fn composite_mut(&mut self) -> &mut Composite {
        &mut self.composite
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn create<T: Spawn>(&mut self, name: &str) -> Option<&mut T> {
        self.composite.create(name)
    }

    pub fn delete(&mut self, id: ObjectId) -> bool {
        self.composite.delete(id)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        if self.background == color {
            return;
        }
        self.background = color;
        self.view.mark_dirty();
        self.background_changed.invoke(self, &color);
    }

    pub fn draw_background(&self, canvas: &Canvas) {
        canvas.clear(self.background);
    }
}

/// Ticking a control does nothing by itself; its children are updated by the
/// traversal.
impl Updatable for Control {
    fn update(&mut self, _ctx: &mut UpdateContext) {}
}

impl Drawable for Control {
    fn view(&self) -> &View {
        &self.view
    }

    fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("owner", self.composite.owner())
            .field("view", &self.view)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

/// Plain container control with no behavior of its own.
pub struct Panel {
    core: ObjectCore,
    control: Control,
}

impl Panel {
    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut Control {
        &mut self.control
    }
}

impl Spawn for Panel {
    fn spawn(core: ObjectCore, services: &Services) -> Self {
        let control = Control::new(&core, services);
        Self { core, control }
    }
}

impl Object for Panel {
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
}
