//! Object identity and lifecycle.
//!
//! Every object owns an [`ObjectCore`] and exposes its optional capabilities
//! through the query methods of [`Object`]:
//!
//! ```rust,ignore
//! fn tick(object: &mut dyn Object, ctx: &mut UpdateContext) {
//!     if let Some(updatable) = object.as_updatable_mut() {
//!         updatable.update(ctx);
//!     }
//! }
//! ```

use crate::{
    control::Control,
    error::InitError,
    id::{IdGenerator, ObjectId},
    owner::ObjectOwner,
    update::Updatable,
    view::Drawable,
};
use std::{any::Any, fmt, sync::Arc};
use tessera_event::Event;
use tessera_test_utils::RenderBackend;

/// Identity and lifecycle state shared by every object.
pub struct ObjectCore {
    id: ObjectId,
    owner: Option<ObjectId>,
    name: String,
    initialized: bool,
    error: u32,
    /// Raised with the new code whenever a non-zero error is set.
    pub error_encountered: Event<ObjectCore, u32>,
}

impl ObjectCore {
    pub fn new(id: ObjectId, owner: Option<ObjectId>, name: impl Into<String>) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            initialized: false,
            error: 0,
            error_encountered: Event::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Id of the object whose owner stores this one. Never keeps it alive.
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    pub fn error(&self) -> u32 {
        self.error
    }

    /// Objects with an error are skipped by update and draw.
    pub fn has_error(&self) -> bool {
        self.error != 0
    }

    /// Set the error code. A non-zero code raises `error_encountered`; zero
    /// clears the error silently.
    pub fn set_error(&mut self, code: u32) {
        self.error = code;
        if code != 0 {
            tracing::warn!(object = %self.id, name = %self.name, code, "object entered error state");
            self.error_encountered.invoke(self, &code);
        }
    }
}

impl fmt::Debug for ObjectCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCore")
            .field("id", &self.id)
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("initialized", &self.initialized)
            .field("error", &self.error)
            .finish()
    }
}

/// Upcast to [`Any`] for concrete-type downcasts.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A runtime-identified entity stored by an [`ObjectOwner`].
///
/// # Capability queries
///
/// Capabilities are exposed through query methods that return `None` by
/// default. An object that is updatable overrides `as_updatable` and
/// `as_updatable_mut` to return `Some(self)`. An object that embeds a
/// [`Control`] returns it from `as_control`, which also makes it an owner,
/// updatable and drawable through the control unless those queries are
/// overridden as well.
pub trait Object: AsAny + 'static {
    fn core(&self) -> &ObjectCore;

    fn core_mut(&mut self) -> &mut ObjectCore;

    /// One-time setup, run by the owner right after creation.
    ///
    /// An error makes the owner delete the object again.
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    fn as_owner(&self) -> Option<&ObjectOwner> {
        self.as_control().map(Control::owner)
    }

    fn as_owner_mut(&mut self) -> Option<&mut ObjectOwner> {
        self.as_control_mut().map(Control::owner_mut)
    }

    fn as_control(&self) -> Option<&Control> {
        None
    }

    fn as_control_mut(&mut self) -> Option<&mut Control> {
        None
    }

    fn as_updatable(&self) -> Option<&dyn Updatable> {
        self.as_control().map(|control| control as &dyn Updatable)
    }

    fn as_updatable_mut(&mut self) -> Option<&mut dyn Updatable> {
        self.as_control_mut()
            .map(|control| control as &mut dyn Updatable)
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        self.as_control().map(|control| control as &dyn Drawable)
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        self.as_control_mut()
            .map(|control| control as &mut dyn Drawable)
    }
}

impl dyn Object {
    pub fn id(&self) -> ObjectId {
        self.core().id()
    }

    pub fn name(&self) -> &str {
        self.core().name()
    }

    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// Shared services handed to every object at construction.
#[derive(Clone)]
pub struct Services {
    pub ids: Arc<IdGenerator>,
    pub backend: Arc<dyn RenderBackend>,
}

impl Services {
    /// Services using the process-wide id generator.
    pub fn new(backend: Arc<dyn RenderBackend>) -> Self {
        Self {
            ids: IdGenerator::shared(),
            backend,
        }
    }

    pub fn with_ids(mut self, ids: Arc<IdGenerator>) -> Self {
        self.ids = ids;
        self
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Objects an owner can build from a name alone.
pub trait Spawn: Object + Sized {
    fn spawn(core: ObjectCore, services: &Services) -> Self;
}

/// Run the one-time initialization of `object`.
///
/// Allocates the surface of a drawable object, then calls [`Object::init`].
/// Returns `Ok` without doing anything if the object is already initialized.
pub fn init_once(object: &mut dyn Object) -> Result<(), InitError> {
    if object.core().is_initialized() {
        return Ok(());
    }
    if let Some(drawable) = object.as_drawable_mut() {
        drawable.view_mut().allocate()?;
    }
    object.init()?;
    object.core_mut().mark_initialized();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Plain {
        core: ObjectCore,
        inits: u32,
    }

    impl Object for Plain {
        fn core(&self) -> &ObjectCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut ObjectCore {
            &mut self.core
        }

        fn init(&mut self) -> Result<(), InitError> {
            self.inits += 1;
            Ok(())
        }
    }

    #[test]
    fn test_init_once_runs_init_a_single_time() {
        let mut plain = Plain {
            core: ObjectCore::new(ObjectId(1), None, "plain"),
            inits: 0,
        };
        init_once(&mut plain).unwrap();
        init_once(&mut plain).unwrap();
        assert_eq!(plain.inits, 1);
        assert!(plain.core.is_initialized());
    }

    #[test]
    fn test_plain_object_has_no_capabilities() {
        let plain = Plain {
            core: ObjectCore::new(ObjectId(1), None, "plain"),
            inits: 0,
        };
        let object: &dyn Object = &plain;
        assert!(object.as_owner().is_none());
        assert!(object.as_updatable().is_none());
        assert!(object.as_drawable().is_none());
        assert!(object.downcast_ref::<Plain>().is_some());
        assert_eq!(object.name(), "plain");
    }

    #[test]
    fn test_set_error_raises_event_for_non_zero_codes() {
        let mut core = ObjectCore::new(ObjectId(7), Some(ObjectId(1)), "faulty");
        let last = Arc::new(AtomicU32::new(0));
        let seen = last.clone();
        core.error_encountered.subscribe(move |sender, code| {
            assert_eq!(sender.id(), ObjectId(7));
            seen.store(*code, Ordering::SeqCst);
        });

        core.set_error(3);
        assert!(core.has_error());
        assert_eq!(last.load(Ordering::SeqCst), 3);

        core.set_error(0);
        assert!(!core.has_error());
        assert_eq!(last.load(Ordering::SeqCst), 3);
    }
}
