//! Object ownership and the capability registry.

use crate::{
    capability::{self, Capabilities, Capability, CapabilityKey},
    id::ObjectId,
    object::{Object, ObjectCore, Services, Spawn, init_once},
};
use indexmap::IndexMap;
use std::fmt;
use tessera_core::{
    alloc::{
        HashMap,
        sparse_set::{IndexSlot, SparseSet},
    },
    profiling::profile_function,
};
use tessera_event::Event;

/// Random draws tried before `create` gives up on finding a free id.
const ID_ATTEMPTS: usize = 8;

struct Entry {
    object: Box<dyn Object>,
    capabilities: Capabilities,
}

/// Callbacks an owner runs inside `create` and `delete`, before the public
/// events fire.
///
/// Composites use this to index their children.
pub trait OwnerHooks {
    /// The object is stored and registered under its own type, but not yet
    /// initialized.
    fn object_created(&mut self, _owner: &mut ObjectOwner, _id: ObjectId, _capabilities: Capabilities) {}

    /// The object has left every capability map but is still stored.
    fn object_deleted(&mut self, _owner: &ObjectOwner, _id: ObjectId, _capabilities: Capabilities) {}
}

/// Hooks that do nothing.
pub struct NoHooks;

impl OwnerHooks for NoHooks {}

/// Exclusive owner of a set of objects.
///
/// Objects live in a generational arena. Besides the id → slot map, the owner
/// keeps one ordered id → slot map per capability key, so objects can be
/// queried by type or capability without scanning the whole store.
///
/// # Example
///
/// ```rust,ignore
/// let mut owner = ObjectOwner::new(ObjectId(0), "root", services);
/// let label = owner.create::<Label>("title")?;
/// let id = label.core().id();
/// assert_eq!(owner.get_all::<Label>().len(), 1);
/// assert!(owner.delete(id));
/// ```
pub struct ObjectOwner {
    identity: ObjectId,
    name: String,
    services: Services,
    objects: SparseSet<Entry>,
    by_id: HashMap<ObjectId, IndexSlot>,
    registry: HashMap<CapabilityKey, IndexMap<ObjectId, IndexSlot>>,
    /// Raised inside `create`, after the object is stored and registered.
    pub object_created: Event<ObjectOwner, dyn Object>,
    /// Raised once a created object initialized successfully.
    pub object_initialized: Event<ObjectOwner, dyn Object>,
    /// Raised inside `delete`, while the object is still stored.
    pub object_deleted: Event<ObjectOwner, dyn Object>,
}

impl ObjectOwner {
    /// `identity` is the id children report as their owner.
    pub fn new(identity: ObjectId, name: impl Into<String>, services: Services) -> Self {
        Self {
            identity,
            name: name.into(),
            services,
            objects: SparseSet::new(),
            by_id: HashMap::default(),
            registry: HashMap::default(),
            object_created: Event::new(),
            object_initialized: Event::new(),
            object_deleted: Event::new(),
        }
    }

    /// Id that children of this owner report as their owner.
    pub fn identity(&self) -> ObjectId {
        self.identity
    }

    /// Display name of this owner.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Services handed to every object this owner builds.
    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Create a `T` through [`Spawn`]. See [`create_hooked`](Self::create_hooked).
    pub fn create<T: Spawn>(&mut self, name: &str) -> Option<&mut T> {
        self.create_hooked(name, T::spawn, &mut NoHooks)
    }

    /// Create an object built by `build` instead of [`Spawn`].
    pub fn create_with<T: Object>(
        &mut self,
        name: &str,
        build: impl FnOnce(ObjectCore, &Services) -> T,
    ) -> Option<&mut T> {
        self.create_hooked(name, build, &mut NoHooks)
    }

    /// Create, register and initialize a new object.
    ///
    /// Returns `None` if no free id could be drawn or initialization failed.
    /// A failed object is deleted again, so the owner ends up exactly as it
    /// was before the call.
    pub fn create_hooked<T: Object>(
        &mut self,
        name: &str,
        build: impl FnOnce(ObjectCore, &Services) -> T,
        hooks: &mut dyn OwnerHooks,
    ) -> Option<&mut T> {
        profile_function!();
        let id = self.allocate_id()?;
        let object = build(ObjectCore::new(id, Some(self.identity), name), &self.services);
        let capabilities = capability::detect(&object);

        let slot = self.objects.push(Entry {
            object: Box::new(object),
            capabilities,
        });
        self.by_id.insert(id, slot);
        self.registry
            .entry(T::key())
            .or_default()
            .insert(id, slot);
        tracing::debug!(owner = %self.name, object = %id, name, ?capabilities, "object created");

        hooks.object_created(self, id, capabilities);
        if let Some(entry) = self.objects.try_get(slot) {
            self.object_created.invoke(self, entry.object.as_ref());
        }

        let Some(entry) = self.objects.try_get_mut(slot) else {
            tracing::warn!(owner = %self.name, object = %id, "object deleted during creation");
            return None;
        };
        if let Err(err) = init_once(entry.object.as_mut()) {
            tracing::warn!(owner = %self.name, object = %id, name, "initialization failed, rolling back: {err}");
            self.delete_hooked(id, hooks);
            return None;
        }

        let entry = self.objects.try_get(slot)?;
        self.object_initialized.invoke(self, entry.object.as_ref());
        self.objects
            .try_get_mut(slot)?
            .object
            .as_mut()
            .downcast_mut::<T>()
    }

    fn allocate_id(&self) -> Option<ObjectId> {
        for _ in 0..ID_ATTEMPTS {
            let id = self.services.ids.next_id();
            if !self.by_id.contains_key(&id) {
                return Some(id);
            }
            tracing::debug!(owner = %self.name, object = %id, "id collision, drawing again");
        }
        tracing::warn!(owner = %self.name, "no free object id after {ID_ATTEMPTS} attempts");
        None
    }

    /// Register an owned object under the extra capability `T`.
    ///
    /// Returns `false` (and logs) if the object is not owned here or does not
    /// have the capability.
    pub fn register<T: Capability + ?Sized>(&mut self, id: ObjectId) -> bool {
        let Some(&slot) = self.by_id.get(&id) else {
            tracing::warn!(owner = %self.name, object = %id, capability = T::key().type_name(), "register of an object this owner does not own");
            return false;
        };
        if T::project(self.objects.get(slot).object.as_ref()).is_none() {
            tracing::warn!(owner = %self.name, object = %id, capability = T::key().type_name(), "object lacks the capability it is registered under");
            return false;
        }
        self.registry.entry(T::key()).or_default().insert(id, slot);
        true
    }

    /// Delete the object `id`. `false` if this owner does not store it.
    pub fn delete(&mut self, id: ObjectId) -> bool {
        self.delete_hooked(id, &mut NoHooks)
    }

    /// Unregister, announce and drop an object. `false` for unknown ids.
    pub fn delete_hooked(&mut self, id: ObjectId, hooks: &mut dyn OwnerHooks) -> bool {
        profile_function!();
        let Some(&slot) = self.by_id.get(&id) else {
            return false;
        };
        self.registry.retain(|_, ids| {
            ids.shift_remove(&id);
            !ids.is_empty()
        });

        let capabilities = self.objects.get(slot).capabilities;
        hooks.object_deleted(self, id, capabilities);
        self.object_deleted
            .invoke(self, self.objects.get(slot).object.as_ref());

        self.by_id.remove(&id);
        let entry = self.objects.remove(slot);
        tracing::debug!(owner = %self.name, object = %id, name = entry.object.as_ref().name(), "object deleted");
        true
    }

    /// Delete every object, in storage order.
    pub fn clear(&mut self) {
        self.clear_hooked(&mut NoHooks);
    }

    /// [`clear`](Self::clear), running `hooks` for every object.
    pub fn clear_hooked(&mut self, hooks: &mut dyn OwnerHooks) {
        for id in self.ids() {
            self.delete_hooked(id, hooks);
        }
    }

    /// The object `id`, if this owner stores it.
    pub fn get(&self, id: ObjectId) -> Option<&dyn Object> {
        let slot = *self.by_id.get(&id)?;
        self.objects.try_get(slot).map(|entry| entry.object.as_ref())
    }

    /// Mutable access to the object `id`.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Object> {
        let slot = *self.by_id.get(&id)?;
        self.objects
            .try_get_mut(slot)
            .map(|entry| entry.object.as_mut())
    }

    /// The object viewed as `T`, whether or not it is registered under `T`.
    pub fn get_as<T: Capability + ?Sized>(&self, id: ObjectId) -> Option<&T> {
        T::project(self.get(id)?)
    }

    /// Mutable access to the object `id` viewed as `T`.
    pub fn get_as_mut<T: Capability + ?Sized>(&mut self, id: ObjectId) -> Option<&mut T> {
        T::project_mut(self.get_mut(id)?)
    }

    /// Whether this owner stores `id`.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Capabilities detected when `id` was created.
    pub fn capabilities_of(&self, id: ObjectId) -> Option<Capabilities> {
        let slot = *self.by_id.get(&id)?;
        self.objects.try_get(slot).map(|entry| entry.capabilities)
    }

    /// Whether `id` is registered under `T`.
    pub fn is_registered<T: Capability + ?Sized>(&self, id: ObjectId) -> bool {
        self.registry
            .get(&T::key())
            .is_some_and(|ids| ids.contains_key(&id))
    }

    fn registered<T: Capability + ?Sized>(&self) -> impl Iterator<Item = (ObjectId, &T)> {
        self.registry
            .get(&T::key())
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(|(&id, &slot)| {
                let entry = self.objects.try_get(slot)?;
                T::project(entry.object.as_ref()).map(|object| (id, object))
            })
    }

    /// Objects registered under `T`, in registration order.
    pub fn get_all<T: Capability + ?Sized>(&self) -> Vec<&T> {
        self.registered::<T>().map(|(_, object)| object).collect()
    }

    /// Ids registered under `T`, in registration order.
    pub fn ids_of<T: Capability + ?Sized>(&self) -> Vec<ObjectId> {
        self.registry
            .get(&T::key())
            .map(|ids| ids.keys().copied().collect())
            .unwrap_or_default()
    }

    /// First object registered under `T` that matches `predicate`.
    pub fn find<T: Capability + ?Sized>(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.registered::<T>()
            .map(|(_, object)| object)
            .find(|object| predicate(object))
    }

    /// Every object registered under `T` that matches `predicate`.
    pub fn find_all<T: Capability + ?Sized>(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.registered::<T>()
            .map(|(_, object)| object)
            .filter(|object| predicate(object))
            .collect()
    }

    /// First owned object matching `predicate`, regardless of registration.
    pub fn find_any(&self, predicate: impl Fn(&dyn Object) -> bool) -> Option<&dyn Object> {
        self.iter().find(|object| predicate(*object))
    }

    /// Every owned object matching `predicate`, regardless of registration.
    pub fn find_all_any(&self, predicate: impl Fn(&dyn Object) -> bool) -> Vec<&dyn Object> {
        self.iter().filter(|object| predicate(*object)).collect()
    }

    /// Every owned object, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Object> {
        self.objects.iter().map(|entry| entry.object.as_ref())
    }

    /// Ids of every owned object, in storage order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.iter().map(|object| object.id()).collect()
    }

    /// Capability keys with at least one registered object.
    pub fn capability_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of owned objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether this owner stores no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Debug for ObjectOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectOwner")
            .field("identity", &self.identity)
            .field("name", &self.name)
            .field("objects", &self.objects.len())
            .field("capabilities", &self.capability_count())
            .finish()
    }
}
