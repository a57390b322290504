//! Child indexing and the two-phase update/draw traversal.

use crate::{
    capability::Capabilities,
    collection::{Collection, Handle},
    control::Control,
    id::ObjectId,
    object::{Object, ObjectCore, Services, Spawn},
    owner::{ObjectOwner, OwnerHooks},
    update::{UpdateContext, Updatable},
    view::{Canvas, DirtyFlag, Drawable},
};
use tessera_core::{alloc::HashMap, profiling::profile_scope};
use tessera_event::SubscriptionId;

/// Per-composite cache of which children are updatable and drawable.
pub struct ChildIndex {
    updatables: Collection<Handle<dyn Updatable>>,
    drawables: Collection<Handle<dyn Drawable>>,
    wiring: HashMap<ObjectId, SubscriptionId>,
    parent_dirty: DirtyFlag,
}

impl ChildIndex {
    pub fn new(parent_dirty: DirtyFlag) -> Self {
        Self {
            updatables: Collection::new(),
            drawables: Collection::new(),
            wiring: HashMap::default(),
            parent_dirty,
        }
    }
}

impl OwnerHooks for ChildIndex {
    fn object_created(&mut self, owner: &mut ObjectOwner, id: ObjectId, capabilities: Capabilities) {
        if capabilities.contains(Capabilities::OWNER) {
            owner.register::<ObjectOwner>(id);
        }
        if capabilities.contains(Capabilities::CONTROL) {
            owner.register::<Control>(id);
        }
        if capabilities.contains(Capabilities::UPDATABLE) {
            owner.register::<dyn Updatable>(id);
            self.updatables.add(Handle::new(id));
        }
        if capabilities.contains(Capabilities::DRAWABLE) {
            owner.register::<dyn Drawable>(id);
            self.drawables.add(Handle::new(id));
            if let Some(drawable) = owner.get_as::<dyn Drawable>(id) {
                let parent = self.parent_dirty.clone();
                let subscription = drawable
                    .view()
                    .position_changed
                    .subscribe(move |_, _| parent.mark());
                self.wiring.insert(id, subscription);
            }
        }
    }

    fn object_deleted(&mut self, owner: &ObjectOwner, id: ObjectId, _capabilities: Capabilities) {
        self.updatables.remove(&Handle::new(id));
        if self.drawables.remove(&Handle::new(id)) {
            self.parent_dirty.mark();
        }
        if let Some(subscription) = self.wiring.remove(&id) {
            if let Some(drawable) = owner.get_as::<dyn Drawable>(id) {
                drawable.view().position_changed.unsubscribe(subscription);
            }
        }
    }
}

/// Aggregate counts over an object tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectCounts {
    pub objects: usize,
    pub updatables: usize,
    pub drawables: usize,
}

/// An owner together with the index of its updatable and drawable children.
///
/// Both [`Control`] and [`Form`](crate::Form) are built on this.
pub struct Composite {
    owner: ObjectOwner,
    index: ChildIndex,
}

impl Composite {
    /// `parent_dirty` is marked whenever a drawable child moves or leaves.
    pub fn new(
        identity: ObjectId,
        name: impl Into<String>,
        services: Services,
        parent_dirty: DirtyFlag,
    ) -> Self {
        Self {
            owner: ObjectOwner::new(identity, name, services),
            index: ChildIndex::new(parent_dirty),
        }
    }

    pub fn owner(&self) -> &ObjectOwner {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut ObjectOwner {
        &mut self.owner
    }

    pub fn create<T: Spawn>(&mut self, name: &str) -> Option<&mut T> {
        self.owner.create_hooked(name, T::spawn, &mut self.index)
    }

    pub fn create_with<T: Object>(
        &mut self,
        name: &str,
        build: impl FnOnce(ObjectCore, &Services) -> T,
    ) -> Option<&mut T> {
        self.owner.create_hooked(name, build, &mut self.index)
    }

    pub fn delete(&mut self, id: ObjectId) -> bool {
        self.owner.delete_hooked(id, &mut self.index)
    }

    /// Delete every child.
    pub fn clear(&mut self) {
        self.owner.clear_hooked(&mut self.index);
    }

    pub fn updatables(&self) -> &Collection<Handle<dyn Updatable>> {
        &self.index.updatables
    }

    pub fn drawables(&self) -> &Collection<Handle<dyn Drawable>> {
        &self.index.drawables
    }

    /// Update phase: every updatable child, pre-order.
    ///
    /// Deletions requested through [`UpdateContext::request_delete`] are
    /// applied after all children have been visited.
    pub fn update(&mut self, ctx: &UpdateContext) {
        profile_scope!("composite_update");
        let mut doomed = Vec::new();
        for handle in self.index.updatables.snapshot() {
            let Some(object) = self.owner.get_mut(handle.id()) else {
                continue;
            };
            let mut child_ctx = ctx.for_child();
            update_node(object, &mut child_ctx);
            if child_ctx.is_delete_requested() {
                doomed.push(handle.id());
            }
        }
        for id in doomed {
            self.delete(id);
        }
    }

    /// Whether any drawable child (or descendant) needs a redraw.
    pub fn is_dirty(&self) -> bool {
        self.index
            .drawables
            .iter()
            .filter_map(|handle| self.owner.get(handle.id()))
            .any(needs_redraw)
    }

    /// Draw phase for the children: redraw every dirty child subtree.
    ///
    /// Returns `true` if any child was redrawn, in which case the caller has
    /// to redraw and composite itself.
    pub fn draw_children(&mut self) -> bool {
        profile_scope!("composite_draw");
        let mut redrawn = false;
        for handle in self.index.drawables.snapshot() {
            if let Some(object) = self.owner.get_mut(handle.id()) {
                redrawn |= draw_node(object);
            }
        }
        redrawn
    }

    /// Composite each drawable child's surface at its position.
    pub fn composite_onto(&self, canvas: &Canvas) {
        for handle in &self.index.drawables {
            let Some(object) = self.owner.get(handle.id()) else {
                continue;
            };
            if object.core().has_error() {
                continue;
            }
            let Some(view) = object.as_drawable().map(Drawable::view) else {
                continue;
            };
            if let Some(surface) = view.surface() {
                canvas.composite(surface, view.position());
            }
        }
    }

    /// Counts over this composite's whole subtree.
    pub fn counts(&self) -> ObjectCounts {
        let mut counts = ObjectCounts {
            objects: self.owner.object_count(),
            updatables: self.index.updatables.len(),
            drawables: self.index.drawables.len(),
        };
        for object in self.owner.iter() {
            if let Some(control) = object.as_control() {
                let nested = control.composite().counts();
                counts.objects += nested.objects;
                counts.updatables += nested.updatables;
                counts.drawables += nested.drawables;
            }
        }
        counts
    }
}

/// Update `object`, then its children if it is a control.
pub fn update_node(object: &mut dyn Object, ctx: &mut UpdateContext) {
    if object.core().has_error() {
        return;
    }
    if let Some(updatable) = object.as_updatable_mut() {
        updatable.update(ctx);
    }
    if let Some(control) = object.as_control_mut() {
        control.composite_mut().update(ctx);
    }
}

/// Whether `object` or any of its drawable descendants is dirty.
pub fn needs_redraw(object: &dyn Object) -> bool {
    if object.core().has_error() {
        return false;
    }
    object
        .as_drawable()
        .is_some_and(|drawable| drawable.view().is_dirty())
        || object
            .as_control()
            .is_some_and(|control| control.composite().is_dirty())
}

/// Draw phase for one subtree, post-order.
///
/// Dirty children are redrawn first. The object itself is redrawn if it was
/// dirty or any child was redrawn: background, own content, then each child
/// composited at its position. Returns whether anything was redrawn.
pub fn draw_node(object: &mut dyn Object) -> bool {
    if object.core().has_error() {
        return false;
    }
    let children_redrawn = object
        .as_control_mut()
        .is_some_and(|control| control.composite_mut().draw_children());

    let Some(view) = object.as_drawable().map(Drawable::view) else {
        return children_redrawn;
    };
    if !children_redrawn && !view.is_dirty() {
        return false;
    }
    let Some(canvas) = view.canvas() else {
        return children_redrawn;
    };

    if let Some(control) = object.as_control() {
        control.draw_background(&canvas);
    }
    if let Some(drawable) = object.as_drawable_mut() {
        drawable.draw(&canvas);
    }
    if let Some(control) = object.as_control() {
        control.composite().composite_onto(&canvas);
    }
    canvas.present();
    if let Some(drawable) = object.as_drawable() {
        drawable.view().dirty().clear();
    }
    true
}
