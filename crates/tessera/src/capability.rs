//! Capability tokens and probing.
//!
//! A capability is anything an owner can index objects by: a concrete object
//! type, or one of the runtime capabilities ([`ObjectOwner`], [`Control`],
//! `dyn Updatable`, `dyn Drawable`). Tokens are derived from [`TypeId`], so
//! they are stable for the life of the process.

use crate::{
    control::Control,
    object::Object,
    owner::ObjectOwner,
    update::Updatable,
    view::Drawable,
};
use bitflags::bitflags;
use std::any::{TypeId, type_name};
use std::fmt;

/// Registry key of a capability.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityKey {
    type_id: TypeId,
    name: &'static str,
}

impl CapabilityKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityKey({})", self.name)
    }
}

/// A view of an object that owners can register and query it under.
pub trait Capability: 'static {
    fn key() -> CapabilityKey {
        CapabilityKey::of::<Self>()
    }

    fn project(object: &dyn Object) -> Option<&Self>;

    fn project_mut(object: &mut dyn Object) -> Option<&mut Self>;
}

impl<T: Object> Capability for T {
    fn project(object: &dyn Object) -> Option<&Self> {
        object.downcast_ref()
    }

    fn project_mut(object: &mut dyn Object) -> Option<&mut Self> {
        object.downcast_mut()
    }
}

impl Capability for ObjectOwner {
    fn project(object: &dyn Object) -> Option<&Self> {
        object.as_owner()
    }

    fn project_mut(object: &mut dyn Object) -> Option<&mut Self> {
        object.as_owner_mut()
    }
}

impl Capability for Control {
    fn project(object: &dyn Object) -> Option<&Self> {
        object.as_control()
    }

    fn project_mut(object: &mut dyn Object) -> Option<&mut Self> {
        object.as_control_mut()
    }
}

impl Capability for dyn Updatable {
    fn project(object: &dyn Object) -> Option<&Self> {
        object.as_updatable()
    }

    fn project_mut(object: &mut dyn Object) -> Option<&mut Self> {
        object.as_updatable_mut()
    }
}

impl Capability for dyn Drawable {
    fn project(object: &dyn Object) -> Option<&Self> {
        object.as_drawable()
    }

    fn project_mut(object: &mut dyn Object) -> Option<&mut Self> {
        object.as_drawable_mut()
    }
}

bitflags! {
    /// Runtime capabilities found on an object when it was created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        const OWNER     = 1 << 0;
        const CONTROL   = 1 << 1;
        const UPDATABLE = 1 << 2;
        const DRAWABLE  = 1 << 3;
    }
}

fn is_owner(object: &dyn Object) -> bool {
    object.as_owner().is_some()
}

fn is_control(object: &dyn Object) -> bool {
    object.as_control().is_some()
}

fn is_updatable(object: &dyn Object) -> bool {
    object.as_updatable().is_some()
}

fn is_drawable(object: &dyn Object) -> bool {
    object.as_drawable().is_some()
}

/// Checks run against new objects, in order.
const CHECKS: [(Capabilities, fn(&dyn Object) -> bool); 4] = [
    (Capabilities::OWNER, is_owner),
    (Capabilities::CONTROL, is_control),
    (Capabilities::UPDATABLE, is_updatable),
    (Capabilities::DRAWABLE, is_drawable),
];

/// Capabilities `object` exposes.
pub fn detect(object: &dyn Object) -> Capabilities {
    CHECKS
        .iter()
        .filter(|(_, has)| has(object))
        .fold(Capabilities::empty(), |found, (flag, _)| found | *flag)
}
