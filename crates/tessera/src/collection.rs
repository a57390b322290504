//! Non-owning handles and the ordered collections composites keep them in.

use crate::{capability::Capability, id::ObjectId, owner::ObjectOwner};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    ops::Index,
};

/// Non-owning reference to an object viewed as `T`.
///
/// A handle never keeps its object alive; [`resolve`](Handle::resolve)
/// returns `None` once the object has been deleted.
pub struct Handle<T: ?Sized> {
    id: ObjectId,
    _marker: PhantomData<fn() -> *const T>,
}

impl<T: ?Sized> Handle<T> {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl<T: Capability + ?Sized> Handle<T> {
    pub fn resolve<'a>(&self, owner: &'a ObjectOwner) -> Option<&'a T> {
        owner.get_as::<T>(self.id)
    }

    pub fn resolve_mut<'a>(&self, owner: &'a mut ObjectOwner) -> Option<&'a mut T> {
        owner.get_as_mut::<T>(self.id)
    }
}

impl<T: ?Sized> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Handle<T> {}

impl<T: ?Sized> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: ?Sized> Eq for Handle<T> {}

impl<T: ?Sized> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.id)
    }
}

/// Ordered list without duplicates.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item`. Returns `false` and leaves the collection untouched if
    /// it is already present.
    pub fn add(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Insert `item` at `index`, or append it when `index` is past the end.
    pub fn insert(&mut self, index: usize, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        true
    }

    pub fn remove(&mut self, item: &T) -> bool {
        match self.index_of(item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.iter().position(|candidate| candidate == item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Forward iterator; call `.rev()` for reverse order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn find_all(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq + Clone> Collection<T> {
    /// Copy of the current items, for iterating while the collection changes.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Index<usize> for Collection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
