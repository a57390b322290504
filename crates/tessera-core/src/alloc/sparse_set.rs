//! Generational arena with stable, reusable slots.
//!
//! Every stored value is addressed by an [`IndexSlot`] that packs the slot
//! index together with the slot's generation. Removing a value bumps the
//! generation, so stale handles are detected instead of aliasing whatever
//! reuses the slot later.

use crate::profiling::profile_function;
use std::num::NonZeroU64;

/// Handle into a [`SparseSet`].
///
/// Layout: `generation << 32 | (index + 1)`, which keeps the value non-zero
/// so `Option<IndexSlot>` is the same size as `IndexSlot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexSlot(NonZeroU64);

impl IndexSlot {
    pub fn new(generation: u32, idx: u32) -> Self {
        Self(NonZeroU64::MIN.saturating_add(((generation as u64) << 32) | idx as u64))
    }

    pub fn generation(&self) -> u32 {
        (self.0.get() >> 32) as u32
    }

    pub fn index(&self) -> u32 {
        (self.0.get() & u32::MAX as u64) as u32 - 1
    }
}

static_assertions::assert_eq_size!(IndexSlot, Option<IndexSlot>);

struct Entry<T> {
    generation: u32,
    data: Option<T>,
}

/// Arena of `T` addressed by [`IndexSlot`].
///
/// Iteration follows slot order, which is not insertion order once slots
/// have been reused.
pub struct SparseSet<T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SparseSet<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, data: T) -> IndexSlot {
        profile_function!();
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let entry = &mut self.entries[idx as usize];
            entry.data = Some(data);
            IndexSlot::new(entry.generation, idx)
        } else {
            let idx = self.entries.len() as u32;
            self.entries.push(Entry {
                generation: 0,
                data: Some(data),
            });
            IndexSlot::new(0, idx)
        }
    }

    fn entry(&self, idx: IndexSlot) -> Option<&Entry<T>> {
        self.entries
            .get(idx.index() as usize)
            .filter(|entry| entry.generation == idx.generation())
    }

    fn entry_mut(&mut self, idx: IndexSlot) -> Option<&mut Entry<T>> {
        self.entries
            .get_mut(idx.index() as usize)
            .filter(|entry| entry.generation == idx.generation())
    }

    /// Panics on a stale or foreign handle.
    pub fn get(&self, idx: IndexSlot) -> &T {
        self.try_get(idx).expect("invalid generation, use after free!")
    }

    /// Panics on a stale or foreign handle.
    pub fn get_mut(&mut self, idx: IndexSlot) -> &mut T {
        self.try_get_mut(idx)
            .expect("invalid generation, use after free!")
    }

    pub fn try_get(&self, idx: IndexSlot) -> Option<&T> {
        profile_function!();
        self.entry(idx).and_then(|entry| entry.data.as_ref())
    }

    pub fn try_get_mut(&mut self, idx: IndexSlot) -> Option<&mut T> {
        profile_function!();
        self.entry_mut(idx).and_then(|entry| entry.data.as_mut())
    }

    pub fn contains(&self, idx: IndexSlot) -> bool {
        self.try_get(idx).is_some()
    }

    /// Panics on a stale or foreign handle.
    pub fn remove(&mut self, idx: IndexSlot) -> T {
        self.try_remove(idx)
            .expect("invalid generation, use after free!")
    }

    pub fn try_remove(&mut self, idx: IndexSlot) -> Option<T> {
        profile_function!();
        let entry = self.entry_mut(idx)?;
        let data = entry.data.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(idx.index());
        self.len -= 1;
        Some(data)
    }

    /// Drops every value. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            if entry.data.take().is_some() {
                entry.generation = entry.generation.wrapping_add(1);
                self.free.push(idx as u32);
            }
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.entries.iter().filter_map(|entry| entry.data.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> {
        self.entries
            .iter_mut()
            .filter_map(|entry| entry.data.as_mut())
    }

    /// Live values together with the handle that addresses them.
    pub fn slots(&self) -> impl Iterator<Item = (IndexSlot, &T)> {
        self.entries.iter().enumerate().filter_map(|(idx, entry)| {
            entry
                .data
                .as_ref()
                .map(|data| (IndexSlot::new(entry.generation, idx as u32), data))
        })
    }
}
