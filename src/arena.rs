//! Node storage shared by both maps. All nodes of a map live flattened in one
//! Vec and are addressed by their position in it, so links between nodes are
//! plain indices rather than pointers. Vacated slots are freelisted and reused
//! by later insertions.
//!
//! Every slot carries a generation which is bumped when its node is removed.
//! A [`NodeHandle`] remembers the generation it was issued with, so a handle
//! to a removed node stops resolving instead of silently pointing at whatever
//! node reused the slot.

use std::ops::{Index, IndexMut};

/// The index of a node in an arena's storage vec, plus the generation of the
/// slot when the node was put there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeHandle {
    index: usize,
    generation: u32,
}

#[derive(Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    /// The slots, occupied or not.
    store: Vec<Slot<T>>,

    /// Slots which aren't in use anymore. These will be reused.
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// The number of live nodes.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    /// Stores t and returns a handle to it.
    pub(crate) fn insert(&mut self, t: T) -> NodeHandle {
        // use the first available location in the storage vec, or grow it
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.store[index];
                slot.value = Some(t);
                NodeHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.store.push(Slot {
                    generation: 0,
                    value: Some(t),
                });
                NodeHandle {
                    index: self.store.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Takes the node out of the arena. The handle, and every copy of it, is
    /// dead afterwards.
    pub(crate) fn remove(&mut self, handle: NodeHandle) -> Option<T> {
        let slot = self.store.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        Some(value)
    }

    pub(crate) fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.store
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub(crate) fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        self.store
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, handle: NodeHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Drops every node. Does not free the underlying buffers, and retires
    /// every outstanding handle.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.store.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(index);
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Links held inside a map always point at live nodes, so indexing with one
// that doesn't resolve means the structure itself is broken.
impl<T> Index<NodeHandle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: NodeHandle) -> &T {
        match self.get(handle) {
            Some(t) => t,
            None => panic!("dangling node link {:?}", handle),
        }
    }
}

impl<T> IndexMut<NodeHandle> for Arena<T> {
    fn index_mut(&mut self, handle: NodeHandle) -> &mut T {
        match self.get_mut(handle) {
            Some(t) => t,
            None => panic!("dangling node link {:?}", handle),
        }
    }
}
