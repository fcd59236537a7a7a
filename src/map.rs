use crate::error::Result;

/// Describes what a map is. Both [`OrderedMap`](crate::OrderedMap) and
/// [`ChainedHashMap`](crate::ChainedHashMap) implement it, so code that only
/// needs the contract (benchmarks, shared tests) can be written once.
///
/// Cursors borrow their map, so they can't be held across a mutation. A
/// [`Map::Position`] is the detached form of a cursor: it can be kept around
/// and handed back to [`Map::remove_at`]. A position whose node has been
/// removed in the meantime is refused with `InvalidIterator`.
pub trait Map<K, V> {
    /// A detached cursor location.
    type Position: Copy;

    /// Get a mutable reference to the value at `key`, inserting a default
    /// value first if the key isn't there yet.
    fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default;

    /// Inserts an entry, returning the previous value at that key.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Get the value at `key`, or `KeyNotFound`.
    fn lookup(&self, key: &K) -> Result<&V>;

    /// Get a mutable reference to the value at `key`, or `KeyNotFound`.
    fn lookup_mut(&mut self, key: &K) -> Result<&mut V>;

    fn contains_key(&self, key: &K) -> bool {
        self.lookup(key).is_ok()
    }

    /// Where `key` lives, or the end position if it doesn't.
    fn locate(&self, key: &K) -> Self::Position;

    /// Bust a move, returning whatever was there. `KeyNotFound` leaves the map
    /// untouched.
    fn remove(&mut self, key: &K) -> Result<V>;

    /// Remove the entry at a position previously handed out by this map.
    fn remove_at(&mut self, position: Self::Position) -> Result<(K, V)>;

    /// Drops every entry.
    fn clear(&mut self);

    /// The number of entries stored right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
