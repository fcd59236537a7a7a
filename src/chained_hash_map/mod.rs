//! A hash map made of a fixed row of buckets, each holding a doubly-linked
//! chain of the entries that hash to it.
//!
//! The number of buckets is chosen once, when the map is made, and never
//! changes: the table does not grow or rehash as it fills up. Past a load of a
//! few entries per bucket every operation degrades into a linear scan of a
//! long chain, so pick the bucket count from the number of entries you expect.

mod chain;
mod cursor;

pub use cursor::{Cursor, CursorMut, Iter, Position};

use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt::{self, Debug},
    hash::{BuildHasher, Hash},
    mem,
};

use self::chain::{Bucket, Nodes};
use crate::arena::{Arena, NodeHandle};
use crate::error::{MapError, Result};
use crate::map::Map;

/// How many buckets a map gets when nobody says otherwise.
pub const DEFAULT_BUCKET_COUNT: usize = 10;

/// A hash map with a fixed number of buckets, resolving collisions by
/// chaining.
///
/// Iteration walks the buckets in index order and each chain from head to
/// tail, so entries sharing a bucket come out in the order they went in.
///
/// ```
/// use twin_maps::ChainedHashMap;
///
/// let mut map = ChainedHashMap::with_buckets(4).unwrap();
/// *map.get_or_insert("one") = 1;
/// *map.get_or_insert("two") = 2;
///
/// assert_eq!(Ok(&2), map.lookup("two"));
/// assert_eq!(4, map.bucket_count());
/// ```
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = RandomState> {
    hash_builder: S,
    buckets: Box<[Bucket]>,
    nodes: Nodes<K, V>,
    size: usize,
}

impl<K, V> ChainedHashMap<K, V, RandomState> {
    /// Makes a new map with [`DEFAULT_BUCKET_COUNT`] buckets.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Makes a new map with a specific number of buckets.
    pub fn with_buckets(bucket_count: usize) -> Result<Self> {
        Self::with_buckets_and_hasher(bucket_count, RandomState::new())
    }
}

impl<K, V, S> ChainedHashMap<K, V, S> {
    /// Makes a new map with [`DEFAULT_BUCKET_COUNT`] buckets and the given
    /// hasher.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::build(DEFAULT_BUCKET_COUNT, hash_builder)
    }

    /// Makes a new map with a specific number of buckets and hasher. There
    /// must be at least one bucket.
    pub fn with_buckets_and_hasher(bucket_count: usize, hash_builder: S) -> Result<Self> {
        if bucket_count == 0 {
            return Err(MapError::ZeroBucketCount);
        }
        Ok(Self::build(bucket_count, hash_builder))
    }

    fn build(bucket_count: usize, hash_builder: S) -> Self {
        tracing::debug!(bucket_count, "creating chained hash map");

        Self {
            hash_builder,
            buckets: vec![Bucket::default(); bucket_count].into_boxed_slice(),
            nodes: Arena::new(),
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of buckets, fixed for the life of the map.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// The length of one bucket's chain, or `None` past the last bucket.
    pub fn bucket_len(&self, bucket: usize) -> Option<usize> {
        let mut count = 0;
        let mut current = self.buckets.get(bucket)?.head;
        while let Some(node) = current {
            count += 1;
            current = self.nodes[node].next;
        }
        Some(count)
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// A cursor at the head of the first non-empty bucket, or the end if the
    /// map is empty.
    pub fn begin(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(self, self.first_from(0))
    }

    /// A cursor positioned past the last bucket.
    pub fn end(&self) -> Cursor<'_, K, V, S> {
        Cursor::new(self, self.end_position())
    }

    /// Iterates over the entries bucket by bucket.
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        Iter::new(self)
    }

    /// Drops every entry. The buckets stay.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.iter_mut().for_each(|bucket| *bucket = Bucket::default());
        self.size = 0;
    }

    /// Moves every entry out into a new map, leaving this one empty with the
    /// same bucket count and hasher.
    pub fn take(&mut self) -> Self
    where
        S: Clone,
    {
        let empty = Self::build(self.bucket_count(), self.hash_builder.clone());
        mem::replace(self, empty)
    }

    /// Removes the entry at `position` straight out of its chain, without
    /// hashing anything. Fails with `InvalidIterator` for the end position or
    /// a position whose node is already gone.
    pub fn remove_at(&mut self, position: Position) -> Result<(K, V)> {
        let node = position.node().ok_or(MapError::InvalidIterator)?;
        let removed = self.unlink(position.bucket(), node)?;
        Ok((removed.key, removed.value))
    }

    fn unlink(&mut self, bucket: usize, node: NodeHandle) -> Result<chain::ChainNode<K, V>> {
        let chain = self.buckets.get_mut(bucket).ok_or(MapError::InvalidIterator)?;
        let removed = chain::unlink(&mut self.nodes, chain, node).ok_or(MapError::InvalidIterator)?;
        self.size -= 1;
        Ok(removed)
    }

    fn end_position(&self) -> Position {
        Position::new(self.bucket_count(), None)
    }

    /// The head of the first non-empty bucket at or after `bucket`, or the end.
    fn first_from(&self, bucket: usize) -> Position {
        self.buckets
            .iter()
            .enumerate()
            .skip(bucket)
            .find_map(|(index, chain)| chain.head.map(|head| Position::new(index, Some(head))))
            .unwrap_or_else(|| self.end_position())
    }

    /// The tail of the last non-empty bucket before `bucket`, if any.
    fn last_before(&self, bucket: usize) -> Option<Position> {
        self.buckets[..bucket.min(self.bucket_count())]
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, chain)| chain.tail.map(|tail| Position::new(index, Some(tail))))
    }

    /// The entry after the node at `bucket`, crossing into later buckets when
    /// the chain runs out.
    fn after(&self, bucket: usize, node: NodeHandle) -> Position {
        match self.nodes[node].next {
            Some(next) => Position::new(bucket, Some(next)),
            None => self.first_from(bucket + 1),
        }
    }

    /// The entry before `position`, crossing into earlier buckets when the
    /// chain runs out. The end steps back onto the very last entry.
    fn before(&self, position: Position) -> Option<Position> {
        let prev = position.node().and_then(|node| self.nodes[node].prev);
        match prev {
            Some(prev) => Some(Position::new(position.bucket(), Some(prev))),
            None => self.last_before(position.bucket()),
        }
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Get a mutable reference to the value at `key`. If the key isn't in the
    /// map yet, a node holding a default value is appended to its bucket.
    pub fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let bucket = self.bucket_of(&key);
        let node = match self.scan(bucket, &key) {
            Some(node) => node,
            None => self.attach(bucket, key, V::default()),
        };

        &mut self.nodes[node].value
    }

    /// Inserts a new entry, returning the previous value at that key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_of(&key);
        match self.scan(bucket, &key) {
            Some(node) => Some(mem::replace(&mut self.nodes[node].value, value)),
            None => {
                self.attach(bucket, key, value);
                None
            }
        }
    }

    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let node = self.scan(self.bucket_of(key), key).ok_or(MapError::KeyNotFound)?;
        Ok(&self.nodes[node].value)
    }

    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let node = self.scan(self.bucket_of(key), key).ok_or(MapError::KeyNotFound)?;
        Ok(&mut self.nodes[node].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.scan(self.bucket_of(key), key).is_some()
    }

    /// A cursor at `key`, or the end if the key isn't in the map.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, S>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let position = self.position_of(key);
        Cursor::new(self, position)
    }

    /// A mutable cursor at `key`, or the end if the key isn't in the map.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, S>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let position = self.position_of(key);
        CursorMut::new(self, position)
    }

    /// Removes `key`, returning its value. A missing key is `KeyNotFound`
    /// and leaves the map as it was.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let bucket = self.bucket_of(key);
        let node = self.scan(bucket, key).ok_or(MapError::KeyNotFound)?;
        let removed = self.unlink(bucket, node)?;

        #[cfg(test)]
        self.continuity_test();

        Ok(removed.value)
    }

    fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Walks one bucket's chain looking for `key`.
    fn scan<Q>(&self, bucket: usize, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut current = self.buckets[bucket].head;
        while let Some(node) = current {
            let chain_node = &self.nodes[node];
            if chain_node.key.borrow() == key {
                return Some(node);
            }
            current = chain_node.next;
        }
        None
    }

    fn position_of<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let bucket = self.bucket_of(key);
        match self.scan(bucket, key) {
            Some(node) => Position::new(bucket, Some(node)),
            None => self.end_position(),
        }
    }

    fn attach(&mut self, bucket: usize, key: K, value: V) -> NodeHandle {
        let node = chain::append(&mut self.nodes, &mut self.buckets[bucket], key, value);
        self.size += 1;

        #[cfg(test)]
        self.continuity_test();

        node
    }

    /// Walks every chain both ways, checking the links agree, that every key
    /// sits in the bucket it hashes to, and that the node count matches the
    /// size.
    #[cfg(test)]
    fn continuity_test(&self) {
        assert_eq!(self.size, self.nodes.len());

        let mut total = 0;
        for (index, bucket) in self.buckets.iter().enumerate() {
            assert_eq!(bucket.head.is_none(), bucket.tail.is_none());

            let mut keys: Vec<&K> = Vec::new();
            let mut previous = None;
            let mut current = bucket.head;
            while let Some(node) = current {
                let chain_node = &self.nodes[node];
                assert_eq!(previous, chain_node.prev);
                assert_eq!(index, self.bucket_of(&chain_node.key));
                assert!(!keys.contains(&&chain_node.key));
                keys.push(&chain_node.key);
                assert!(keys.len() <= self.size);

                previous = Some(node);
                current = chain_node.next;
            }
            assert_eq!(previous, bucket.tail);

            let mut count = 0;
            let mut current = bucket.tail;
            while let Some(node) = current {
                count += 1;
                assert!(count <= self.size);
                current = self.nodes[node].prev;
            }
            assert_eq!(keys.len(), count);

            total += count;
        }
        assert_eq!(self.size, total);
    }
}

impl<K, V> Default for ChainedHashMap<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

// Bucket layout carries no meaning, so two maps are equal when they hold the
// same entries, whatever order their chains are in.
impl<K, V, S> PartialEq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .iter()
                .all(|(key, value)| other.lookup(key).map_or(false, |other_value| value == other_value))
    }
}

impl<K, V, S> Eq for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Debug for ChainedHashMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ChainedHashMap::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Map<K, V> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Position = Position;

    fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        ChainedHashMap::get_or_insert(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        ChainedHashMap::insert(self, key, value)
    }

    fn lookup(&self, key: &K) -> Result<&V> {
        ChainedHashMap::lookup(self, key)
    }

    fn lookup_mut(&mut self, key: &K) -> Result<&mut V> {
        ChainedHashMap::lookup_mut(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        ChainedHashMap::contains_key(self, key)
    }

    fn locate(&self, key: &K) -> Position {
        self.position_of(key)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        ChainedHashMap::remove(self, key)
    }

    fn remove_at(&mut self, position: Position) -> Result<(K, V)> {
        ChainedHashMap::remove_at(self, position)
    }

    fn clear(&mut self) {
        ChainedHashMap::clear(self)
    }

    fn len(&self) -> usize {
        self.size
    }
}
