use std::iter::FusedIterator;

use super::ChainedHashMap;
use crate::arena::NodeHandle;
use crate::error::{MapError, Result};

/// Where a cursor stood: a bucket index plus a node in that bucket's chain.
/// The end sits at bucket index `bucket_count` with no node. Only meaningful
/// to the map that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    bucket: usize,
    node: Option<NodeHandle>,
}

impl Position {
    pub(crate) fn new(bucket: usize, node: Option<NodeHandle>) -> Self {
        Self { bucket, node }
    }

    /// The bucket the entry lives in.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub(crate) fn node(&self) -> Option<NodeHandle> {
        self.node
    }
}

fn step_forward<K, V, S>(map: &ChainedHashMap<K, V, S>, position: Position) -> Result<Position> {
    match position.node {
        Some(node) => Ok(map.after(position.bucket, node)),
        None => Err(MapError::InvalidIterator),
    }
}

fn step_back<K, V, S>(map: &ChainedHashMap<K, V, S>, position: Position) -> Result<Position> {
    map.before(position).ok_or(MapError::InvalidIterator)
}

/// A read-only position in a [`ChainedHashMap`].
pub struct Cursor<'a, K, V, S> {
    map: &'a ChainedHashMap<K, V, S>,
    position: Position,
}

impl<'a, K, V, S> Cursor<'a, K, V, S> {
    pub(crate) fn new(map: &'a ChainedHashMap<K, V, S>, position: Position) -> Self {
        Self { map, position }
    }

    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    pub fn key(&self) -> Option<&'a K> {
        self.entry().ok().map(|(key, _)| key)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.entry().ok().map(|(_, value)| value)
    }

    /// The entry under the cursor. The end has none.
    pub fn entry(&self) -> Result<(&'a K, &'a V)> {
        let map = self.map;
        let node = self.position.node.ok_or(MapError::InvalidIterator)?;
        let chain_node = &map.nodes[node];
        Ok((&chain_node.key, &chain_node.value))
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves along the chain, then on to the next non-empty bucket. On error
    /// the cursor stays where it was.
    pub fn move_next(&mut self) -> Result<()> {
        self.position = step_forward(self.map, self.position)?;
        Ok(())
    }

    /// Moves back along the chain, then on to the tail of the previous
    /// non-empty bucket. On error the cursor stays where it was.
    pub fn move_prev(&mut self) -> Result<()> {
        self.position = step_back(self.map, self.position)?;
        Ok(())
    }
}

impl<K, V, S> Clone for Cursor<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S> Copy for Cursor<'_, K, V, S> {}

impl<K, V, S> PartialEq for Cursor<'_, K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.map, other.map) && self.position == other.position
    }
}

impl<K, V, S> Eq for Cursor<'_, K, V, S> {}

/// A position in a [`ChainedHashMap`] through which the value can be changed
/// or the entry removed.
pub struct CursorMut<'a, K, V, S> {
    map: &'a mut ChainedHashMap<K, V, S>,
    position: Position,
}

impl<'a, K, V, S> CursorMut<'a, K, V, S> {
    pub(crate) fn new(map: &'a mut ChainedHashMap<K, V, S>, position: Position) -> Self {
        Self { map, position }
    }

    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    pub fn key(&self) -> Option<&K> {
        self.position.node.map(|node| &self.map.nodes[node].key)
    }

    pub fn value(&self) -> Option<&V> {
        self.position.node.map(|node| &self.map.nodes[node].value)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        let node = self.position.node?;
        Some(&mut self.map.nodes[node].value)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn move_next(&mut self) -> Result<()> {
        self.position = step_forward(self.map, self.position)?;
        Ok(())
    }

    pub fn move_prev(&mut self) -> Result<()> {
        self.position = step_back(self.map, self.position)?;
        Ok(())
    }

    /// Unlinks the entry under the cursor and moves on to the next one.
    pub fn remove_current(&mut self) -> Result<(K, V)> {
        let next = step_forward(self.map, self.position)?;
        let removed = self.map.remove_at(self.position)?;
        self.position = next;
        Ok(removed)
    }
}

/// Iterates over a [`ChainedHashMap`] bucket by bucket, from either end.
pub struct Iter<'a, K, V, S> {
    map: &'a ChainedHashMap<K, V, S>,
    front: Position,
    back: Option<Position>,
    remaining: usize,
}

impl<'a, K, V, S> Iter<'a, K, V, S> {
    pub(crate) fn new(map: &'a ChainedHashMap<K, V, S>) -> Self {
        Self {
            map,
            front: map.first_from(0),
            back: map.before(map.end_position()),
            remaining: map.len(),
        }
    }
}

impl<K, V, S> Clone for Iter<'_, K, V, S> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, S> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front.node?;
        self.front = self.map.after(self.front.bucket, node);
        self.remaining -= 1;

        let map = self.map;
        let chain_node = &map.nodes[node];
        Some((&chain_node.key, &chain_node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, S> DoubleEndedIterator for Iter<'_, K, V, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let back = self.back?;
        let node = back.node?;
        self.back = self.map.before(back);
        self.remaining -= 1;

        let map = self.map;
        let chain_node = &map.nodes[node];
        Some((&chain_node.key, &chain_node.value))
    }
}

impl<K, V, S> ExactSizeIterator for Iter<'_, K, V, S> {}

impl<K, V, S> FusedIterator for Iter<'_, K, V, S> {}
