use std::iter::FusedIterator;

use super::{splice, OrderedMap};
use crate::arena::NodeHandle;
use crate::error::{MapError, Result};

/// Where a cursor stood, detached from the borrow of its map. Only meaningful
/// to the map that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position(Option<NodeHandle>);

impl Position {
    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }

    pub(crate) fn node(&self) -> Option<NodeHandle> {
        self.0
    }
}

/// Steps one node towards the end. Incrementing the end is an error.
fn step_forward<K, V>(map: &OrderedMap<K, V>, node: Option<NodeHandle>) -> Result<Option<NodeHandle>> {
    match node {
        Some(node) => Ok(splice::successor(&map.nodes, node)),
        None => Err(MapError::InvalidIterator),
    }
}

/// Steps one node towards the beginning. Stepping back from the end lands on
/// the largest key; there is nothing before the smallest.
fn step_back<K, V>(map: &OrderedMap<K, V>, node: Option<NodeHandle>) -> Result<Option<NodeHandle>> {
    let previous = match node {
        Some(node) => splice::predecessor(&map.nodes, node),
        None => map.last_node(),
    };

    previous.map(Some).ok_or(MapError::InvalidIterator)
}

/// A read-only position in an [`OrderedMap`], which can step either way
/// through the keys in order.
pub struct Cursor<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    node: Option<NodeHandle>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(map: &'a OrderedMap<K, V>, node: Option<NodeHandle>) -> Self {
        Self { map, node }
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub fn key(&self) -> Option<&'a K> {
        let map = self.map;
        self.node.map(|node| &map.nodes[node].key)
    }

    pub fn value(&self) -> Option<&'a V> {
        let map = self.map;
        self.node.map(|node| &map.nodes[node].value)
    }

    /// The entry under the cursor. The end has none.
    pub fn entry(&self) -> Result<(&'a K, &'a V)> {
        let map = self.map;
        let node = self.node.ok_or(MapError::InvalidIterator)?;
        let tree_node = &map.nodes[node];
        Ok((&tree_node.key, &tree_node.value))
    }

    pub fn position(&self) -> Position {
        Position(self.node)
    }

    /// Moves to the next key. On error the cursor stays where it was.
    pub fn move_next(&mut self) -> Result<()> {
        self.node = step_forward(self.map, self.node)?;
        Ok(())
    }

    /// Moves to the previous key. On error the cursor stays where it was.
    pub fn move_prev(&mut self) -> Result<()> {
        self.node = step_back(self.map, self.node)?;
        Ok(())
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.map, other.map) && self.node == other.node
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

/// A position in an [`OrderedMap`] through which the value can be changed or
/// the entry removed.
pub struct CursorMut<'a, K, V> {
    map: &'a mut OrderedMap<K, V>,
    node: Option<NodeHandle>,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) fn new(map: &'a mut OrderedMap<K, V>, node: Option<NodeHandle>) -> Self {
        Self { map, node }
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub fn key(&self) -> Option<&K> {
        self.node.map(|node| &self.map.nodes[node].key)
    }

    pub fn value(&self) -> Option<&V> {
        self.node.map(|node| &self.map.nodes[node].value)
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        let node = self.node?;
        Some(&mut self.map.nodes[node].value)
    }

    pub fn position(&self) -> Position {
        Position(self.node)
    }

    pub fn move_next(&mut self) -> Result<()> {
        self.node = step_forward(self.map, self.node)?;
        Ok(())
    }

    pub fn move_prev(&mut self) -> Result<()> {
        self.node = step_back(self.map, self.node)?;
        Ok(())
    }

    /// Removes the entry under the cursor and moves on to the next key.
    pub fn remove_current(&mut self) -> Result<(K, V)> {
        let node = self.node.ok_or(MapError::InvalidIterator)?;
        let next = splice::successor(&self.map.nodes, node);

        let removed = self.map.remove_node(node)?;

        // a node with two children hands its place to its successor, which
        // lives on in a new node
        self.node = match removed.relocated {
            Some(relocated) => Some(relocated),
            None => next,
        };

        Ok((removed.key, removed.value))
    }
}

/// Iterates over an [`OrderedMap`] in key order, from either end.
pub struct Iter<'a, K, V> {
    map: &'a OrderedMap<K, V>,
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(map: &'a OrderedMap<K, V>) -> Self {
        Self {
            map,
            front: map.first_node(),
            back: map.last_node(),
            remaining: map.len(),
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            map: self.map,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.front?;
        self.front = splice::successor(&self.map.nodes, node);
        self.remaining -= 1;

        let map = self.map;
        let tree_node = &map.nodes[node];
        Some((&tree_node.key, &tree_node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.back?;
        self.back = splice::predecessor(&self.map.nodes, node);
        self.remaining -= 1;

        let map = self.map;
        let tree_node = &map.nodes[node];
        Some((&tree_node.key, &tree_node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
