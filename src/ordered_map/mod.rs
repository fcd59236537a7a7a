//! An ordered map on top of a plain, unbalanced binary search tree.
//!
//! Nothing rebalances the tree, so its depth (and with it the cost of every
//! operation) depends entirely on insertion order: sorted input degrades it
//! into a linked list.

mod cursor;
mod splice;

pub use cursor::{Cursor, CursorMut, Iter, Position};

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{self, Debug},
    mem,
};

use crate::arena::{Arena, NodeHandle};
use crate::error::{MapError, Result};
use crate::map::Map;

/// A node that lives in the tree. The left and right links own their
/// subtrees; the parent link only exists to find the way back up.
#[derive(Clone)]
pub(crate) struct TreeNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<NodeHandle>,
    pub(crate) right: Option<NodeHandle>,
    pub(crate) parent: Option<NodeHandle>,
}

pub(crate) type Nodes<K, V> = Arena<TreeNode<K, V>>;

/// Where a key was found, or where it would have to be attached.
enum Search {
    Found(NodeHandle),
    Vacant {
        parent: Option<NodeHandle>,
        greater: bool,
    },
}

/// A map which keeps its entries sorted by key in a binary search tree.
///
/// ```
/// use twin_maps::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// *map.get_or_insert(2) = "b";
/// *map.get_or_insert(1) = "a";
///
/// let keys: Vec<_> = map.iter().map(|(k, _)| *k).collect();
/// assert_eq!(vec![1, 2], keys);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    nodes: Nodes<K, V>,
    root: Option<NodeHandle>,
    size: usize,
}

impl<K, V> OrderedMap<K, V> {
    /// Makes a new, empty map.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            size: 0,
        }
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// A cursor at the smallest key, or the end if the map is empty.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, self.first_node())
    }

    /// A cursor one past the largest key.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self, None)
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.size = 0;
    }

    /// Moves every entry out into a new map, leaving this one empty.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Removes the entry at `position`. Fails with `InvalidIterator` for the
    /// end position or a position whose node is already gone.
    pub fn remove_at(&mut self, position: Position) -> Result<(K, V)> {
        match position.node() {
            Some(node) => self.remove_node(node).map(|removed| (removed.key, removed.value)),
            None => Err(MapError::InvalidIterator),
        }
    }

    fn first_node(&self) -> Option<NodeHandle> {
        self.root.map(|root| splice::leftmost(&self.nodes, root))
    }

    fn last_node(&self) -> Option<NodeHandle> {
        self.root.map(|root| splice::rightmost(&self.nodes, root))
    }

    fn remove_node(&mut self, node: NodeHandle) -> Result<splice::Removed<K, V>> {
        let removed = splice::remove_node(&mut self.nodes, &mut self.root, node)
            .ok_or(MapError::InvalidIterator)?;
        self.size -= 1;
        Ok(removed)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Get a mutable reference to the value at `key`. If the key isn't in the
    /// map yet, a node holding a default value is attached where the search
    /// for it ended.
    pub fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let node = match self.search(&key) {
            Search::Found(node) => node,
            Search::Vacant { parent, greater } => self.attach(parent, greater, key, V::default()),
        };

        &mut self.nodes[node].value
    }

    /// Inserts a new entry, returning the previous value at that key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Search::Found(node) => Some(mem::replace(&mut self.nodes[node].value, value)),
            Search::Vacant { parent, greater } => {
                self.attach(parent, greater, key, value);
                None
            }
        }
    }

    pub fn lookup<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(node) => Ok(&self.nodes[node].value),
            Search::Vacant { .. } => Err(MapError::KeyNotFound),
        }
    }

    pub fn lookup_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(node) => Ok(&mut self.nodes[node].value),
            Search::Vacant { .. } => Err(MapError::KeyNotFound),
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        matches!(self.search(key), Search::Found(_))
    }

    /// A cursor at `key`, or the end if the key isn't in the map.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search_node(key);
        Cursor::new(self, node)
    }

    /// A mutable cursor at `key`, or the end if the key isn't in the map.
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search_node(key);
        CursorMut::new(self, node)
    }

    /// Removes `key`, returning its value. A missing key is `KeyNotFound`
    /// and leaves the tree as it was.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search_node(key).ok_or(MapError::KeyNotFound)?;
        let removed = self.remove_node(node)?;

        #[cfg(test)]
        self.continuity_test();

        Ok(removed.value)
    }

    fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut parent = None;
        let mut greater = false;
        let mut current = self.root;

        while let Some(node) = current {
            let tree_node = &self.nodes[node];
            match key.cmp(tree_node.key.borrow()) {
                Ordering::Equal => return Search::Found(node),
                Ordering::Greater => {
                    greater = true;
                    current = tree_node.right;
                }
                Ordering::Less => {
                    greater = false;
                    current = tree_node.left;
                }
            }
            parent = Some(node);
        }

        Search::Vacant { parent, greater }
    }

    fn search_node<Q>(&self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(node) => Some(node),
            Search::Vacant { .. } => None,
        }
    }

    fn attach(&mut self, parent: Option<NodeHandle>, greater: bool, key: K, value: V) -> NodeHandle {
        let node = self.nodes.insert(TreeNode {
            key,
            value,
            left: None,
            right: None,
            parent,
        });

        match parent {
            None => self.root = Some(node),
            Some(p) if greater => self.nodes[p].right = Some(node),
            Some(p) => self.nodes[p].left = Some(node),
        }
        self.size += 1;

        #[cfg(test)]
        self.continuity_test();

        node
    }

    /// Walks the whole tree checking search order, parent links, and that the
    /// node count agrees with the size in both directions.
    #[cfg(test)]
    fn continuity_test(&self) {
        assert_eq!(self.size, self.nodes.len());

        if let Some(root) = self.root {
            assert!(self.nodes[root].parent.is_none());
        }

        let mut count = 0;
        let mut previous: Option<&K> = None;
        let mut current = self.first_node();
        while let Some(node) = current {
            let tree_node = &self.nodes[node];
            for child in [tree_node.left, tree_node.right].into_iter().flatten() {
                assert_eq!(Some(node), self.nodes[child].parent);
            }
            if let Some(previous) = previous {
                assert!(previous < &tree_node.key);
            }
            previous = Some(&tree_node.key);

            count += 1;
            assert!(count <= self.size);
            current = splice::successor(&self.nodes, node);
        }
        assert_eq!(self.size, count);

        count = 0;
        let mut current = self.last_node();
        while let Some(node) = current {
            count += 1;
            assert!(count <= self.size);
            current = splice::predecessor(&self.nodes, node);
        }
        assert_eq!(self.size, count);
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Two trees holding the same entries can have different shapes, so compare
// them in key order rather than node by node.
impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for OrderedMap<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> Debug for OrderedMap<K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Map<K, V> for OrderedMap<K, V>
where
    K: Ord,
{
    type Position = Position;

    fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        OrderedMap::get_or_insert(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        OrderedMap::insert(self, key, value)
    }

    fn lookup(&self, key: &K) -> Result<&V> {
        OrderedMap::lookup(self, key)
    }

    fn lookup_mut(&mut self, key: &K) -> Result<&mut V> {
        OrderedMap::lookup_mut(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        OrderedMap::contains_key(self, key)
    }

    fn locate(&self, key: &K) -> Position {
        self.find(key).position()
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        OrderedMap::remove(self, key)
    }

    fn remove_at(&mut self, position: Position) -> Result<(K, V)> {
        OrderedMap::remove_at(self, position)
    }

    fn clear(&mut self) {
        OrderedMap::clear(self)
    }

    fn len(&self) -> usize {
        self.size
    }
}
