//! The doubly-linked chains hanging off each bucket. A chain has no storage of
//! its own: its nodes live in the map's arena and the bucket only remembers
//! which of them are the head and the tail.

use crate::arena::{Arena, NodeHandle};

/// A node that lives in a bucket's chain.
#[derive(Clone)]
pub(crate) struct ChainNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// The node after this one in the chain.
    pub(crate) next: Option<NodeHandle>,

    /// The node before this one in the chain.
    pub(crate) prev: Option<NodeHandle>,
}

pub(crate) type Nodes<K, V> = Arena<ChainNode<K, V>>;

/// The ends of one chain. Both are `None` exactly when the bucket is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Bucket {
    pub(crate) head: Option<NodeHandle>,
    pub(crate) tail: Option<NodeHandle>,
}

impl Bucket {
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

/// Pushes a new node onto the tail of the chain and returns a handle to it.
pub(crate) fn append<K, V>(nodes: &mut Nodes<K, V>, bucket: &mut Bucket, key: K, value: V) -> NodeHandle {
    let node = nodes.insert(ChainNode {
        key,
        value,
        next: None,
        prev: bucket.tail,
    });

    match bucket.tail {
        Some(tail) => nodes[tail].next = Some(node),
        None => bucket.head = Some(node),
    }
    bucket.tail = Some(node);

    node
}

/// Takes a node out of the chain, linking its neighbours to each other.
/// Returns `None`, touching nothing, if the node isn't actually linked into
/// this chain.
pub(crate) fn unlink<K, V>(nodes: &mut Nodes<K, V>, bucket: &mut Bucket, node: NodeHandle) -> Option<ChainNode<K, V>> {
    let (prev, next) = {
        let n = nodes.get(node)?;
        (n.prev, n.next)
    };

    let linked_before = match prev {
        Some(p) => nodes.get(p).map_or(false, |p| p.next == Some(node)),
        None => bucket.head == Some(node),
    };
    let linked_after = match next {
        Some(n) => nodes.get(n).map_or(false, |n| n.prev == Some(node)),
        None => bucket.tail == Some(node),
    };
    if !(linked_before && linked_after) {
        return None;
    }

    match (prev, next) {
        (None, None) => tracing::trace!(at = "only", "unlinking chain node"),
        (None, Some(_)) => tracing::trace!(at = "head", "unlinking chain node"),
        (Some(_), None) => tracing::trace!(at = "tail", "unlinking chain node"),
        (Some(_), Some(_)) => tracing::trace!(at = "middle", "unlinking chain node"),
    }

    match prev {
        Some(p) => nodes[p].next = next,
        None => bucket.head = next,
    }
    match next {
        Some(n) => nodes[n].prev = prev,
        None => bucket.tail = prev,
    }

    nodes.remove(node)
}
