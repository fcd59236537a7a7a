//! Structural surgery on the tree's node graph. Everything in here works on
//! bare node handles and the root link, so it can be exercised without an
//! [`OrderedMap`](super::OrderedMap) around it.

use super::{Nodes, TreeNode};
use crate::arena::NodeHandle;

/// A node that has been taken out of the tree.
pub(crate) struct Removed<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,

    /// When the removed node had two children, the node that now holds the
    /// in-order successor's entry in the removed node's place.
    pub(crate) relocated: Option<NodeHandle>,
}

/// The smallest node in the subtree rooted at `node`.
pub(crate) fn leftmost<K, V>(nodes: &Nodes<K, V>, mut node: NodeHandle) -> NodeHandle {
    while let Some(left) = nodes[node].left {
        node = left;
    }
    node
}

/// The largest node in the subtree rooted at `node`.
pub(crate) fn rightmost<K, V>(nodes: &Nodes<K, V>, mut node: NodeHandle) -> NodeHandle {
    while let Some(right) = nodes[node].right {
        node = right;
    }
    node
}

/// The next node in key order, if there is one.
pub(crate) fn successor<K, V>(nodes: &Nodes<K, V>, node: NodeHandle) -> Option<NodeHandle> {
    if let Some(right) = nodes[node].right {
        return Some(leftmost(nodes, right));
    }

    // climb until we come up out of a left subtree
    let mut child = node;
    let mut parent = nodes[node].parent;
    while let Some(p) = parent {
        if nodes[p].left == Some(child) {
            return Some(p);
        }
        child = p;
        parent = nodes[p].parent;
    }

    None
}

/// The previous node in key order, if there is one.
pub(crate) fn predecessor<K, V>(nodes: &Nodes<K, V>, node: NodeHandle) -> Option<NodeHandle> {
    if let Some(left) = nodes[node].left {
        return Some(rightmost(nodes, left));
    }

    let mut child = node;
    let mut parent = nodes[node].parent;
    while let Some(p) = parent {
        if nodes[p].right == Some(child) {
            return Some(p);
        }
        child = p;
        parent = nodes[p].parent;
    }

    None
}

/// Points whichever link referred to `old` (its parent's, or the root) at
/// `new` instead.
fn replace_child<K, V>(
    nodes: &mut Nodes<K, V>,
    root: &mut Option<NodeHandle>,
    parent: Option<NodeHandle>,
    old: NodeHandle,
    new: Option<NodeHandle>,
) {
    match parent {
        None => *root = new,
        Some(p) => {
            let parent_node = &mut nodes[p];
            if parent_node.left == Some(old) {
                parent_node.left = new;
            } else {
                parent_node.right = new;
            }
        }
    }
}

/// Unlinks a node which has at most one child. The child, if any, moves up
/// into the node's place.
fn excise<K, V>(
    nodes: &mut Nodes<K, V>,
    root: &mut Option<NodeHandle>,
    node: NodeHandle,
) -> Option<TreeNode<K, V>> {
    let (parent, child) = {
        let n = nodes.get(node)?;
        debug_assert!(n.left.is_none() || n.right.is_none());
        (n.parent, n.left.or(n.right))
    };

    if let Some(c) = child {
        nodes[c].parent = parent;
    }
    replace_child(nodes, root, parent, node, child);

    nodes.remove(node)
}

/// Takes `node` out of the tree, keeping the search order and every parent
/// link intact. Returns `None` if the handle doesn't refer to a live node.
///
/// A node with two children can't simply be unlinked. Instead its in-order
/// successor (the leftmost node of its right subtree, which never has a left
/// child) is excised, and a fresh node carrying the successor's entry takes
/// over the removed node's parent and both of its children.
pub(crate) fn remove_node<K, V>(
    nodes: &mut Nodes<K, V>,
    root: &mut Option<NodeHandle>,
    node: NodeHandle,
) -> Option<Removed<K, V>> {
    let (left, right, parent) = {
        let n = nodes.get(node)?;
        (n.left, n.right, n.parent)
    };

    match (left, right) {
        (Some(_), Some(right)) => {
            tracing::trace!(case = "two children", "splicing tree node");

            let next = leftmost(nodes, right);
            let successor = excise(nodes, root, next)?;

            // the successor may have been our own right child, so re-read the
            // links now that it's gone
            let (left, right) = (nodes[node].left, nodes[node].right);
            let copied = nodes.insert(TreeNode {
                key: successor.key,
                value: successor.value,
                left,
                right,
                parent,
            });
            if let Some(l) = left {
                nodes[l].parent = Some(copied);
            }
            if let Some(r) = right {
                nodes[r].parent = Some(copied);
            }
            replace_child(nodes, root, parent, node, Some(copied));

            let old = nodes.remove(node)?;
            Some(Removed {
                key: old.key,
                value: old.value,
                relocated: Some(copied),
            })
        }
        (None, None) => {
            tracing::trace!(case = "leaf", "splicing tree node");
            let old = excise(nodes, root, node)?;
            Some(Removed {
                key: old.key,
                value: old.value,
                relocated: None,
            })
        }
        _ => {
            tracing::trace!(case = "one child", "splicing tree node");
            let old = excise(nodes, root, node)?;
            Some(Removed {
                key: old.key,
                value: old.value,
                relocated: None,
            })
        }
    }
}
