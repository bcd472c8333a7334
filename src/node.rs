//! Node types threaded into sequences
//!
//! - [`Node`]: value plus `prev`/`next` links
//! - [`TreeNode`]: a [`Node`] that also carries `parent`/`left`/`right` links,
//!   overlaying a complete binary tree on the chain
//!
//! In the overlay, the node at list position `i` is the parent of the nodes at
//! positions `2i + 1` and `2i + 2`, exactly as in the implicit array layout of
//! a binary heap.

use crate::storage::{remap, KeyMap, NodeKey};
use crate::traits::Linked;

/// A doubly-linked list element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

impl<T> Linked for Node<T> {
    type Value = T;

    #[inline]
    fn new(value: T) -> Self {
        Self {
            value,
            prev: None,
            next: None,
        }
    }

    #[inline]
    fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    #[inline]
    fn into_value(self) -> T {
        self.value
    }

    #[inline]
    fn prev(&self) -> Option<NodeKey> {
        self.prev
    }

    #[inline]
    fn next(&self) -> Option<NodeKey> {
        self.next
    }

    #[inline]
    fn set_prev(&mut self, key: Option<NodeKey>) {
        self.prev = key;
    }

    #[inline]
    fn set_next(&mut self, key: Option<NodeKey>) {
        self.next = key;
    }

    fn remap_links(&mut self, map: &KeyMap) {
        self.prev = remap(self.prev, map);
        self.next = remap(self.next, map);
    }
}

/// A list element that also sits in a complete binary tree
///
/// The tree links are maintained by [`Heap`](crate::heap::Heap); a
/// sequence of tree nodes that is not inside a heap simply carries stale or
/// empty tree links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    node: Node<T>,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) left: Option<NodeKey>,
    pub(crate) right: Option<NodeKey>,
}

impl<T> TreeNode<T> {
    #[inline]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    pub fn left(&self) -> Option<NodeKey> {
        self.left
    }

    #[inline]
    pub fn right(&self) -> Option<NodeKey> {
        self.right
    }

    /// Children in left-to-right order, skipping empty slots
    #[inline]
    pub fn children(&self) -> impl Iterator<Item = NodeKey> {
        self.left.into_iter().chain(self.right)
    }

    /// Returns true if the node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Forgets all tree links, leaving the chain links alone
    #[inline]
    pub(crate) fn clear_tree_links(&mut self) {
        self.parent = None;
        self.left = None;
        self.right = None;
    }

    /// Empties whichever child slot holds `child`
    pub(crate) fn forget_child(&mut self, child: NodeKey) {
        if self.left == Some(child) {
            self.left = None;
        } else if self.right == Some(child) {
            self.right = None;
        }
    }
}

impl<T> Linked for TreeNode<T> {
    type Value = T;

    #[inline]
    fn new(value: T) -> Self {
        Self {
            node: Node::new(value),
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    fn value(&self) -> &T {
        self.node.value()
    }

    #[inline]
    fn value_mut(&mut self) -> &mut T {
        self.node.value_mut()
    }

    #[inline]
    fn into_value(self) -> T {
        self.node.into_value()
    }

    #[inline]
    fn prev(&self) -> Option<NodeKey> {
        self.node.prev()
    }

    #[inline]
    fn next(&self) -> Option<NodeKey> {
        self.node.next()
    }

    #[inline]
    fn set_prev(&mut self, key: Option<NodeKey>) {
        self.node.set_prev(key);
    }

    #[inline]
    fn set_next(&mut self, key: Option<NodeKey>) {
        self.node.set_next(key);
    }

    fn remap_links(&mut self, map: &KeyMap) {
        self.node.remap_links(map);
        self.parent = remap(self.parent, map);
        self.left = remap(self.left, map);
        self.right = remap(self.right, map);
    }
}
