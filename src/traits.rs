//! Common traits and the error type shared by every container
//!
//! This module provides the seam between the containers and their nodes:
//!
//! - [`Linked`]: A node that can be threaded into a [`LinkedSequence`](crate::sequence::LinkedSequence)
//! - [`SeqError`]: The single error type returned by fallible container operations
//!
//! Both [`Node`](crate::node::Node) and [`TreeNode`](crate::node::TreeNode)
//! implement [`Linked`], which lets the same sequence code drive plain lists
//! and the list underneath a [`Heap`](crate::heap::Heap).

use crate::storage::{KeyMap, NodeKey};
use thiserror::Error;

/// Error type for sequence and heap operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SeqError {
    /// Pop or extract on a container with no elements
    #[error("container is empty")]
    EmptyContainer,
    /// The index does not address an element (this includes `index == len`)
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index as supplied by the caller, before normalization
        index: isize,
        /// Length of the container at the time of the call
        len: usize,
    },
    /// An extended slice was assigned a different number of values than it addresses
    #[error("attempt to assign sequence of size {actual} to extended slice of size {expected}")]
    LengthMismatch {
        /// Number of positions the slice addresses
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },
    /// A single value was supplied where values were required, or the reverse
    #[error("type mismatch: expected {expected}")]
    TypeMismatch {
        /// What the target needed
        expected: &'static str,
    },
    /// The chain or tree overlay is malformed (for example, a circular chain)
    #[error("invalid structure: {0}")]
    InvalidStructure(&'static str),
    /// A slice with a step of zero
    #[error("slice step cannot be zero")]
    ZeroSliceStep,
}

/// Result alias used throughout the crate
pub type SeqResult<T> = Result<T, SeqError>;

/// A node that can be threaded into a doubly-linked chain
///
/// Links are arena keys rather than pointers, so a node never borrows its
/// neighbours. The sequence that owns the arena is the only thing that
/// follows them.
///
/// # Example
///
/// ```rust
/// use linked_heaps::node::Node;
/// use linked_heaps::Linked;
///
/// let node = Node::new(7);
/// assert_eq!(node.value(), &7);
/// assert!(node.prev().is_none() && node.next().is_none());
/// ```
pub trait Linked: Sized {
    /// The value stored in the node
    type Value;

    /// Creates an unlinked node holding `value`
    fn new(value: Self::Value) -> Self;

    /// Returns a reference to the stored value
    fn value(&self) -> &Self::Value;

    /// Returns a mutable reference to the stored value
    fn value_mut(&mut self) -> &mut Self::Value;

    /// Consumes the node, returning its value
    fn into_value(self) -> Self::Value;

    /// The previous node in the chain, `None` at the head
    fn prev(&self) -> Option<NodeKey>;

    /// The next node in the chain, `None` at the tail
    fn next(&self) -> Option<NodeKey>;

    /// Sets the previous link
    fn set_prev(&mut self, key: Option<NodeKey>);

    /// Sets the next link
    fn set_next(&mut self, key: Option<NodeKey>);

    /// Rewrites every link this node holds through `map`
    ///
    /// Called after the node has been moved into another arena, when all of
    /// its neighbours were moved along with it.
    fn remap_links(&mut self, map: &KeyMap);
}
