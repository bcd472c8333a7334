//! FIFO and LIFO adapters over [`LinkedSequence`]
//!
//! [`Queue`] and [`Stack`] both push at the back; they differ only in which
//! end `pop` takes from. The underlying sequence stays reachable through
//! `as_sequence`/`as_sequence_mut` for indexing and slicing.
//!
//! # Example
//!
//! ```rust
//! use linked_heaps::adapters::{Queue, Stack};
//!
//! let mut queue: Queue<i32> = [1, 2, 3].into_iter().collect();
//! assert_eq!(queue.pop(), Ok(1));
//!
//! let mut stack: Stack<i32> = [1, 2, 3].into_iter().collect();
//! assert_eq!(stack.pop(), Ok(3));
//! ```

use crate::node::Node;
use crate::sequence::{Iter, LinkedSequence};
use crate::traits::SeqResult;
use std::fmt;

/// First-in, first-out queue
#[derive(Clone, PartialEq, Eq)]
pub struct Queue<T> {
    seq: LinkedSequence<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            seq: LinkedSequence::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Enqueues at the back
    pub fn push(&mut self, value: T) {
        self.seq.push_back(value);
    }

    /// Dequeues from the front
    ///
    /// # Errors
    /// Returns [`SeqError::EmptyContainer`](crate::SeqError::EmptyContainer)
    /// if the queue is empty.
    pub fn pop(&mut self) -> SeqResult<T> {
        self.seq.pop_front()
    }

    /// The value `pop` would return next
    pub fn peek(&self) -> Option<&T> {
        self.seq.front()
    }

    pub fn iter(&self) -> Iter<'_, Node<T>> {
        self.seq.iter()
    }

    /// Appends every value of `other` behind this queue's values
    pub fn merge(&mut self, other: Queue<T>) {
        self.seq.merge(other.seq);
    }

    pub fn as_sequence(&self) -> &LinkedSequence<T> {
        &self.seq
    }

    pub fn as_sequence_mut(&mut self) -> &mut LinkedSequence<T> {
        &mut self.seq
    }

    pub fn into_sequence(self) -> LinkedSequence<T> {
        self.seq
    }
}

/// Last-in, first-out stack
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    seq: LinkedSequence<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            seq: LinkedSequence::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Pushes onto the top (the back of the sequence)
    pub fn push(&mut self, value: T) {
        self.seq.push_back(value);
    }

    /// Pops from the top
    ///
    /// # Errors
    /// Returns [`SeqError::EmptyContainer`](crate::SeqError::EmptyContainer)
    /// if the stack is empty.
    pub fn pop(&mut self) -> SeqResult<T> {
        self.seq.pop_back()
    }

    /// The value `pop` would return next
    pub fn peek(&self) -> Option<&T> {
        self.seq.back()
    }

    /// Values from bottom to top
    pub fn iter(&self) -> Iter<'_, Node<T>> {
        self.seq.iter()
    }

    /// Places every value of `other` on top of this stack, preserving its order
    pub fn merge(&mut self, other: Stack<T>) {
        self.seq.merge(other.seq);
    }

    pub fn as_sequence(&self) -> &LinkedSequence<T> {
        &self.seq
    }

    pub fn as_sequence_mut(&mut self) -> &mut LinkedSequence<T> {
        &mut self.seq
    }

    pub fn into_sequence(self) -> LinkedSequence<T> {
        self.seq
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<LinkedSequence<T>> for Queue<T> {
    fn from(seq: LinkedSequence<T>) -> Self {
        Self { seq }
    }
}

impl<T> From<LinkedSequence<T>> for Stack<T> {
    fn from(seq: LinkedSequence<T>) -> Self {
        Self { seq }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            seq: iter.into_iter().collect(),
        }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            seq: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.seq.extend(iter);
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.seq.extend(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Queue")?;
        f.debug_list().entries(self.seq.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stack")?;
        f.debug_list().entries(self.seq.iter()).finish()
    }
}
