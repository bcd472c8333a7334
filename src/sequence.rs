//! Doubly-linked sequence with Python-style indexing and splicing
//!
//! [`LinkedSequence`] keeps its nodes in a [`NodeArena`] and threads them into
//! a chain with `prev`/`next` keys. It supports:
//!
//! - O(1) push and pop at both ends
//! - Indexing with negative positions, walking from whichever end is nearer
//! - Slicing with any nonzero step, following Python's clamping rules
//! - Contiguous slice assignment as a splice: the addressed run is unlinked
//!   and a fresh chain is linked in its place
//! - Consuming concatenation ([`LinkedSequence::merge`])
//!
//! # Time Complexity
//!
//! | Operation            | Complexity            |
//! |----------------------|-----------------------|
//! | `push_*` / `pop_*`   | O(1)                  |
//! | `get` / `set` / `remove` | O(min(i, n - i))  |
//! | `get_slice`          | O(distance + k)       |
//! | `set_slice` (step 1) | O(distance + removed + inserted) |
//! | `merge`              | O(min(n, m))          |
//!
//! `merge` relinks in O(1) but moves the smaller arena's nodes into the
//! larger one, so it is linear in the smaller side rather than constant.
//!
//! # Example
//!
//! ```rust
//! use linked_heaps::sequence::LinkedSequence;
//! use linked_heaps::slice::Slice;
//!
//! let mut seq: LinkedSequence<i32> = (0..6).collect();
//! assert_eq!(seq.get_slice(Slice::new(Some(4), Some(1), Some(-1))).unwrap(), vec![4, 3, 2]);
//!
//! // Replace the run [1, 3) with three new values
//! seq.set_slice(Slice::from(1..3), [10, 11, 12]).unwrap();
//! assert_eq!(seq, vec![0, 10, 11, 12, 3, 4, 5]);
//!
//! assert_eq!(seq.get(-1), Ok(&5));
//! ```

use crate::node::Node;
use crate::slice::{Index, Slice, SliceIndices, Values};
use crate::storage::{remap, NodeArena, NodeKey};
use crate::traits::{Linked, SeqError, SeqResult};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// A doubly-linked sequence of `N` nodes holding `T` values
///
/// `N` defaults to [`Node<T>`]; [`Heap`](crate::heap::Heap) instantiates it
/// with [`TreeNode<T>`](crate::node::TreeNode).
#[derive(Clone)]
pub struct LinkedSequence<T, N = Node<T>> {
    nodes: NodeArena<N>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    len: usize,
    _phantom: PhantomData<T>,
}

impl<T, N: Linked<Value = T>> Default for LinkedSequence<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, N: Linked<Value = T>> LinkedSequence<T, N> {
    /// Creates an empty sequence
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::default(),
            head: None,
            tail: None,
            len: 0,
            _phantom: PhantomData,
        }
    }

    /// Creates an empty sequence with arena room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            ..Self::new()
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First value, if any
    pub fn front(&self) -> Option<&T> {
        self.head.map(|key| self.nodes[key].value())
    }

    /// Last value, if any
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|key| self.nodes[key].value())
    }

    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Drops every element
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // ------------------------------------------------------------------
    // Boundary operations
    // ------------------------------------------------------------------

    /// Appends a value at the tail
    pub fn push_back(&mut self, value: T) {
        self.push_back_key(value);
    }

    /// Prepends a value at the head
    pub fn push_front(&mut self, value: T) {
        let key = self.nodes.insert(N::new(value));
        let head = self.head;
        self.link(Some(key), head);
        self.link(None, Some(key));
        self.len += 1;
    }

    /// Removes and returns the last value
    ///
    /// # Errors
    /// Returns [`SeqError::EmptyContainer`] if the sequence is empty.
    pub fn pop_back(&mut self) -> SeqResult<T> {
        let key = self.tail.ok_or(SeqError::EmptyContainer)?;
        Ok(self.unlink(key).into_value())
    }

    /// Removes and returns the first value
    ///
    /// # Errors
    /// Returns [`SeqError::EmptyContainer`] if the sequence is empty.
    pub fn pop_front(&mut self) -> SeqResult<T> {
        let key = self.head.ok_or(SeqError::EmptyContainer)?;
        Ok(self.unlink(key).into_value())
    }

    // ------------------------------------------------------------------
    // Single-position access
    // ------------------------------------------------------------------

    /// Returns the value at `index`; negative indices count from the tail
    ///
    /// # Errors
    /// Returns [`SeqError::IndexOutOfRange`] unless `-len <= index < len`.
    pub fn get(&self, index: isize) -> SeqResult<&T> {
        let key = self.key_at(self.normalize(index)?);
        Ok(self.nodes[key].value())
    }

    /// Mutable variant of [`get`](Self::get)
    pub fn get_mut(&mut self, index: isize) -> SeqResult<&mut T> {
        let key = self.key_at(self.normalize(index)?);
        Ok(self.nodes[key].value_mut())
    }

    /// Replaces the value at `index`, returning the previous one
    pub fn set(&mut self, index: isize, value: T) -> SeqResult<T> {
        Ok(std::mem::replace(self.get_mut(index)?, value))
    }

    /// Unlinks the node at `index`, returning its value
    pub fn remove(&mut self, index: isize) -> SeqResult<T> {
        let key = self.key_at(self.normalize(index)?);
        Ok(self.unlink(key).into_value())
    }

    // ------------------------------------------------------------------
    // Slices
    // ------------------------------------------------------------------

    /// Clones out the values a slice visits, in visiting order
    pub fn get_slice(&self, slice: impl Into<Slice>) -> SeqResult<Vec<T>>
    where
        T: Clone,
    {
        let ix = slice.into().indices(self.len)?;
        Ok(self
            .slice_keys(&ix)
            .into_iter()
            .map(|key| self.nodes[key].value().clone())
            .collect())
    }

    /// Assigns `values` to a slice
    ///
    /// For a step of 1 the addressed run is replaced by `values`, which may
    /// be longer, shorter or empty. Any other step assigns one value per
    /// addressed position.
    ///
    /// # Errors
    /// - [`SeqError::ZeroSliceStep`] for a zero step
    /// - [`SeqError::LengthMismatch`] if an extended slice addresses a
    ///   different number of positions than `values` holds; the sequence is
    ///   left untouched
    pub fn set_slice<I>(&mut self, slice: impl Into<Slice>, values: I) -> SeqResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        let ix = slice.into().indices(self.len)?;
        if ix.is_contiguous() {
            let stop = ix.stop.max(ix.start);
            self.splice(ix.start as usize, stop as usize, values);
            return Ok(());
        }

        let keys = self.slice_keys(&ix);
        let values: Vec<T> = values.into_iter().collect();
        if keys.len() != values.len() {
            return Err(SeqError::LengthMismatch {
                expected: keys.len(),
                actual: values.len(),
            });
        }
        for (key, value) in keys.into_iter().zip(values) {
            *self.nodes[key].value_mut() = value;
        }
        Ok(())
    }

    /// Removes every position a slice addresses
    pub fn delete_slice(&mut self, slice: impl Into<Slice>) -> SeqResult<()> {
        let ix = slice.into().indices(self.len)?;
        if ix.is_contiguous() {
            let stop = ix.stop.max(ix.start);
            self.splice(ix.start as usize, stop as usize, std::iter::empty());
            return Ok(());
        }
        for key in self.slice_keys(&ix) {
            self.unlink(key);
        }
        #[cfg(debug_assertions)]
        self.debug_audit("delete_slice");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Dynamic subscripts
    // ------------------------------------------------------------------

    /// Reads a position or a slice
    pub fn item(&self, index: impl Into<Index>) -> SeqResult<Values<T>>
    where
        T: Clone,
    {
        match index.into() {
            Index::At(i) => self.get(i).cloned().map(Values::Single),
            Index::Slice(slice) => self.get_slice(slice).map(Values::Many),
        }
    }

    /// Writes a position or a slice
    ///
    /// # Errors
    /// Returns [`SeqError::TypeMismatch`] when a slice receives a single
    /// value or a position receives many values.
    pub fn assign(&mut self, index: impl Into<Index>, values: Values<T>) -> SeqResult<()> {
        match (index.into(), values) {
            (Index::At(i), Values::Single(value)) => self.set(i, value).map(drop),
            (Index::Slice(slice), Values::Many(values)) => self.set_slice(slice, values),
            (Index::At(_), Values::Many(_)) => Err(SeqError::TypeMismatch {
                expected: "a single value",
            }),
            (Index::Slice(_), Values::Single(_)) => Err(SeqError::TypeMismatch {
                expected: "an iterable of values",
            }),
        }
    }

    /// Deletes a position or a slice
    pub fn remove_item(&mut self, index: impl Into<Index>) -> SeqResult<()> {
        match index.into() {
            Index::At(i) => self.remove(i).map(drop),
            Index::Slice(slice) => self.delete_slice(slice),
        }
    }

    // ------------------------------------------------------------------
    // Whole-sequence operations
    // ------------------------------------------------------------------

    /// Appends all of `other` after the tail, consuming it
    ///
    /// Relinking is O(1), but each sequence owns its arena, so the whole
    /// operation is not constant time: the smaller arena is re-inserted node
    /// by node into the larger one, costing O(min(n, m)), and nothing when
    /// either side is empty.
    pub fn merge(&mut self, mut other: Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other;
            return;
        }

        if self.nodes.len() >= other.nodes.len() {
            let map = self.nodes.absorb(std::mem::take(&mut other.nodes));
            let (other_head, other_tail) = (remap(other.head, &map), remap(other.tail, &map));
            self.link(self.tail, other_head);
            self.tail = other_tail;
        } else {
            let mut nodes = std::mem::take(&mut other.nodes);
            let map = nodes.absorb(std::mem::take(&mut self.nodes));
            self.nodes = nodes;
            self.head = remap(self.head, &map);
            let tail = remap(self.tail, &map);
            self.link(tail, other.head);
            self.tail = other.tail;
        }
        self.len += other.len;

        #[cfg(debug_assertions)]
        self.debug_audit("merge");
    }

    /// Walks the chain and verifies its bookkeeping
    ///
    /// Checks that `len` matches both the arena and the number of nodes
    /// reachable from the head, that every `prev` link mirrors a `next`
    /// link, and that the walk ends at `tail`.
    ///
    /// # Errors
    /// Returns [`SeqError::InvalidStructure`] describing the first violation.
    pub fn check_invariants(&self) -> SeqResult<()> {
        if self.nodes.len() != self.len {
            return Err(SeqError::InvalidStructure("arena size differs from length"));
        }
        if (self.head.is_none() || self.tail.is_none()) && self.len != 0 {
            return Err(SeqError::InvalidStructure("missing boundary node"));
        }
        if let Some(head) = self.head {
            if self.nodes[head].prev().is_some() {
                return Err(SeqError::InvalidStructure("head has a predecessor"));
            }
        }

        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(key) = cursor {
            count += 1;
            if count > self.len {
                return Err(SeqError::InvalidStructure("chain is longer than length"));
            }
            let node = self.nodes.get(key).ok_or(SeqError::InvalidStructure("dangling link"))?;
            if node.prev() != prev {
                return Err(SeqError::InvalidStructure("prev link does not mirror next link"));
            }
            prev = cursor;
            cursor = node.next();
        }
        if count != self.len {
            return Err(SeqError::InvalidStructure("chain is shorter than length"));
        }
        if prev != self.tail {
            return Err(SeqError::InvalidStructure("chain does not end at tail"));
        }
        Ok(())
    }

    /// Constant-time bookkeeping check run after structural edits
    ///
    /// Only the arena count and the boundary links are inspected; the full
    /// walk lives in [`check_invariants`](Self::check_invariants).
    #[cfg(debug_assertions)]
    fn debug_audit(&self, op: &str) {
        assert_eq!(
            self.nodes.len(),
            self.len,
            "Length mismatch after {op}: arena holds {} nodes but len is {}",
            self.nodes.len(),
            self.len
        );
        assert_eq!(
            self.head.is_none(),
            self.len == 0,
            "Head presence disagrees with len {} after {op}",
            self.len
        );
        if let (Some(head), Some(tail)) = (self.head, self.tail) {
            assert!(
                self.nodes[head].prev().is_none() && self.nodes[tail].next().is_none(),
                "Boundary node has an outside link after {op}"
            );
        }
    }

    // ------------------------------------------------------------------
    // Crate-internal node access, used by the heap
    // ------------------------------------------------------------------

    #[inline]
    pub(crate) fn head_key(&self) -> Option<NodeKey> {
        self.head
    }

    #[inline]
    pub(crate) fn tail_key(&self) -> Option<NodeKey> {
        self.tail
    }

    #[inline]
    pub(crate) fn node(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }

    /// Appends a value and returns the key of its node
    pub(crate) fn push_back_key(&mut self, value: T) -> NodeKey {
        let key = self.nodes.insert(N::new(value));
        let tail = self.tail;
        self.link(tail, Some(key));
        self.link(Some(key), None);
        self.len += 1;
        key
    }

    /// Detaches a node from the chain and frees it
    pub(crate) fn unlink(&mut self, key: NodeKey) -> N {
        let (prev, next) = {
            let node = &self.nodes[key];
            (node.prev(), node.next())
        };
        self.link(prev, next);
        self.len -= 1;
        let mut node = self
            .nodes
            .remove(key)
            .unwrap_or_else(|| unreachable!("unlinked a node outside this sequence"));
        node.set_prev(None);
        node.set_next(None);
        node
    }

    /// Exchanges the values held by two nodes; a no-op when `a == b`
    pub(crate) fn swap_values(&mut self, a: NodeKey, b: NodeKey) {
        if let Some([x, y]) = self.nodes.get_pair_mut(a, b) {
            std::mem::swap(x.value_mut(), y.value_mut());
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Makes `after` follow `before`; `None` on either side moves the
    /// corresponding boundary
    fn link(&mut self, before: Option<NodeKey>, after: Option<NodeKey>) {
        match before {
            Some(key) => self.nodes[key].set_next(after),
            None => self.head = after,
        }
        match after {
            Some(key) => self.nodes[key].set_prev(before),
            None => self.tail = before,
        }
    }

    fn normalize(&self, index: isize) -> SeqResult<usize> {
        let len = self.len as isize;
        let resolved = if index < 0 { index + len } else { index };
        if (0..len).contains(&resolved) {
            Ok(resolved as usize)
        } else {
            Err(SeqError::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Key of the node at `position`, walking from the nearer end
    ///
    /// `position` must be below `len`.
    fn key_at(&self, position: usize) -> NodeKey {
        debug_assert!(position < self.len);
        if position <= self.len / 2 {
            self.walk(self.head, position as isize)
        } else {
            self.walk(self.tail, position as isize - (self.len as isize - 1))
        }
    }

    /// Steps `offset` nodes forward (positive) or backward (negative) from
    /// `from`, stopping early at either boundary
    fn walk(&self, from: Option<NodeKey>, offset: isize) -> NodeKey {
        let mut key = from.unwrap_or_else(|| unreachable!("walk on an empty sequence"));
        let mut remaining = offset;
        while remaining > 0 {
            match self.nodes[key].next() {
                Some(next) => key = next,
                None => break,
            }
            remaining -= 1;
        }
        while remaining < 0 {
            match self.nodes[key].prev() {
                Some(prev) => key = prev,
                None => break,
            }
            remaining += 1;
        }
        key
    }

    fn slice_keys(&self, ix: &SliceIndices) -> Vec<NodeKey> {
        let count = ix.len();
        let mut keys = Vec::with_capacity(count);
        if count == 0 {
            return keys;
        }
        let mut key = self.key_at(ix.start as usize);
        keys.push(key);
        for _ in 1..count {
            key = self.walk(Some(key), ix.step);
            keys.push(key);
        }
        keys
    }

    /// Replaces the run `[start, stop)` with a chain built from `values`
    fn splice<I>(&mut self, start: usize, stop: usize, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut after = (start < self.len).then(|| self.key_at(start));
        let before = match after {
            Some(key) => self.nodes[key].prev(),
            None => self.tail,
        };

        for _ in start..stop {
            let Some(key) = after else { break };
            after = self.nodes[key].next();
            self.nodes.remove(key);
            self.len -= 1;
        }

        let mut prev = before;
        for value in values {
            let key = self.nodes.insert(N::new(value));
            self.link(prev, Some(key));
            prev = Some(key);
            self.len += 1;
        }
        self.link(prev, after);

        #[cfg(debug_assertions)]
        self.debug_audit("splice");
    }
}

// ----------------------------------------------------------------------
// Iteration
// ----------------------------------------------------------------------

/// Borrowing iterator over a [`LinkedSequence`], front to back
pub struct Iter<'a, N> {
    nodes: &'a NodeArena<N>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    remaining: usize,
}

impl<'a, N: Linked> Iterator for Iter<'a, N> {
    type Item = &'a N::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.front?];
        self.front = node.next();
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<N: Linked> DoubleEndedIterator for Iter<'_, N> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.back?];
        self.back = node.prev();
        self.remaining -= 1;
        Some(node.value())
    }
}

impl<N: Linked> ExactSizeIterator for Iter<'_, N> {}
impl<N: Linked> FusedIterator for Iter<'_, N> {}

impl<N> Clone for Iter<'_, N> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Owning iterator over a [`LinkedSequence`]
pub struct IntoIter<T, N>(LinkedSequence<T, N>);

impl<T, N: Linked<Value = T>> Iterator for IntoIter<T, N> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T, N: Linked<Value = T>> DoubleEndedIterator for IntoIter<T, N> {
    fn next_back(&mut self) -> Option<T> {
        self.0.pop_back().ok()
    }
}

impl<T, N: Linked<Value = T>> ExactSizeIterator for IntoIter<T, N> {}

impl<T, N: Linked<Value = T>> IntoIterator for LinkedSequence<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T, N: Linked<Value = T>> IntoIterator for &'a LinkedSequence<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, N: Linked<Value = T>> FromIterator<T> for LinkedSequence<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T, N: Linked<Value = T>> Extend<T> for LinkedSequence<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, N: Linked<Value = T>> From<Vec<T>> for LinkedSequence<T, N> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

// ----------------------------------------------------------------------
// Equality and formatting
// ----------------------------------------------------------------------

impl<T, N, M> PartialEq<LinkedSequence<T, M>> for LinkedSequence<T, N>
where
    T: PartialEq,
    N: Linked<Value = T>,
    M: Linked<Value = T>,
{
    fn eq(&self, other: &LinkedSequence<T, M>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, N: Linked<Value = T>> Eq for LinkedSequence<T, N> {}

impl<T: PartialEq, N: Linked<Value = T>> PartialEq<[T]> for LinkedSequence<T, N> {
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq, N: Linked<Value = T>> PartialEq<Vec<T>> for LinkedSequence<T, N> {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq, N: Linked<Value = T>, const K: usize> PartialEq<[T; K]> for LinkedSequence<T, N> {
    fn eq(&self, other: &[T; K]) -> bool {
        *self == other[..]
    }
}

impl<T: fmt::Debug, N: Linked<Value = T>> fmt::Debug for LinkedSequence<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LinkedSequence")?;
        f.debug_list().entries(self.iter()).finish()
    }
}
