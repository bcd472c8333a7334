//! Linked binary heap with a tree overlay
//!
//! A [`Heap`] is a [`LinkedSequence`] of [`TreeNode`]s. Besides the chain
//! links every node carries `parent`/`left`/`right` keys describing a complete
//! binary tree: the node at list position `i` is the parent of positions
//! `2i + 1` and `2i + 2`. Sifting walks the tree links and swaps values,
//! never nodes, so list order and tree shape stay in lockstep.
//!
//! - `insert` appends at the tail, attaches the new node to its parent in
//!   O(1) from the previous tail's links, then sifts up
//! - `extract_root` moves the tail value into the head, drops the tail node
//!   and sifts down
//! - `heapify` rebuilds the overlay in one linear pass and restores heap
//!   order bottom-up
//! - `merge` concatenates the chains and heapifies once
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `insert`       | O(log n)   |
//! | `extract_root` | O(log n)   |
//! | `peek`         | O(1)       |
//! | `heapify`      | O(n)       |
//! | `merge`        | O(n + m)   |
//!
//! # Example
//!
//! ```rust
//! use linked_heaps::heap::{Heap, HeapOrder};
//!
//! let mut heap = Heap::from_values([5, 3, 8, 1, 4], HeapOrder::Min);
//! assert_eq!(heap.peek(), Some(&1));
//!
//! heap.insert(0);
//! assert_eq!(heap.extract_root(), Ok(0));
//! assert_eq!(heap.extract_root(), Ok(1));
//!
//! heap.set_order(HeapOrder::Max).unwrap();
//! assert_eq!(heap.extract_root(), Ok(8));
//! ```

use crate::node::TreeNode;
use crate::sequence::{Iter, LinkedSequence};
use crate::storage::NodeKey;
use crate::traits::{Linked, SeqError, SeqResult};
use std::fmt;

/// Which end of the ordering a [`Heap`] keeps at its root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeapOrder {
    /// Smallest value first
    #[default]
    Min,
    /// Largest value first
    Max,
}

impl HeapOrder {
    /// Returns true if `a` must sit above `b`
    ///
    /// Equal values are never preferred, so sifting stops on ties.
    #[inline]
    pub fn prefers<T: Ord + ?Sized>(self, a: &T, b: &T) -> bool {
        match self {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }

    /// The opposite order
    pub fn reversed(self) -> Self {
        match self {
            HeapOrder::Min => HeapOrder::Max,
            HeapOrder::Max => HeapOrder::Min,
        }
    }
}

/// A mergeable binary heap stored as a linked chain with a tree overlay
pub struct Heap<T> {
    seq: LinkedSequence<T, TreeNode<T>>,
    order: HeapOrder,
}

impl<T: Ord> Heap<T> {
    /// Creates an empty heap
    pub fn new(order: HeapOrder) -> Self {
        Self {
            seq: LinkedSequence::new(),
            order,
        }
    }

    /// Builds a heap from `values` in O(n)
    ///
    /// The overlay is attached node by node as the chain grows, then heap
    /// order is restored bottom-up.
    pub fn from_values<I>(values: I, order: HeapOrder) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut heap = Self::new(order);
        for value in values {
            heap.append_attached(value);
        }
        heap.restore_order();
        heap
    }

    /// Adopts the values of any sequence, rebuilding them as a heap
    pub fn from_sequence<N>(seq: LinkedSequence<T, N>, order: HeapOrder) -> Self
    where
        N: Linked<Value = T>,
    {
        Self::from_values(seq, order)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    #[inline]
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Switches the ordering, re-heapifying if it changed
    pub fn set_order(&mut self, order: HeapOrder) -> SeqResult<()> {
        if order == self.order {
            return Ok(());
        }
        self.order = order;
        self.heapify()
    }

    /// The root value, best per the current order
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.seq.front()
    }

    /// Values in list (level) order
    pub fn iter(&self) -> Iter<'_, TreeNode<T>> {
        self.seq.iter()
    }

    /// Read-only view of the underlying chain
    pub fn as_sequence(&self) -> &LinkedSequence<T, TreeNode<T>> {
        &self.seq
    }

    /// Consumes the heap, returning the values in list order
    pub fn into_sequence(self) -> LinkedSequence<T> {
        self.seq.into_iter().collect()
    }

    /// Consumes the heap, returning the values in root-first order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Ok(value) = self.extract_root() {
            out.push(value);
        }
        out
    }

    /// Inserts a value
    pub fn insert(&mut self, value: T) {
        let key = self.append_attached(value);
        self.sift_up(key);
    }

    /// Removes and returns the root value
    ///
    /// # Errors
    /// Returns [`SeqError::EmptyContainer`] if the heap is empty.
    pub fn extract_root(&mut self) -> SeqResult<T> {
        let head = self.seq.head_key().ok_or(SeqError::EmptyContainer)?;
        let tail = self.seq.tail_key().ok_or(SeqError::EmptyContainer)?;
        if head == tail {
            return self.seq.pop_back();
        }

        if let Some(parent) = self.seq.node(tail).parent {
            self.seq.node_mut(parent).forget_child(tail);
        }
        let last = self.seq.unlink(tail).into_value();
        let root = std::mem::replace(self.seq.node_mut(head).value_mut(), last);
        self.sift_down(head);
        Ok(root)
    }

    /// Rebuilds the tree overlay from list order, then restores heap order
    ///
    /// The overlay is rebuilt with a slow cursor over parents and a fast
    /// cursor over children moving two nodes per step, so each parent takes
    /// the next two unassigned nodes as its children. Sifting then runs from
    /// the last parent back to the root.
    ///
    /// # Errors
    /// Returns [`SeqError::InvalidStructure`] if the chain turns out to be
    /// circular.
    pub fn heapify(&mut self) -> SeqResult<()> {
        let Some(head) = self.seq.head_key() else {
            return Ok(());
        };
        self.seq.node_mut(head).clear_tree_links();
        let Some(mut fast) = self.seq.node(head).next() else {
            return Ok(());
        };

        let mut slow = head;
        self.adopt_children(slow, fast);
        loop {
            let Some(second) = self.seq.node(fast).next() else {
                break;
            };
            let Some(third) = self.seq.node(second).next() else {
                break;
            };
            if slow == fast || slow == second {
                return Err(SeqError::InvalidStructure("circular lists cannot be heapified"));
            }
            slow = self
                .seq
                .node(slow)
                .next()
                .ok_or(SeqError::InvalidStructure("parent cursor ran off the chain"))?;
            fast = third;
            self.adopt_children(slow, fast);
        }

        self.sift_down_from(slow);

        #[cfg(debug_assertions)]
        self.debug_audit("heapify");
        Ok(())
    }

    /// Merges another heap into this one, consuming it
    ///
    /// The donor's ordering is discarded in favour of this heap's; the
    /// chains are concatenated and the result is heapified once.
    pub fn merge(&mut self, other: Heap<T>) -> SeqResult<()> {
        self.seq.merge(other.seq);
        self.heapify()
    }

    /// Merges a plain sequence into this heap, consuming it
    pub fn merge_sequence<N>(&mut self, other: LinkedSequence<T, N>) -> SeqResult<()>
    where
        N: Linked<Value = T>,
    {
        self.merge(Heap::from_values(other, self.order))
    }

    /// Verifies the overlay shape and heap order
    ///
    /// The node at list position `i` must have the nodes at `2i + 1` and
    /// `2i + 2` as children and the node at `(i - 1) / 2` as parent, and no
    /// child may be preferred over its parent.
    ///
    /// # Errors
    /// Returns [`SeqError::InvalidStructure`] describing the first violation.
    pub fn check_invariants(&self) -> SeqResult<()> {
        self.seq.check_invariants()?;

        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.seq.head_key();
        while let Some(key) = cursor {
            keys.push(key);
            cursor = self.seq.node(key).next();
        }

        for (i, &key) in keys.iter().enumerate() {
            let node = self.seq.node(key);
            let parent = i.checked_sub(1).map(|p| keys[p / 2]);
            if node.parent != parent {
                return Err(SeqError::InvalidStructure("parent link does not match position"));
            }
            if node.left != keys.get(2 * i + 1).copied()
                || node.right != keys.get(2 * i + 2).copied()
            {
                return Err(SeqError::InvalidStructure("child link does not match position"));
            }
            for child in node.children() {
                if self.order.prefers(self.value(child), node.value()) {
                    return Err(SeqError::InvalidStructure("heap order violated"));
                }
            }
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn debug_audit(&self, op: &str) {
        if let Err(err) = self.check_invariants() {
            panic!("heap corrupted after {op}: {err}");
        }
    }

    #[inline]
    fn value(&self, key: NodeKey) -> &T {
        self.seq.node(key).value()
    }

    /// Appends a value and hooks its node into the tree overlay
    ///
    /// The slot is derived from the previous tail: the root takes a left
    /// child; a parent that lacks a right child takes one; otherwise the
    /// parent's successor in the chain takes a left child.
    fn append_attached(&mut self, value: T) -> NodeKey {
        let prev_tail = self.seq.tail_key();
        let key = self.seq.push_back_key(value);
        let Some(prev_tail) = prev_tail else {
            return key;
        };

        let parent = match self.seq.node(prev_tail).parent {
            None => Some(prev_tail),
            Some(p) if self.seq.node(p).right.is_some() => self.seq.node(p).next(),
            Some(p) => Some(p),
        };
        if let Some(parent) = parent {
            let slot = self.seq.node_mut(parent);
            if slot.left.is_none() {
                slot.left = Some(key);
            } else {
                slot.right = Some(key);
            }
            self.seq.node_mut(key).parent = Some(parent);
        }
        key
    }

    /// Makes `first` and its successor the children of `parent`
    fn adopt_children(&mut self, parent: NodeKey, first: NodeKey) {
        let second = self.seq.node(first).next();

        let node = self.seq.node_mut(parent);
        node.left = Some(first);
        node.right = second;

        for child in std::iter::once(first).chain(second) {
            let node = self.seq.node_mut(child);
            node.clear_tree_links();
            node.parent = Some(parent);
        }
    }

    /// Sift-down pass over every parent, from the last one to the root
    fn restore_order(&mut self) {
        if self.len() < 2 {
            return;
        }
        // The tail's parent is the last node with children
        let last_parent = self
            .seq
            .tail_key()
            .and_then(|tail| self.seq.node(tail).parent);
        if let Some(last_parent) = last_parent {
            self.sift_down_from(last_parent);
        }

        #[cfg(debug_assertions)]
        self.debug_audit("restore_order");
    }

    fn sift_down_from(&mut self, last_parent: NodeKey) {
        let mut cursor = Some(last_parent);
        while let Some(key) = cursor {
            self.sift_down(key);
            cursor = self.seq.node(key).prev();
        }
    }

    fn sift_up(&mut self, mut key: NodeKey) {
        while let Some(parent) = self.seq.node(key).parent {
            if !self.order.prefers(self.value(key), self.value(parent)) {
                break;
            }
            self.seq.swap_values(key, parent);
            key = parent;
        }
    }

    fn sift_down(&mut self, mut key: NodeKey) {
        loop {
            let mut best = key;
            for child in self.seq.node(key).children() {
                if self.order.prefers(self.value(child), self.value(best)) {
                    best = child;
                }
            }
            if best == key {
                break;
            }
            self.seq.swap_values(key, best);
            key = best;
        }
    }
}

impl<T: Ord> Default for Heap<T> {
    fn default() -> Self {
        Self::new(HeapOrder::default())
    }
}

impl<T: Ord + Clone> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Self::from_values(self.iter().cloned(), self.order)
    }
}

impl<T: Ord> FromIterator<T> for Heap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter, HeapOrder::Min)
    }
}

impl<T: Ord> Extend<T> for Heap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Heap<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, TreeNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.seq.iter()
    }
}

/// Heaps are equal when their roots, orders and value multisets match
///
/// Tree shape is not compared: different insertion histories can encode the
/// same multiset.
impl<T: Ord> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.order != other.order || self.len() != other.len() || self.peek() != other.peek() {
            return false;
        }
        let mut ours: Vec<&T> = self.seq.iter().collect();
        let mut theirs: Vec<&T> = other.seq.iter().collect();
        ours.sort_unstable();
        theirs.sort_unstable();
        ours == theirs
    }
}

impl<T: Ord> Eq for Heap<T> {}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("values", &self.seq.iter().collect::<Vec<_>>())
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = Heap::new(HeapOrder::Min);

        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.extract_root(), Err(SeqError::EmptyContainer));

        heap.insert(3);
        heap.insert(1);
        heap.insert(2);

        assert!(!heap.is_empty());
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some(&1));
        assert!(heap.check_invariants().is_ok());

        assert_eq!(heap.extract_root(), Ok(1));
        assert_eq!(heap.extract_root(), Ok(2));
        assert_eq!(heap.extract_root(), Ok(3));
        assert_eq!(heap.extract_root(), Err(SeqError::EmptyContainer));
    }

    #[test]
    fn test_insert_then_extract_on_empty() {
        let mut heap = Heap::default();
        heap.insert("only");
        assert_eq!(heap.extract_root(), Ok("only"));
        assert!(heap.is_empty());
        assert!(heap.check_invariants().is_ok());
    }

    #[test]
    fn test_min_and_max_extraction_order() {
        let min = Heap::from_values([5, 3, 8, 1, 4], HeapOrder::Min);
        assert_eq!(min.into_sorted_vec(), vec![1, 3, 4, 5, 8]);

        let max = Heap::from_values([5, 3, 8, 1, 4], HeapOrder::Max);
        assert_eq!(max.into_sorted_vec(), vec![8, 5, 4, 3, 1]);
    }

    #[test]
    fn test_overlay_matches_positions() {
        let mut heap = Heap::new(HeapOrder::Min);
        for i in (0..20).rev() {
            heap.insert(i);
            assert!(heap.check_invariants().is_ok());
        }
        for _ in 0..10 {
            heap.extract_root().unwrap();
            assert!(heap.check_invariants().is_ok());
        }
    }

    #[test]
    fn test_heapify_matches_level_order() {
        // Same layout a binary heap over [9, 8, ..., 0] converges to
        let mut expected: Vec<i32> = (0..10).rev().collect();
        sift_array(&mut expected);

        let heap = Heap::from_values((0..10).rev(), HeapOrder::Min);
        assert_eq!(heap.iter().copied().collect::<Vec<_>>(), expected);
    }

    fn sift_array(data: &mut [i32]) {
        for start in (0..data.len() / 2).rev() {
            let mut i = start;
            loop {
                let mut best = i;
                for child in [2 * i + 1, 2 * i + 2] {
                    if child < data.len() && data[child] < data[best] {
                        best = child;
                    }
                }
                if best == i {
                    break;
                }
                data.swap(i, best);
                i = best;
            }
        }
    }

    #[test]
    fn test_set_order_reheapifies() {
        let mut heap = Heap::from_values(0..10, HeapOrder::Min);
        assert_eq!(heap.peek(), Some(&0));
        heap.set_order(HeapOrder::Max).unwrap();
        assert_eq!(heap.peek(), Some(&9));
        assert!(heap.check_invariants().is_ok());
        heap.set_order(HeapOrder::Max.reversed()).unwrap();
        assert_eq!(heap.peek(), Some(&0));
    }

    #[test]
    fn test_merge_adopts_receiver_order() {
        let mut max = Heap::from_values([1, 5, 2], HeapOrder::Max);
        let min = Heap::from_values([7, 0, 3], HeapOrder::Min);
        max.merge(min).unwrap();

        assert_eq!(max.order(), HeapOrder::Max);
        assert_eq!(max.len(), 6);
        assert!(max.check_invariants().is_ok());
        assert_eq!(max.into_sorted_vec(), vec![7, 5, 3, 2, 1, 0]);
    }

    #[test]
    fn test_merge_sequence() {
        let mut heap = Heap::from_values([4, 2], HeapOrder::Min);
        let seq: LinkedSequence<i32> = vec![3, 1].into();
        heap.merge_sequence(seq).unwrap();
        assert_eq!(heap.into_sorted_vec(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_equality_ignores_shape() {
        let a = Heap::from_values([1, 2, 3, 4], HeapOrder::Min);
        let mut b = Heap::new(HeapOrder::Min);
        for v in [4, 3, 2, 1] {
            b.insert(v);
        }
        assert_eq!(a, b);

        let c = Heap::from_values([1, 2, 3, 4], HeapOrder::Max);
        assert_ne!(a, c);
        let d = Heap::from_values([1, 2, 3, 5], HeapOrder::Min);
        assert_ne!(a, d);
        assert_eq!(Heap::<i32>::default(), Heap::new(HeapOrder::Min));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut heap = Heap::from_values([3, 1, 2], HeapOrder::Min);
        let copy = heap.clone();
        assert_eq!(copy, heap);
        heap.extract_root().unwrap();
        assert_eq!(copy.len(), 3);
        assert_ne!(copy, heap);
    }

    #[test]
    fn test_duplicate_values() {
        let heap = Heap::from_values([2, 1, 2, 1, 2], HeapOrder::Max);
        assert_eq!(heap.into_sorted_vec(), vec![2, 2, 2, 1, 1]);
    }

    #[test]
    fn test_debug_format() {
        let heap = Heap::from_values([2, 1], HeapOrder::Min);
        assert_eq!(format!("{:?}", heap), "Heap { values: [1, 2], order: Min }");
    }
}
