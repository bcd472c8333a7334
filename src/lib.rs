//! Linked Sequences and Heaps for Rust
//!
//! This crate provides a doubly-linked sequence with Python-style indexing
//! and slicing, and a binary heap built on the same chain by overlaying a
//! complete binary tree on its nodes.
//!
//! # Features
//!
//! - **LinkedSequence**: O(1) push/pop at both ends; negative indices; slices
//!   with any nonzero step; contiguous slice assignment as an O(1) splice
//!   once the boundaries are found; consuming concatenation
//! - **Heap**: min- or max-ordered; O(log n) insert and extract; O(n)
//!   heapify and merge; the ordering can be flipped after construction
//! - **Queue / Stack**: FIFO and LIFO adapters over the sequence
//!
//! Nodes live in a per-container [`slotmap`] arena and link to each other by
//! key, so there is no `unsafe` and no reference counting.
//!
//! # Example
//!
//! ```rust
//! use linked_heaps::{Heap, HeapOrder, LinkedSequence, Slice};
//!
//! let mut seq: LinkedSequence<i32> = (0..6).collect();
//! seq.delete_slice(Slice::full().step_by(2)).unwrap();
//! assert_eq!(seq, vec![1, 3, 5]);
//!
//! let mut heap = Heap::from_sequence(seq, HeapOrder::Max);
//! heap.insert(4);
//! assert_eq!(heap.extract_root(), Ok(5));
//! assert_eq!(heap.extract_root(), Ok(4));
//! ```

pub mod adapters;
pub mod heap;
pub mod node;
pub mod sequence;
pub mod slice;
pub mod storage;
pub mod traits;

// Re-export the main types for convenience
pub use adapters::{Queue, Stack};
pub use heap::{Heap, HeapOrder};
pub use sequence::LinkedSequence;
pub use slice::{Index, Slice, Values};
pub use traits::{Linked, SeqError, SeqResult};
