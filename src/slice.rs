//! Slice descriptors with Python sequence semantics
//!
//! A [`Slice`] is the `start:stop:step` triple of a Python subscript. Every
//! part is optional and may be negative; [`Slice::indices`] resolves it
//! against a concrete length exactly like `slice.indices()` does:
//!
//! | step | default start | default stop | clamp range      |
//! |------|---------------|--------------|------------------|
//! | > 0  | `0`           | `len`        | `[0, len]`       |
//! | < 0  | `len - 1`     | `-1` (before the head) | `[-1, len - 1]` |
//!
//! # Example
//!
//! ```rust
//! use linked_heaps::slice::Slice;
//!
//! let ix = Slice::new(Some(4), Some(1), Some(-1)).indices(6).unwrap();
//! assert_eq!(ix.positions().collect::<Vec<_>>(), vec![4, 3, 2]);
//!
//! let ix = Slice::from(-2..).indices(6).unwrap();
//! assert_eq!(ix.positions().collect::<Vec<_>>(), vec![4, 5]);
//! ```

use crate::traits::{SeqError, SeqResult};
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// A `start:stop:step` slice; `None` parts take their defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl Slice {
    pub const fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// The whole sequence, `[:]`
    pub const fn full() -> Self {
        Self::new(None, None, None)
    }

    /// Same bounds with a different step
    pub const fn step_by(self, step: isize) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Resolves the slice against a sequence of length `len`
    ///
    /// # Errors
    /// Returns [`SeqError::ZeroSliceStep`] if the step is zero.
    pub fn indices(&self, len: usize) -> SeqResult<SliceIndices> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(SeqError::ZeroSliceStep);
        }
        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(b) if b < 0 => (b + len).max(lower),
            Some(b) => b.min(upper),
        };

        let start = clamp(self.start, if step < 0 { upper } else { lower });
        let stop = clamp(self.stop, if step < 0 { lower } else { upper });
        Ok(SliceIndices { start, stop, step })
    }
}

impl From<Range<isize>> for Slice {
    fn from(range: Range<isize>) -> Self {
        Self::new(Some(range.start), Some(range.end), None)
    }
}

impl From<RangeFrom<isize>> for Slice {
    fn from(range: RangeFrom<isize>) -> Self {
        Self::new(Some(range.start), None, None)
    }
}

impl From<RangeTo<isize>> for Slice {
    fn from(range: RangeTo<isize>) -> Self {
        Self::new(None, Some(range.end), None)
    }
}

impl From<RangeFull> for Slice {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

/// A slice resolved against a concrete length
///
/// `start` and `stop` are already clamped; `stop` may be `-1` for a negative
/// step that runs off the head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceIndices {
    pub start: isize,
    pub stop: isize,
    pub step: isize,
}

impl SliceIndices {
    /// Number of positions the slice visits
    pub fn len(&self) -> usize {
        let span = if self.step > 0 {
            self.stop - self.start
        } else {
            self.start - self.stop
        };
        if span <= 0 {
            return 0;
        }
        // unsigned_abs keeps isize::MIN representable
        (span as usize - 1) / self.step.unsigned_abs() + 1
    }

    /// Returns true if the step leads away from `stop`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true for a plain `start:stop` run
    pub fn is_contiguous(&self) -> bool {
        self.step == 1
    }

    /// Visited positions in visiting order
    pub fn positions(&self) -> impl Iterator<Item = usize> {
        let (start, step) = (self.start, self.step);
        (0..self.len()).map(move |i| (start + i as isize * step) as usize)
    }
}

/// Target of a dynamic subscript: one position or a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    At(isize),
    Slice(Slice),
}

impl From<isize> for Index {
    fn from(index: isize) -> Self {
        Index::At(index)
    }
}

impl From<Slice> for Index {
    fn from(slice: Slice) -> Self {
        Index::Slice(slice)
    }
}

/// What a dynamic subscript reads or writes: one value or a run of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Values<T> {
    Single(T),
    Many(Vec<T>),
}

impl<T> Values<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Values::Single(value) => vec![value],
            Values::Many(values) => values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(slice: Slice, len: usize) -> Vec<usize> {
        slice.indices(len).unwrap().positions().collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(positions(Slice::full(), 4), vec![0, 1, 2, 3]);
        assert_eq!(positions(Slice::full().step_by(-1), 4), vec![3, 2, 1, 0]);
        assert_eq!(positions(Slice::full().step_by(2), 5), vec![0, 2, 4]);
        assert!(positions(Slice::full(), 0).is_empty());
    }

    #[test]
    fn test_negative_bounds() {
        assert_eq!(positions(Slice::from(-3..-1), 6), vec![3, 4]);
        assert_eq!(positions(Slice::from(..-4), 6), vec![0, 1]);
        assert_eq!(
            positions(Slice::new(Some(-1), Some(-4), Some(-1)), 6),
            vec![5, 4, 3]
        );
    }

    #[test]
    fn test_clamping() {
        let ix = Slice::from(-100..100).indices(5).unwrap();
        assert_eq!((ix.start, ix.stop), (0, 5));

        let ix = Slice::new(Some(100), Some(-100), Some(-1)).indices(5).unwrap();
        assert_eq!((ix.start, ix.stop), (4, -1));
        assert_eq!(ix.len(), 5);
    }

    #[test]
    fn test_wrong_direction_is_empty() {
        assert!(Slice::from(4..1).indices(6).unwrap().is_empty());
        assert!(Slice::new(Some(1), Some(4), Some(-1))
            .indices(6)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_step() {
        assert_eq!(
            Slice::full().step_by(0).indices(3),
            Err(SeqError::ZeroSliceStep)
        );
    }

    #[test]
    fn test_uneven_stride_len() {
        let ix = Slice::new(Some(1), Some(8), Some(3)).indices(10).unwrap();
        assert_eq!(ix.len(), 3);
        assert_eq!(ix.positions().collect::<Vec<_>>(), vec![1, 4, 7]);
    }

    #[test]
    fn test_extreme_steps() {
        assert_eq!(positions(Slice::full().step_by(isize::MIN), 3), vec![2]);
        assert_eq!(positions(Slice::full().step_by(isize::MAX), 3), vec![0]);
        assert!(positions(Slice::full().step_by(isize::MIN), 0).is_empty());
        assert_eq!(
            positions(Slice::new(Some(1), None, Some(isize::MIN)), 3),
            vec![1]
        );
    }
}
