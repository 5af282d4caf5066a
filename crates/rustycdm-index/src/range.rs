//! One-dimensional strided selections.
//!
//! A [`Range`] picks `count` indices from a dimension, starting at `start`
//! and stepping by `stride`. Ranges are validated against the size of the
//! dimension they are built for and are immutable afterwards.
//!
//! # Example
//!
//! ```
//! use rustycdm_index::range::Range;
//!
//! // Every other index from 2 to 8 of a 10-element dimension.
//! let r = Range::new(2, 2, 4, 10).unwrap();
//! assert_eq!(r.iter().collect::<Vec<_>>(), vec![2, 4, 6, 8]);
//! assert_eq!(r.to_string(), "2:8:2");
//! ```

use core::fmt;

use crate::error::IndexError;

/// A validated `(start, stride, count)` selection over one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    start: u64,
    stride: u64,
    count: u64,
}

impl Range {
    /// Build a range over a dimension of `dim_size` elements.
    ///
    /// Fails with [`IndexError::InvalidRange`] when `stride` is zero or when
    /// the last selected index `start + (count - 1) * stride` falls outside
    /// the dimension. A `count` of zero is a valid, empty range.
    pub fn new(start: u64, stride: u64, count: u64, dim_size: u64) -> Result<Self, IndexError> {
        let invalid = || IndexError::InvalidRange {
            requested: (start, stride, count),
            dim_size,
        };
        if stride == 0 {
            return Err(invalid());
        }
        if count > 0 {
            let last = (count - 1)
                .checked_mul(stride)
                .and_then(|span| start.checked_add(span))
                .ok_or_else(invalid)?;
            if last >= dim_size {
                return Err(invalid());
            }
        }
        Ok(Range {
            start,
            stride,
            count,
        })
    }

    /// Select the whole dimension.
    pub fn full(dim_size: u64) -> Self {
        Range {
            start: 0,
            stride: 1,
            count: dim_size,
        }
    }

    /// Select a single index.
    pub fn single(index: u64, dim_size: u64) -> Result<Self, IndexError> {
        Range::new(index, 1, 1, dim_size)
    }

    /// Build a range from inclusive bounds, `first:last:stride` style.
    ///
    /// `last` need not be hit exactly: the range stops at the largest
    /// `first + k * stride` that does not exceed it.
    pub fn from_bounds(first: u64, last: u64, stride: u64, dim_size: u64) -> Result<Self, IndexError> {
        if stride == 0 || last < first {
            return Err(IndexError::InvalidRange {
                requested: (first, stride, 0),
                dim_size,
            });
        }
        Range::new(first, stride, (last - first) / stride + 1, dim_size)
    }

    /// First selected index.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Step between selected indices.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of selected indices.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Last selected index, or `None` for an empty range.
    pub fn last(&self) -> Option<u64> {
        self.element(self.count.checked_sub(1)?)
    }

    /// The `i`-th selected index.
    pub fn element(&self, i: u64) -> Option<u64> {
        (i < self.count).then(|| self.start + i * self.stride)
    }

    /// Returns true if this range selects all of a dimension of `dim_size`.
    pub fn is_full(&self, dim_size: u64) -> bool {
        self.stride == 1 && self.start == 0 && self.count == dim_size
    }

    /// Iterate the selected indices in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u64> + Clone {
        let Range { start, stride, count } = *self;
        (0..count).map(move |i| start + i * stride)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last() {
            None => f.write_str("empty"),
            Some(last) if self.stride == 1 => write!(f, "{}:{}", self.start, last),
            Some(last) => write!(f, "{}:{}:{}", self.start, last, self.stride),
        }
    }
}
