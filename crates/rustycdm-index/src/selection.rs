//! Hyperslab selections: one [`Range`] per dimension.
//!
//! # Example
//!
//! ```
//! use rustycdm_index::selection::Selection;
//!
//! // Rows 1, 3, 5 and every column of a 6x4 variable.
//! let sel = Selection::parse("1:5:2,:", &[6, 4]).unwrap();
//! assert_eq!(sel.shape(), vec![3, 4]);
//! assert_eq!(sel.total_elements(), 12);
//! assert_eq!(sel.to_string(), "1:5:2,0:3");
//! ```

#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec::Vec};

use core::fmt;
use core::ops::Index;

use crate::error::IndexError;
use crate::range::Range;

/// A validated hyperslab, one range per dimension, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    ranges: Vec<Range>,
}

impl Selection {
    /// Wrap ranges that were each validated against their dimension.
    pub fn new(ranges: Vec<Range>) -> Self {
        Selection { ranges }
    }

    /// Select every element of a variable with the given shape.
    pub fn full(shape: &[u64]) -> Self {
        Selection {
            ranges: shape.iter().map(|&size| Range::full(size)).collect(),
        }
    }

    /// Build a selection from optional `(start, stride, count)` triples.
    ///
    /// `None` entries select the whole dimension.
    ///
    /// # Panics
    ///
    /// Panics if `requested` and `shape` differ in length.
    pub fn with_defaults(
        requested: &[Option<(u64, u64, u64)>],
        shape: &[u64],
    ) -> Result<Self, IndexError> {
        assert_eq!(
            requested.len(),
            shape.len(),
            "selection rank does not match variable rank"
        );
        let ranges = requested
            .iter()
            .zip(shape)
            .map(|(req, &size)| match *req {
                Some((start, stride, count)) => Range::new(start, stride, count, size),
                None => Ok(Range::full(size)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Selection { ranges })
    }

    /// Parse a section string such as `"1:10:2,:,3"`.
    ///
    /// Fields are separated by commas, one per dimension:
    /// - `:` selects the whole dimension
    /// - `i` selects a single index
    /// - `first:last` and `first:last:stride` select an inclusive span
    pub fn parse(spec: &str, shape: &[u64]) -> Result<Self, IndexError> {
        let bad = |reason: &'static str| IndexError::InvalidSectionSpec {
            spec: spec.to_string(),
            reason,
        };

        if shape.is_empty() {
            return if spec.trim().is_empty() {
                Ok(Selection { ranges: Vec::new() })
            } else {
                Err(bad("scalar variables take an empty section"))
            };
        }

        let fields: Vec<&str> = spec.split(',').map(str::trim).collect();
        if fields.len() != shape.len() {
            return Err(bad("number of fields does not match variable rank"));
        }

        let number = |s: &str| {
            s.trim()
                .parse::<u64>()
                .map_err(|_| bad("expected an unsigned integer"))
        };

        let mut ranges = Vec::with_capacity(shape.len());
        for (field, &size) in fields.iter().zip(shape) {
            let parts: Vec<&str> = field.split(':').collect();
            let range = match parts[..] {
                [""] => return Err(bad("empty field")),
                ["", ""] => Range::full(size),
                [index] => Range::single(number(index)?, size)?,
                [first, last] => Range::from_bounds(number(first)?, number(last)?, 1, size)?,
                [first, last, stride] => {
                    Range::from_bounds(number(first)?, number(last)?, number(stride)?, size)?
                }
                _ => return Err(bad("too many ':' separators")),
            };
            ranges.push(range);
        }
        Ok(Selection { ranges })
    }

    /// The ranges, outermost first.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.ranges.len()
    }

    /// Per-dimension element counts of the result.
    pub fn shape(&self) -> Vec<u64> {
        self.ranges.iter().map(Range::count).collect()
    }

    /// Number of selected elements.
    ///
    /// # Panics
    ///
    /// Panics if the count overflows a `u64`. Selections that fit a
    /// [`Layout`](crate::Layout) never do; see [`Selection::checked_total_elements`].
    pub fn total_elements(&self) -> u64 {
        match self.checked_total_elements() {
            Some(total) => total,
            None => panic!("selection element count overflows u64"),
        }
    }

    /// Number of selected elements, or `None` if it overflows a `u64`.
    pub fn checked_total_elements(&self) -> Option<u64> {
        if self.ranges.iter().any(Range::is_empty) {
            return Some(0);
        }
        self.ranges
            .iter()
            .try_fold(1u64, |total, r| total.checked_mul(r.count()))
    }

    /// Returns true if every range covers its whole dimension.
    pub fn is_full(&self, shape: &[u64]) -> bool {
        self.ranges.len() == shape.len()
            && self.ranges.iter().zip(shape).all(|(r, &size)| r.is_full(size))
    }
}

impl Index<usize> for Selection {
    type Output = Range;

    fn index(&self, dim: usize) -> &Range {
        &self.ranges[dim]
    }
}

impl From<Vec<Range>> for Selection {
    fn from(ranges: Vec<Range>) -> Self {
        Selection::new(ranges)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{r}")?;
        }
        Ok(())
    }
}
