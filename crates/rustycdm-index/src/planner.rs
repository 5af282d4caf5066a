//! Coalescing of selected dimensions into contiguous runs.
//!
//! Walking from the innermost dimension outwards, a dimension joins the
//! contiguous run while every dimension inside it is selected in full with
//! unit stride. The first partially selected unit-stride dimension still
//! joins (its selected indices are adjacent), but closes the run. A
//! non-unit stride closes the run without joining, and a record dimension
//! never joins because its on-disk step is independent of the element
//! layout.
//!
//! Dimensions outside the run are the outer-loop dimensions that
//! [`ChunkIterator`](crate::iter::ChunkIterator) steps through, one chunk per
//! coordinate.

use crate::layout::Layout;
use crate::selection::Selection;

/// The merge decision for one `(Layout, Selection)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlanner {
    chunk_size: u64,
    outer_dims: usize,
    total_elements: u64,
}

impl ChunkPlanner {
    /// Plan the chunking of `selection` over `layout`.
    ///
    /// # Panics
    ///
    /// Panics if the selection rank differs from the layout rank, or if any
    /// range reaches past the size of its dimension.
    pub fn new(layout: &Layout, selection: &Selection) -> Self {
        assert_eq!(
            layout.rank(),
            selection.rank(),
            "selection rank does not match layout rank"
        );
        for (i, (range, dim)) in selection.ranges().iter().zip(layout.dims()).enumerate() {
            assert!(
                range.last().map_or(true, |last| last < dim.size),
                "range {range} exceeds dimension {i} of size {}",
                dim.size
            );
        }

        let rank = layout.rank();
        let record = layout.has_record_dimension();
        let mut chunk_size = 1u64;
        let mut first_merged = rank;
        let mut mergeable = true;

        // first_merged is always i + 1 whenever the loop breaks
        for i in (0..rank).rev() {
            if (record && i == 0) || !mergeable {
                break;
            }
            let range = &selection[i];
            if range.stride() != 1 {
                break;
            }
            chunk_size *= range.count();
            first_merged = i;
            if !range.is_full(layout.dims()[i].size) {
                mergeable = false;
            }
        }

        ChunkPlanner {
            chunk_size,
            outer_dims: first_merged,
            total_elements: selection.total_elements(),
        }
    }

    /// Elements per chunk.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Number of outer-loop dimensions. Dimensions `[0, outer_dims)` are
    /// iterated; `[outer_dims, rank)` are merged into each chunk.
    pub fn outer_dims(&self) -> usize {
        self.outer_dims
    }

    /// Number of selected elements.
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Number of chunks a full iteration yields.
    pub fn chunk_count(&self) -> u64 {
        if self.total_elements == 0 {
            0
        } else {
            self.total_elements / self.chunk_size
        }
    }
}
