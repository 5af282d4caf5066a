//! Odometer over the outer-loop dimensions of a planned selection.
//!
//! Each outer-loop coordinate produces one [`Chunk`]. Chunks come out in
//! row-major order of the selection, so their logical indices increase
//! strictly and tile `[0, total_elements)` without gaps.
//!
//! # Example
//!
//! ```
//! use rustycdm_index::{ChunkIterator, Layout, Selection};
//!
//! let layout = Layout::new(&[29, 40], 1);
//! let sel = Selection::with_defaults(&[Some((0, 1, 7)), Some((0, 1, 9))], &[29, 40]).unwrap();
//! let offsets: Vec<u64> = ChunkIterator::new(&layout, &sel).map(|c| c.file_offset).collect();
//! assert_eq!(offsets, vec![0, 40, 80, 120, 160, 200, 240]);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use core::iter::FusedIterator;

use crate::chunk::Chunk;
use crate::layout::Layout;
use crate::planner::ChunkPlanner;
use crate::selection::Selection;

/// Restartable iterator yielding the chunks of one section request.
///
/// Not safe for concurrent mutation; each instance carries its own
/// odometer and may be moved between threads.
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    layout: Layout,
    selection: Selection,
    planner: ChunkPlanner,
    /// Selected count of each outer-loop dimension.
    counts: Vec<u64>,
    /// File bytes between successive odometer positions of each outer-loop dimension.
    steps: Vec<u64>,
    /// File offset of the first chunk.
    origin: u64,
    idx: Vec<u64>,
    offset: u64,
    emitted: u64,
    done: bool,
}

impl ChunkIterator {
    /// Plan `selection` over `layout` and position the odometer at the first chunk.
    ///
    /// # Panics
    ///
    /// Panics if the selection rank differs from the layout rank, or if a
    /// range reaches past its dimension.
    pub fn new(layout: &Layout, selection: &Selection) -> Self {
        let planner = ChunkPlanner::new(layout, selection);
        let outer = planner.outer_dims();
        let elem = layout.element_size();
        let record_size = layout.record_size();
        let empty = planner.total_elements() == 0;

        // an empty selection never moves, and its starts need not be in range
        let mut origin = layout.base_offset();
        if !empty {
            for (i, range) in selection.ranges().iter().enumerate() {
                origin += match record_size {
                    Some(rs) if i == 0 => range.start() * rs,
                    _ => range.start() * layout.inner_stride_elems(i) * elem,
                };
            }
        }

        // a dimension with one selected index never steps
        let steps = (0..outer)
            .map(|i| match record_size {
                _ if empty || selection[i].count() < 2 => 0,
                Some(rs) if i == 0 => selection[0].stride() * rs,
                _ => selection[i].stride() * layout.inner_stride_elems(i) * elem,
            })
            .collect();
        let counts = selection.ranges()[..outer].iter().map(|r| r.count()).collect();

        ChunkIterator {
            layout: layout.clone(),
            selection: selection.clone(),
            planner,
            counts,
            steps,
            origin,
            idx: vec![0; outer],
            offset: origin,
            emitted: 0,
            done: planner.total_elements() == 0,
        }
    }

    /// Returns true if another chunk remains.
    pub fn has_next(&self) -> bool {
        !self.done
    }

    /// Rewind to the first chunk.
    pub fn reset(&mut self) {
        self.idx.iter_mut().for_each(|i| *i = 0);
        self.offset = self.origin;
        self.emitted = 0;
        self.done = self.planner.total_elements() == 0;
    }

    /// Number of selected elements.
    pub fn total_elements(&self) -> u64 {
        self.planner.total_elements()
    }

    /// Elements per chunk.
    pub fn chunk_size(&self) -> u64 {
        self.planner.chunk_size()
    }

    /// The chunk a full iteration ends with, regardless of the odometer position.
    ///
    /// Every odometer step moves forward in the file, so this chunk also
    /// reaches the highest byte the request touches.
    pub fn last_chunk(&self) -> Option<Chunk> {
        let count = self.planner.chunk_count();
        if count == 0 {
            return None;
        }
        let span: u64 = self
            .counts
            .iter()
            .zip(&self.steps)
            .map(|(&n, &step)| (n - 1) * step)
            .sum();
        let chunk_size = self.planner.chunk_size();
        Some(Chunk {
            file_offset: self.origin + span,
            element_count: chunk_size,
            logical_index: (count - 1) * chunk_size,
        })
    }

    /// The merge decision driving this iterator.
    pub fn planner(&self) -> &ChunkPlanner {
        &self.planner
    }

    /// The layout being indexed.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The selection being indexed.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Step the odometer, innermost outer-loop dimension first.
    fn advance(&mut self) {
        for i in (0..self.idx.len()).rev() {
            self.idx[i] += 1;
            if self.idx[i] < self.counts[i] {
                self.offset += self.steps[i];
                return;
            }
            // carry: rewind this dimension to its first coordinate
            self.offset -= (self.counts[i] - 1) * self.steps[i];
            self.idx[i] = 0;
        }
        self.done = true;
    }
}

impl Iterator for ChunkIterator {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.done {
            return None;
        }
        let chunk_size = self.planner.chunk_size();
        let chunk = Chunk {
            file_offset: self.offset,
            element_count: chunk_size,
            logical_index: self.emitted * chunk_size,
        };
        self.emitted += 1;
        self.advance();
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.planner.chunk_count() - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChunkIterator {}

impl FusedIterator for ChunkIterator {}
