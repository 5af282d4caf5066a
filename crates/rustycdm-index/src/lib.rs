//! Section indexing for row-major scientific arrays.
//!
//! Given a variable stored in row-major order in a file, optionally with an
//! outer record dimension whose on-disk step is set independently, and a
//! hyperslab selection, this crate computes the ordered sequence of
//! contiguous byte runs that satisfy the request and where each run lands in
//! the flattened result.
//!
//! The crate performs no I/O. Format readers describe a variable with a
//! [`Layout`], build a [`Selection`], and drive a [`ChunkIterator`], copying
//! `chunk.element_count * element_size` bytes at `chunk.file_offset` to byte
//! `chunk.logical_index * element_size` of the result buffer.
//!
//! It supports `no_std` environments with the `alloc` crate.
//!
//! # Example
//!
//! ```
//! use rustycdm_index::{ChunkIterator, Layout, Selection};
//!
//! // A 4x3x3 byte array; rows 2..4 of the outer dimension, everything else.
//! let layout = Layout::new(&[4, 3, 3], 1);
//! let sel = Selection::parse("2:3,:,:", &[4, 3, 3]).unwrap();
//! let chunks: Vec<_> = ChunkIterator::new(&layout, &sel).collect();
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].file_offset, 18);
//! assert_eq!(chunks[0].element_count, 18);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chunk;
pub mod error;
pub mod iter;
pub mod layout;
pub mod planner;
pub mod range;
pub mod selection;

pub use chunk::Chunk;
pub use error::IndexError;
pub use iter::ChunkIterator;
pub use layout::{Dimension, Layout};
pub use planner::ChunkPlanner;
pub use range::Range;
pub use selection::Selection;
