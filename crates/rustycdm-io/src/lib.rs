//! Section reads and writes for row-major scientific variables.
//!
//! Connects the chunk plans of [`rustycdm_index`] to byte storage. A
//! [`ByteSource`] answers positioned reads and a [`ByteSink`] positioned
//! writes; the section functions perform one transfer per planned chunk.
//!
//! Sources:
//! - [`MemorySource`]: owned `Vec<u8>`, also writable
//! - [`BorrowedSource`]: borrowed `&[u8]`
//! - [`FileSource`]: positioned file I/O, writable when opened read-write
//! - [`MmapSource`]: memory-mapped file (feature `mmap`)
//!
//! With the `parallel` feature, [`read_section_parallel`] reads the chunks of
//! large requests concurrently with rayon.
//!
//! # Example
//!
//! ```
//! use rustycdm_io::{read_section, Layout, MemorySource, Selection};
//!
//! let src = MemorySource::new((0u8..12).collect());
//! let layout = Layout::new(&[3, 4], 1);
//! let sel = Selection::parse("1:2,1:2", &[3, 4]).unwrap();
//! assert_eq!(read_section(&src, &layout, &sel).unwrap(), vec![5, 6, 9, 10]);
//! ```

pub mod classic;
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap;
pub mod options;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod profiling;
pub mod section;
pub mod source;

pub use rustycdm_index;
pub use rustycdm_index::{Chunk, ChunkIterator, Layout, Range, Selection};

pub use classic::{ClassicFile, ClassicStorage, ClassicVariable, NcType, VariableStorage};
pub use error::{IoError, Result};
#[cfg(feature = "mmap")]
pub use mmap::MmapSource;
pub use options::{ReadOptions, DEFAULT_PARALLEL_THRESHOLD};
#[cfg(feature = "parallel")]
pub use parallel::{read_section_into_parallel, read_section_parallel, should_use_parallel};
pub use profiling::{DefaultProfiler, IoProfiler, NoopProfiler};
pub use section::{
    read_section, read_section_into, read_section_into_with, read_section_with,
    section_byte_len, write_section, write_section_with,
};
pub use source::{BorrowedSource, ByteSink, ByteSource, FileSource, MemorySource};
