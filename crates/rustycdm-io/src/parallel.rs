//! Parallel section reads using rayon.
//!
//! Every chunk of a request has the same element count and the chunks tile
//! the result in order, so the output buffer splits into equal disjoint
//! slices, one per chunk, that worker threads fill independently. The
//! parallel path is only taken when the chunk count exceeds
//! [`ReadOptions::parallel_threshold`].

use rayon::prelude::*;
use rustycdm_index::{Chunk, ChunkIterator, Layout, Selection};
use tracing::debug;

use crate::error::Result;
use crate::options::ReadOptions;
use crate::profiling::IoProfiler;
use crate::section::{check_buffer, read_section_into_with, section_byte_len, verify_bounds};
use crate::source::ByteSource;

/// Returns `true` if a request of `chunk_count` chunks should fan out.
pub fn should_use_parallel(chunk_count: usize, options: &ReadOptions) -> bool {
    chunk_count > options.parallel_threshold
}

/// Read a section into a new buffer, reading chunks concurrently.
///
/// # Errors
///
/// Returns the first error encountered by any worker thread.
pub fn read_section_parallel<S: ByteSource + Sync + ?Sized>(
    source: &S,
    layout: &Layout,
    selection: &Selection,
    options: &ReadOptions,
    profiler: &dyn IoProfiler,
) -> Result<Vec<u8>> {
    let mut out = vec![0u8; section_byte_len(layout, selection)?];
    read_section_into_parallel(source, layout, selection, &mut out, options, profiler)?;
    Ok(out)
}

/// Read a section into a caller-provided buffer, reading chunks concurrently.
pub fn read_section_into_parallel<S: ByteSource + Sync + ?Sized>(
    source: &S,
    layout: &Layout,
    selection: &Selection,
    out: &mut [u8],
    options: &ReadOptions,
    profiler: &dyn IoProfiler,
) -> Result<()> {
    let chunks = ChunkIterator::new(layout, selection);
    if !should_use_parallel(chunks.len(), options) {
        return read_section_into_with(source, layout, selection, out, options, profiler);
    }
    check_buffer(&chunks, out.len())?;
    if options.verify_bounds {
        verify_bounds(&chunks, source.len())?;
    }

    let chunk_bytes = chunks.chunk_size() * layout.element_size();
    debug!(
        section = %selection,
        chunk_bytes,
        chunks = chunks.len(),
        threads = rayon::current_num_threads(),
        "reading section in parallel"
    );

    let plan: Vec<Chunk> = chunks.collect();
    out.par_chunks_mut(chunk_bytes as usize)
        .zip(plan.par_iter())
        .try_for_each(|(dst, chunk)| {
            source.read_at(chunk.file_offset, dst)?;
            profiler.on_read(dst.len() as u64);
            Ok(())
        })
}
