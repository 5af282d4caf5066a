//! Reading and writing hyperslab sections of a variable.
//!
//! Each function walks the [`ChunkIterator`] for the request and performs
//! exactly one contiguous transfer per chunk: `element_count * element_size`
//! bytes at `file_offset` in the file, at `logical_index * element_size` in
//! the caller's flat buffer.

use rustycdm_index::{ChunkIterator, Layout, Selection};
use tracing::{debug, trace};

use crate::error::{IoError, Result};
use crate::options::ReadOptions;
use crate::profiling::{IoProfiler, NoopProfiler};
use crate::source::{check_span, ByteSink, ByteSource};

/// Read a section into a new buffer.
pub fn read_section<S: ByteSource + ?Sized>(
    source: &S,
    layout: &Layout,
    selection: &Selection,
) -> Result<Vec<u8>> {
    read_section_with(source, layout, selection, &ReadOptions::default(), &NoopProfiler)
}

/// Read a section into a new buffer with explicit options and profiling.
pub fn read_section_with<S: ByteSource + ?Sized>(
    source: &S,
    layout: &Layout,
    selection: &Selection,
    options: &ReadOptions,
    profiler: &dyn IoProfiler,
) -> Result<Vec<u8>> {
    let mut out = vec![0u8; section_byte_len(layout, selection)?];
    read_section_into_with(source, layout, selection, &mut out, options, profiler)?;
    Ok(out)
}

/// Read a section into a caller-provided buffer of exactly the right size.
pub fn read_section_into<S: ByteSource + ?Sized>(
    source: &S,
    layout: &Layout,
    selection: &Selection,
    out: &mut [u8],
) -> Result<()> {
    read_section_into_with(
        source,
        layout,
        selection,
        out,
        &ReadOptions::default(),
        &NoopProfiler,
    )
}

/// Read a section into a caller-provided buffer with explicit options and profiling.
pub fn read_section_into_with<S: ByteSource + ?Sized>(
    source: &S,
    layout: &Layout,
    selection: &Selection,
    out: &mut [u8],
    options: &ReadOptions,
    profiler: &dyn IoProfiler,
) -> Result<()> {
    let chunks = ChunkIterator::new(layout, selection);
    check_buffer(&chunks, out.len())?;
    if options.verify_bounds {
        verify_bounds(&chunks, source.len())?;
    }
    debug!(
        section = %selection,
        rank = layout.rank(),
        chunk_size = chunks.chunk_size(),
        chunks = chunks.len(),
        "reading section"
    );

    let elem = layout.element_size();
    for chunk in chunks {
        let dst = chunk.dest_byte_offset(elem) as usize;
        let len = chunk.byte_len(elem) as usize;
        trace!(offset = chunk.file_offset, len, dst, "read chunk");
        source.read_at(chunk.file_offset, &mut out[dst..dst + len])?;
        profiler.on_read(len as u64);
    }
    Ok(())
}

/// Write a section from a flat buffer laid out in selection order.
pub fn write_section<S: ByteSink + ?Sized>(
    sink: &mut S,
    layout: &Layout,
    selection: &Selection,
    data: &[u8],
) -> Result<()> {
    write_section_with(sink, layout, selection, data, &NoopProfiler)
}

/// Write a section with profiling.
pub fn write_section_with<S: ByteSink + ?Sized>(
    sink: &mut S,
    layout: &Layout,
    selection: &Selection,
    data: &[u8],
    profiler: &dyn IoProfiler,
) -> Result<()> {
    let chunks = ChunkIterator::new(layout, selection);
    check_buffer(&chunks, data.len())?;
    debug!(
        section = %selection,
        rank = layout.rank(),
        chunk_size = chunks.chunk_size(),
        chunks = chunks.len(),
        "writing section"
    );

    let elem = layout.element_size();
    for chunk in chunks {
        let src = chunk.dest_byte_offset(elem) as usize;
        let len = chunk.byte_len(elem) as usize;
        trace!(offset = chunk.file_offset, len, src, "write chunk");
        sink.write_at(chunk.file_offset, &data[src..src + len])?;
        profiler.on_write(len as u64);
    }
    Ok(())
}

/// Bytes in the flat result of reading `selection`.
///
/// Fails with [`IoError::BufferSize`] if the length overflows a `u64` or
/// does not fit in memory addressable on this target.
pub fn section_byte_len(layout: &Layout, selection: &Selection) -> Result<usize> {
    let bytes = selection
        .checked_total_elements()
        .and_then(|n| n.checked_mul(layout.element_size()));
    bytes
        .and_then(|b| usize::try_from(b).ok())
        .ok_or(IoError::BufferSize {
            expected: bytes.unwrap_or(u64::MAX),
            actual: usize::MAX as u64,
        })
}

pub(crate) fn check_buffer(chunks: &ChunkIterator, actual: usize) -> Result<()> {
    let expected = chunks.total_elements() * chunks.layout().element_size();
    if expected != actual as u64 {
        return Err(IoError::BufferSize {
            expected,
            actual: actual as u64,
        });
    }
    Ok(())
}

/// Fail before any transfer if the furthest chunk lies past the end of the source.
pub(crate) fn verify_bounds(chunks: &ChunkIterator, available: u64) -> Result<()> {
    match chunks.last_chunk() {
        Some(last) => check_span(
            last.file_offset,
            last.byte_len(chunks.layout().element_size()),
            available,
        ),
        None => Ok(()),
    }
}
