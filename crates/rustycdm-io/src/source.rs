//! Byte sources and sinks addressed by absolute offset.
//!
//! Section reads issue one positional read per chunk, so every source here
//! reads through `&self` and can be shared between worker threads.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{IoError, Result};

/// Positional read access to a file-like byte container.
pub trait ByteSource {
    /// Total length in bytes.
    fn len(&self) -> u64;

    /// Returns true if the source holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `buf` with the bytes starting at `offset`.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;
}

/// Positional write access.
pub trait ByteSink {
    /// Write all of `data` starting at `offset`.
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<()>;
}

/// Validate `[offset, offset + len)` against a source of `available` bytes.
pub(crate) fn check_span(offset: u64, len: u64, available: u64) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= available => Ok(()),
        _ => Err(IoError::OutOfBounds {
            offset,
            len,
            available,
        }),
    }
}

fn slice_at(data: &[u8], offset: u64, len: usize) -> Result<&[u8]> {
    check_span(offset, len as u64, data.len() as u64)?;
    let start = offset as usize;
    Ok(&data[start..start + len])
}

// ---------------------------------------------------------------------------
// MemorySource
// ---------------------------------------------------------------------------

/// In-memory source backed by an owned `Vec<u8>`.
///
/// Also a sink; writes must stay within the current length.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: Vec<u8>,
}

impl MemorySource {
    /// Wrap an owned byte vector.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// A zero-filled buffer of `len` bytes, for writing into.
    pub fn zeroed(len: usize) -> Self {
        Self { data: vec![0; len] }
    }

    /// The underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the source and return the underlying bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ByteSource for MemorySource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(slice_at(&self.data, offset, buf.len())?);
        Ok(())
    }
}

impl ByteSink for MemorySource {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<()> {
        check_span(offset, data.len() as u64, self.data.len() as u64)?;
        let start = offset as usize;
        self.data[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BorrowedSource
// ---------------------------------------------------------------------------

/// Zero-copy source over a borrowed byte slice.
#[derive(Debug, Clone, Copy)]
pub struct BorrowedSource<'a> {
    data: &'a [u8],
}

impl<'a> BorrowedSource<'a> {
    /// Wrap a borrowed byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl ByteSource for BorrowedSource<'_> {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(slice_at(self.data, offset, buf.len())?);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// File-backed source using positional reads, without loading the file.
#[derive(Debug)]
pub struct FileSource {
    file: fs::File,
    len: u64,
}

impl FileSource {
    /// Open a file read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::from_file(fs::File::open(path)?)
    }

    /// Open an existing file for reading and writing.
    pub fn open_rw<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::from_file(fs::OpenOptions::new().read(true).write(true).open(path)?)
    }

    /// Create (or truncate) a file of `len` zero bytes for reading and writing.
    pub fn create<P: AsRef<Path>>(path: P, len: u64) -> io::Result<Self> {
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(len)?;
        Ok(Self { file, len })
    }

    /// Wrap an already-opened file.
    pub fn from_file(file: fs::File) -> io::Result<Self> {
        let len = file.metadata()?.len();
        Ok(Self { file, len })
    }

    /// Flush written data to disk.
    pub fn sync(&self) -> io::Result<()> {
        self.file.sync_data()
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        check_span(offset, buf.len() as u64, self.len)?;
        pread(&self.file, offset, buf)?;
        Ok(())
    }
}

impl ByteSink for FileSource {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> Result<()> {
        pwrite(&self.file, offset, data)?;
        self.len = self.len.max(offset + data.len() as u64);
        Ok(())
    }
}

#[cfg(unix)]
fn pread(file: &fs::File, offset: u64, buf: &mut [u8]) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, offset)
}

#[cfg(unix)]
fn pwrite(file: &fs::File, offset: u64, data: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.write_all_at(data, offset)
}

#[cfg(windows)]
fn pread(file: &fs::File, mut offset: u64, mut buf: &mut [u8]) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    while !buf.is_empty() {
        match file.seek_read(buf, offset) {
            Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(n) => {
                buf = &mut buf[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(windows)]
fn pwrite(file: &fs::File, mut offset: u64, mut data: &[u8]) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    while !data.is_empty() {
        match file.seek_write(data, offset) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => {
                data = &data[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
