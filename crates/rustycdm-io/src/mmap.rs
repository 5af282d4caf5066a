//! Memory-mapped byte source via `memmap2`.

use memmap2::Mmap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::source::{check_span, ByteSource};

/// Read-only memory-mapped file.
///
/// Chunk reads copy straight out of the mapping; [`MmapSource::slice`]
/// hands out borrowed views without copying.
pub struct MmapSource {
    _file: fs::File,
    mmap: Mmap,
}

impl MmapSource {
    /// Open a file and memory-map it for reading.
    ///
    /// The caller must ensure the file is not truncated by another process
    /// while the mapping is alive.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = fs::File::open(path)?;
        // SAFETY: read-only mapping; concurrent external modification is
        // excluded by the caller.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { _file: file, mmap })
    }

    /// Borrow `len` bytes at `offset` without copying.
    pub fn slice(&self, offset: u64, len: u64) -> Result<&[u8]> {
        check_span(offset, len, self.mmap.len() as u64)?;
        let start = offset as usize;
        Ok(&self.mmap[start..start + len as usize])
    }

    /// Hint the kernel to prefetch `[offset, offset + len)`.
    #[cfg(unix)]
    pub fn advise_willneed(&self, offset: u64, len: u64) -> io::Result<()> {
        let available = (self.mmap.len() as u64).saturating_sub(offset);
        let len = len.min(available) as usize;
        if len == 0 {
            return Ok(());
        }
        self.mmap
            .advise_range(memmap2::Advice::WillNeed, offset as usize, len)
    }

    /// No-op on non-Unix platforms.
    #[cfg(not(unix))]
    pub fn advise_willneed(&self, _offset: u64, _len: u64) -> io::Result<()> {
        Ok(())
    }
}

impl ByteSource for MmapSource {
    fn len(&self) -> u64 {
        self.mmap.len() as u64
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(self.slice(offset, buf.len() as u64)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mmap_reads_and_slices() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&(0u8..64).collect::<Vec<_>>()).unwrap();
        tmp.flush().unwrap();

        let src = MmapSource::open(tmp.path()).unwrap();
        assert_eq!(src.len(), 64);
        assert_eq!(src.slice(10, 3).unwrap(), &[10, 11, 12]);

        let mut buf = [0u8; 4];
        src.read_at(60, &mut buf).unwrap();
        assert_eq!(buf, [60, 61, 62, 63]);
        assert!(src.read_at(61, &mut buf).is_err());

        src.advise_willneed(0, 1 << 20).unwrap();
    }
}
