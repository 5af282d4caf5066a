//! I/O profiling hooks for section reads and writes.
//!
//! The [`IoProfiler`] trait receives one callback per chunk transferred.
//! [`DefaultProfiler`] keeps atomic counters and may be shared by parallel
//! readers; [`NoopProfiler`] discards everything.

use std::sync::atomic::{AtomicU64, Ordering};

/// Callbacks for chunk transfers.
pub trait IoProfiler: Send + Sync {
    /// Called after `bytes` were read for one chunk.
    fn on_read(&self, bytes: u64);

    /// Called after `bytes` were written for one chunk.
    fn on_write(&self, bytes: u64);
}

/// Profiler that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfiler;

impl IoProfiler for NoopProfiler {
    fn on_read(&self, _bytes: u64) {}

    fn on_write(&self, _bytes: u64) {}
}

/// Profiler using atomic counters.
#[derive(Debug, Default)]
pub struct DefaultProfiler {
    /// Total bytes read.
    pub bytes_read: AtomicU64,
    /// Number of chunk reads.
    pub read_count: AtomicU64,
    /// Total bytes written.
    pub bytes_written: AtomicU64,
    /// Number of chunk writes.
    pub write_count: AtomicU64,
}

impl DefaultProfiler {
    /// Create a profiler with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes read.
    pub fn total_bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    /// Total chunk reads.
    pub fn total_reads(&self) -> u64 {
        self.read_count.load(Ordering::Relaxed)
    }

    /// Total bytes written.
    pub fn total_bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Total chunk writes.
    pub fn total_writes(&self) -> u64 {
        self.write_count.load(Ordering::Relaxed)
    }

    /// Mean bytes per chunk read, or 0.0 before any read.
    pub fn mean_read_size(&self) -> f64 {
        let reads = self.total_reads();
        if reads == 0 {
            0.0
        } else {
            self.total_bytes_read() as f64 / reads as f64
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.bytes_read.store(0, Ordering::Relaxed);
        self.read_count.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.write_count.store(0, Ordering::Relaxed);
    }
}

impl IoProfiler for DefaultProfiler {
    fn on_read(&self, bytes: u64) {
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
        self.read_count.fetch_add(1, Ordering::Relaxed);
    }

    fn on_write(&self, bytes: u64) {
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
        self.write_count.fetch_add(1, Ordering::Relaxed);
    }
}
