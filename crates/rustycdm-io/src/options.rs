//! Tunables for section reads.

/// Chunk count at or below which parallel reads fall back to sequential.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

/// Options controlling how a section read is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Parallel reads only fan out when the request has more chunks than this.
    pub parallel_threshold: usize,
    /// Check that the whole request fits in the source before reading anything.
    pub verify_bounds: bool,
}

impl ReadOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parallel fan-out threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enable or disable the up-front bounds check.
    pub fn with_verify_bounds(mut self, verify: bool) -> Self {
        self.verify_bounds = verify;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            verify_bounds: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_setters() {
        let opts = ReadOptions::new();
        assert_eq!(opts.parallel_threshold, 4);
        assert!(opts.verify_bounds);

        let opts = opts.with_parallel_threshold(64).with_verify_bounds(false);
        assert_eq!(opts.parallel_threshold, 64);
        assert!(!opts.verify_bounds);
    }
}
