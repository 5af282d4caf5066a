//! Error types for section I/O.

use rustycdm_index::IndexError;

/// Errors that can occur while reading or writing a section.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("read of {len} bytes at offset {offset} exceeds source length {available}")]
    OutOfBounds { offset: u64, len: u64, available: u64 },

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: u64, actual: u64 },

    #[error("variable not found: {0}")]
    VariableNotFound(String),
}

pub type Result<T> = std::result::Result<T, IoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = IoError::OutOfBounds {
            offset: 96,
            len: 8,
            available: 100,
        };
        assert_eq!(
            e.to_string(),
            "read of 8 bytes at offset 96 exceeds source length 100"
        );
        let e = IoError::BufferSize {
            expected: 48,
            actual: 40,
        };
        assert_eq!(e.to_string(), "buffer size mismatch: expected 48 bytes, got 40");
    }

    #[test]
    fn index_errors_pass_through() {
        let inner = IndexError::InvalidRange {
            requested: (0, 1, 30),
            dim_size: 29,
        };
        let e = IoError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
    }
}
