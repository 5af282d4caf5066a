//! Error types for section indexing.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use core::fmt;

/// Errors raised while building ranges and selections.
///
/// All validation happens at construction time. Once a [`Selection`] exists,
/// planning and iteration cannot fail.
///
/// [`Selection`]: crate::selection::Selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// A `(start, stride, count)` triple does not fit inside its dimension.
    InvalidRange {
        /// The rejected `(start, stride, count)`.
        requested: (u64, u64, u64),
        /// Size of the dimension the range was built against.
        dim_size: u64,
    },
    /// A section string such as `"1:10:2,:,3"` could not be parsed.
    InvalidSectionSpec {
        /// The offending input.
        spec: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::InvalidRange {
                requested: (start, stride, count),
                dim_size,
            } => {
                write!(
                    f,
                    "invalid range: start={start} stride={stride} count={count} \
                     does not fit dimension of size {dim_size}"
                )
            }
            IndexError::InvalidSectionSpec { spec, reason } => {
                write!(f, "invalid section spec {spec:?}: {reason}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IndexError {}
