//! The unit of I/O produced by section iteration.

/// One contiguous run of elements in the file.
///
/// `file_offset` is an absolute byte offset. `element_count` elements are
/// adjacent on disk starting there, and belong at flattened position
/// `logical_index` (row-major over the selection's shape) in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// Absolute byte offset of the first element.
    pub file_offset: u64,
    /// Number of contiguous elements.
    pub element_count: u64,
    /// Index of the first element in the flattened result.
    pub logical_index: u64,
}

impl Chunk {
    /// Bytes to transfer for this chunk.
    pub fn byte_len(&self, element_size: u64) -> u64 {
        self.element_count * element_size
    }

    /// Byte offset of this chunk in the caller's result buffer.
    pub fn dest_byte_offset(&self, element_size: u64) -> u64 {
        self.logical_index * element_size
    }

    /// Logical index one past the last element of this chunk.
    pub fn end_logical_index(&self) -> u64 {
        self.logical_index + self.element_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_helpers() {
        let c = Chunk {
            file_offset: 400,
            element_count: 9,
            logical_index: 18,
        };
        assert_eq!(c.byte_len(8), 72);
        assert_eq!(c.dest_byte_offset(8), 144);
        assert_eq!(c.end_logical_index(), 27);
    }
}
