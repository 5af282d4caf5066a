//! Storage description of a row-major variable.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Logical extent of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    /// Number of indices along this axis.
    pub size: u64,
}

impl Dimension {
    /// Create a dimension of the given size.
    pub const fn new(size: u64) -> Self {
        Dimension { size }
    }
}

/// How a variable's elements are laid out in a file.
///
/// Elements are stored in row-major order starting at `base_offset`.
/// `dims[0]` varies slowest. When a record size is set, `dims[0]` is the
/// record dimension: successive indices along it are `record_size` bytes
/// apart, and only the remaining dimensions use row-major addressing
/// within one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    dims: Vec<Dimension>,
    element_size: u64,
    base_offset: u64,
    record_size: Option<u64>,
}

impl Layout {
    /// Describe a variable with the given shape and element byte size,
    /// stored at offset zero without a record dimension.
    ///
    /// # Panics
    ///
    /// Panics if `element_size` is zero, or if the byte extent of any
    /// trailing group of dimensions does not fit in a `u64`.
    pub fn new(shape: &[u64], element_size: u64) -> Self {
        assert!(element_size > 0, "element size must be non-zero");
        let mut extent = element_size;
        for &size in shape.iter().rev() {
            match extent.checked_mul(size) {
                Some(bytes) => extent = bytes,
                None => panic!("variable byte size overflows u64: shape {shape:?}"),
            }
        }
        Layout {
            dims: shape.iter().map(|&s| Dimension::new(s)).collect(),
            element_size,
            base_offset: 0,
            record_size: None,
        }
    }

    /// Set the absolute file offset of the first element.
    pub fn with_base_offset(mut self, base_offset: u64) -> Self {
        self.base_offset = base_offset;
        self
    }

    /// Make `dims[0]` a record dimension with the given byte step.
    ///
    /// # Panics
    ///
    /// Panics if the layout has no dimensions.
    pub fn with_record_size(mut self, record_size: u64) -> Self {
        assert!(
            !self.dims.is_empty(),
            "a record dimension needs at least one dimension"
        );
        self.record_size = Some(record_size);
        self
    }

    /// The dimensions, outermost first.
    pub fn dims(&self) -> &[Dimension] {
        &self.dims
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Dimension sizes, outermost first.
    pub fn shape(&self) -> Vec<u64> {
        self.dims.iter().map(|d| d.size).collect()
    }

    /// Bytes per element.
    pub fn element_size(&self) -> u64 {
        self.element_size
    }

    /// File offset of element zero.
    pub fn base_offset(&self) -> u64 {
        self.base_offset
    }

    /// Byte step of the record dimension, if there is one.
    pub fn record_size(&self) -> Option<u64> {
        self.record_size
    }

    /// Returns true if `dims[0]` is a record dimension.
    pub fn has_record_dimension(&self) -> bool {
        self.record_size.is_some()
    }

    /// Elements between successive indices of dimension `dim_index` when all
    /// inner dimensions are taken in full: the product of every size further in.
    ///
    /// For a record layout this is the stride within one record; it is not
    /// meaningful for the record dimension itself.
    pub fn inner_stride_elems(&self, dim_index: usize) -> u64 {
        self.dims[dim_index + 1..].iter().map(|d| d.size).product()
    }

    /// Number of elements in the whole variable.
    pub fn total_elements(&self) -> u64 {
        self.dims.iter().map(|d| d.size).product()
    }

    /// Byte extent of the variable on disk, or `None` for record layouts,
    /// whose extent is set by the record count and interleaving.
    pub fn byte_size(&self) -> Option<u64> {
        match self.record_size {
            Some(_) => None,
            None => Some(self.total_elements() * self.element_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn row_major_inner_strides() {
        let layout = Layout::new(&[4, 3, 5], 8);
        assert_eq!(layout.inner_stride_elems(0), 15);
        assert_eq!(layout.inner_stride_elems(1), 5);
        assert_eq!(layout.inner_stride_elems(2), 1);
    }

    #[test]
    fn accessors() {
        let layout = Layout::new(&[29, 40], 4).with_base_offset(128);
        assert_eq!(layout.rank(), 2);
        assert_eq!(layout.shape(), vec![29, 40]);
        assert_eq!(layout.element_size(), 4);
        assert_eq!(layout.base_offset(), 128);
        assert_eq!(layout.record_size(), None);
        assert_eq!(layout.total_elements(), 1160);
        assert_eq!(layout.byte_size(), Some(4640));
    }

    #[test]
    fn record_layout() {
        let layout = Layout::new(&[29], 1).with_record_size(1000);
        assert!(layout.has_record_dimension());
        assert_eq!(layout.record_size(), Some(1000));
        assert_eq!(layout.byte_size(), None);
    }

    #[test]
    fn scalar_layout() {
        let layout = Layout::new(&[], 8);
        assert_eq!(layout.rank(), 0);
        assert_eq!(layout.total_elements(), 1);
    }

    #[test]
    #[should_panic(expected = "element size must be non-zero")]
    fn zero_element_size_panics() {
        let _ = Layout::new(&[3], 0);
    }

    #[test]
    #[should_panic(expected = "overflows u64")]
    fn oversized_shape_panics() {
        let _ = Layout::new(&[1 << 40, 1 << 20], 1 << 4);
    }

    #[test]
    fn zero_outer_dim_with_large_inner() {
        let layout = Layout::new(&[0, 1 << 62], 2);
        assert_eq!(layout.total_elements(), 0);
        assert_eq!(layout.inner_stride_elems(0), 1 << 62);
    }

    #[test]
    #[should_panic(expected = "record dimension")]
    fn scalar_record_layout_panics() {
        let _ = Layout::new(&[], 4).with_record_size(16);
    }
}
