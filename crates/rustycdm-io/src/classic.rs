//! netCDF classic (CDF-1, CDF-2, CDF-5) variable storage.
//!
//! Non-record variables are stored contiguously at their `begin` offset.
//! Record variables are interleaved: each record holds one slab of every
//! record variable in header order, so successive records of one variable
//! are `recsize` bytes apart. This module turns that description into a
//! [`Layout`] for section reads.
//!
//! Header parsing is left to the caller; variables are described directly.
//!
//! # Example
//!
//! ```
//! use rustycdm_io::classic::{ClassicFile, ClassicVariable, NcType, VariableStorage};
//!
//! let file = ClassicFile::new(
//!     vec![
//!         ClassicVariable::record("time", &[0], NcType::Double, 100),
//!         ClassicVariable::record("temp", &[0, 3], NcType::Short, 108),
//!     ],
//!     12,
//! );
//! assert_eq!(file.record_size(), 16);
//! let layout = file.storage("temp").unwrap().layout();
//! assert_eq!(layout.shape(), vec![12, 3]);
//! assert_eq!(layout.record_size(), Some(16));
//! ```

use rustycdm_index::{Layout, Selection};

use crate::error::{IoError, Result};
use crate::section::read_section;
use crate::source::ByteSource;

/// External data types of the classic formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NcType {
    Byte,
    Char,
    Short,
    Int,
    Float,
    Double,
    UByte,
    UShort,
    UInt,
    Int64,
    UInt64,
}

impl NcType {
    /// Decode the type code stored in a classic header.
    pub fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            1 => NcType::Byte,
            2 => NcType::Char,
            3 => NcType::Short,
            4 => NcType::Int,
            5 => NcType::Float,
            6 => NcType::Double,
            7 => NcType::UByte,
            8 => NcType::UShort,
            9 => NcType::UInt,
            10 => NcType::Int64,
            11 => NcType::UInt64,
            _ => return None,
        })
    }

    /// Bytes per element on disk.
    pub fn size(self) -> u64 {
        match self {
            NcType::Byte | NcType::Char | NcType::UByte => 1,
            NcType::Short | NcType::UShort => 2,
            NcType::Int | NcType::Float | NcType::UInt => 4,
            NcType::Double | NcType::Int64 | NcType::UInt64 => 8,
        }
    }
}

/// One variable as declared in a classic header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicVariable {
    /// Variable name.
    pub name: String,
    /// Declared shape. For record variables `shape[0]` is the record
    /// dimension and its declared length is ignored.
    pub shape: Vec<u64>,
    /// Element type.
    pub nc_type: NcType,
    /// File offset of the data, or of the first record's slab.
    pub begin: u64,
    /// Whether the outermost dimension is the record dimension.
    pub is_record: bool,
}

impl ClassicVariable {
    /// A fixed-size variable.
    pub fn new(name: &str, shape: &[u64], nc_type: NcType, begin: u64) -> Self {
        Self {
            name: name.to_string(),
            shape: shape.to_vec(),
            nc_type,
            begin,
            is_record: false,
        }
    }

    /// A record variable. `shape[0]` stands for the record dimension.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is empty.
    pub fn record(name: &str, shape: &[u64], nc_type: NcType, begin: u64) -> Self {
        assert!(!shape.is_empty(), "record variable {name} has no record dimension");
        Self {
            is_record: true,
            ..Self::new(name, shape, nc_type, begin)
        }
    }

    /// Bytes of one slab: the whole variable, or one record of it.
    fn slab_bytes(&self) -> u64 {
        let dims = if self.is_record {
            &self.shape[1..]
        } else {
            &self.shape[..]
        };
        dims.iter().product::<u64>() * self.nc_type.size()
    }

    /// Slab size rounded up to a 4-byte boundary, as stored in the header.
    pub fn vsize(&self) -> u64 {
        self.slab_bytes().next_multiple_of(4)
    }
}

/// Storage capability of a variable in some file format.
pub trait VariableStorage {
    /// Variable name.
    fn name(&self) -> &str;

    /// Where and how the variable's elements are stored.
    fn layout(&self) -> Layout;
}

/// The variables of a classic file and its current record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicFile {
    variables: Vec<ClassicVariable>,
    numrecs: u64,
}

impl ClassicFile {
    /// Describe a file from its header variables, in header order.
    pub fn new(variables: Vec<ClassicVariable>, numrecs: u64) -> Self {
        Self { variables, numrecs }
    }

    /// Number of records currently in the file.
    pub fn numrecs(&self) -> u64 {
        self.numrecs
    }

    /// All variables in header order.
    pub fn variables(&self) -> &[ClassicVariable] {
        &self.variables
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Option<&ClassicVariable> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Bytes per record: the sum of every record variable's `vsize`.
    ///
    /// A lone record variable is not padded, so its records are packed.
    pub fn record_size(&self) -> u64 {
        let records: Vec<&ClassicVariable> =
            self.variables.iter().filter(|v| v.is_record).collect();
        match records[..] {
            [] => 0,
            [only] => only.slab_bytes(),
            _ => records.iter().map(|v| v.vsize()).sum(),
        }
    }

    /// Storage view of the named variable.
    pub fn storage(&self, name: &str) -> Result<ClassicStorage<'_>> {
        let var = self
            .variable(name)
            .ok_or_else(|| IoError::VariableNotFound(name.to_string()))?;
        Ok(ClassicStorage { file: self, var })
    }

    /// Read a section of the named variable as raw bytes in selection order.
    pub fn read_variable<S: ByteSource + ?Sized>(
        &self,
        source: &S,
        name: &str,
        selection: &Selection,
    ) -> Result<Vec<u8>> {
        let layout = self.storage(name)?.layout();
        read_section(source, &layout, selection)
    }

    /// Read a section of the named variable given as a section string, e.g. `"0:9,:"`.
    pub fn read_variable_section<S: ByteSource + ?Sized>(
        &self,
        source: &S,
        name: &str,
        section: &str,
    ) -> Result<Vec<u8>> {
        let storage = self.storage(name)?;
        let selection = Selection::parse(section, &storage.shape())?;
        read_section(source, &storage.layout(), &selection)
    }
}

/// A classic variable bound to its file, for record-size lookup.
#[derive(Debug, Clone, Copy)]
pub struct ClassicStorage<'a> {
    file: &'a ClassicFile,
    var: &'a ClassicVariable,
}

impl ClassicStorage<'_> {
    /// Current shape, with the record dimension sized to the record count.
    pub fn shape(&self) -> Vec<u64> {
        let mut shape = self.var.shape.clone();
        if self.var.is_record {
            shape[0] = self.file.numrecs;
        }
        shape
    }
}

impl VariableStorage for ClassicStorage<'_> {
    fn name(&self) -> &str {
        &self.var.name
    }

    fn layout(&self) -> Layout {
        let layout = Layout::new(&self.shape(), self.var.nc_type.size())
            .with_base_offset(self.var.begin);
        if self.var.is_record {
            layout.with_record_size(self.file.record_size())
        } else {
            layout
        }
    }
}
