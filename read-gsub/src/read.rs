//! Traits for interpreting font data

use std::ops::Range;

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for all tables that are self-describing: that
/// is, tables that do not require any external state in order to interpret their
/// underlying bytes.
///
/// It is also the factory used to resolve offsets: an
/// [`OffsetRecordTable<T>`][crate::OffsetRecordTable] calls `T::read` on the
/// data at each offset.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    ///
    /// In the case of a table, this method is responsible for ensuring the input
    /// data is consistent: this means ensuring that the format is one we
    /// understand, and that any array lengths are not out-of-bounds.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// A trait for tables that have multiple possible formats.
pub trait Format<T> {
    /// The format value for this table.
    const FORMAT: T;
}

/// Return the byte ranges covered by a table.
pub trait MinByteRange {
    /// The range of the bytes holding this table's own fields.
    ///
    /// This does not include any subtables reached through offsets.
    fn min_byte_range(&self) -> Range<usize>;

    /// The number of bytes from the start of this table to the end of the
    /// furthest byte it references, including all subtables.
    ///
    /// For tables laid out contiguously (as when they are written by
    /// `write-gsub`) this is the size of the table and all its subtables.
    fn subtree_len(&self) -> Result<usize, ReadError> {
        Ok(self.min_byte_range().end)
    }
}

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read or slice extended past the end of the data.
    OutOfBounds,
    /// An offset pointed past the end of the data it is relative to.
    MalformedOffset,
    /// An offset that must point to a table was null.
    NullOffset,
    /// A declared count does not match the available data, or a sibling array.
    InconsistentCount,
    /// A format field had a value we do not know how to decode.
    UnsupportedFormat(u16),
    /// Glyphs in a coverage table were not strictly increasing.
    InvalidCoverage,
    InvalidArrayLen,
    InvalidCollectionIndex(u32),
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::MalformedOffset => write!(f, "An offset pointed past the end of its data"),
            ReadError::NullOffset => write!(f, "An offset was unexpectedly null"),
            ReadError::InconsistentCount => {
                write!(f, "A declared count is inconsistent with the available data")
            }
            ReadError::UnsupportedFormat(x) => write!(f, "Unsupported format '{x}'"),
            ReadError::InvalidCoverage => {
                write!(f, "Coverage glyphs are not in strictly increasing order")
            }
            ReadError::InvalidArrayLen => {
                write!(f, "Specified array length not a multiple of item size")
            }
            ReadError::InvalidCollectionIndex(ix) => {
                write!(f, "Invalid index {ix} for collection")
            }
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReadError {}
