//! Converting parsed tables into owned ones

use std::sync::Arc;

use read::{FontData, FontRead, MinByteRange, ReadError};

/// A type that can be loaded from font data.
///
/// This is implemented for every owned table in this crate. Each has a
/// corresponding read type, which does the actual parsing; the owned table
/// copies out what it needs.
pub trait FromData: Sized {
    /// The parsed view this type is loaded from.
    type Read<'a>: FontRead<'a> + MinByteRange;

    /// Load a table from `data`.
    ///
    /// If `source` is provided, `data` must be a view into it; the table (and
    /// every subtable) will remember its position in `source`, and will be
    /// written back out as those exact bytes until it is modified.
    fn from_data(data: FontData<'_>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError>;

    /// Load a table from these bytes, remembering them.
    ///
    /// Writing the result without modifying it returns `bytes` exactly.
    fn load_canonical(bytes: impl Into<Arc<[u8]>>) -> Result<Self, ReadError> {
        let source: Arc<[u8]> = bytes.into();
        Self::from_data(FontData::new(&source), Some(&source))
    }

    /// Load a table from `data`, without remembering the original bytes.
    ///
    /// Writing the result always re-serializes it from scratch.
    fn load(data: FontData<'_>) -> Result<Self, ReadError> {
        Self::from_data(data, None)
    }
}
