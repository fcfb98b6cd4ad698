//! Counted arrays of offsets, with lazy resolution

use std::marker::PhantomData;
use std::ops::Range;

use types::{BigEndian, Offset16};

use crate::{
    FontData, FontRead, ListCount, MinByteRange, ReadError, RecordList, ResolveOffset,
};

/// A counted array of offsets to subtables of type `T`.
///
/// This bundles up the raw offsets with the data used to resolve them. Every
/// offset is relative to the start of the table holding the count field, which
/// is the `data` this was read from.
///
/// Entries are resolved on access, every time they are accessed: nothing is
/// cached, and the same index always produces an equivalent view.
pub struct OffsetRecordTable<'a, T> {
    data: FontData<'a>,
    offsets: RecordList<'a, BigEndian<Offset16>>,
    phantom: PhantomData<fn() -> T>,
}

impl<'a, T> OffsetRecordTable<'a, T> {
    /// Read an offset table whose count lives somewhere in `data`.
    ///
    /// This is used for tables embedded in a larger header, such as the
    /// ligature set offsets of [`LigatureSubstFormat1`][crate::tables::gsub::LigatureSubstFormat1].
    pub fn read_with_layout(data: FontData<'a>, layout: ListCount) -> Result<Self, ReadError> {
        let offsets = RecordList::read_with_layout(data, layout)?;
        Ok(OffsetRecordTable {
            data,
            offsets,
            phantom: PhantomData,
        })
    }

    /// The number of offsets in the table
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// `true` if the table is empty
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The raw offset at `idx`.
    pub fn offset(&self, idx: usize) -> Option<Offset16> {
        self.offsets.value(idx)
    }

    /// The raw offsets.
    pub fn offsets(&self) -> RecordList<'a, BigEndian<Offset16>> {
        self.offsets
    }

    /// The data the offsets are resolved against.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

impl<'a, T: FontRead<'a>> OffsetRecordTable<'a, T> {
    /// Resolve the offset at the provided index.
    ///
    /// Note: if the index is invalid this will return the `InvalidCollectionIndex`
    /// error variant instead of `None`.
    pub fn get(&self, idx: usize) -> Result<T, ReadError> {
        self.offsets
            .value(idx)
            .ok_or(ReadError::InvalidCollectionIndex(idx as _))
            .and_then(|off| off.resolve(self.data))
    }

    /// Iterate over all of the offset targets.
    ///
    /// Each offset will be resolved as it is encountered.
    pub fn iter(&self) -> impl Iterator<Item = Result<T, ReadError>> + 'a {
        let data = self.data;
        self.offsets.values().map(move |off| off.resolve(data))
    }
}

/// A standalone offset table, with its count at the start of the data.
impl<'a, T> FontRead<'a> for OffsetRecordTable<'a, T> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Self::read_with_layout(data, ListCount::AT_START)
    }
}

impl<'a, T: FontRead<'a> + MinByteRange> MinByteRange for OffsetRecordTable<'a, T> {
    fn min_byte_range(&self) -> Range<usize> {
        0..self.offsets.byte_range().end
    }

    fn subtree_len(&self) -> Result<usize, ReadError> {
        let mut end = self.min_byte_range().end;
        for (i, off) in self.offsets.values().enumerate() {
            let child = self.get(i)?;
            end = end.max(off.to_u32() as usize + child.subtree_len()?);
        }
        Ok(end)
    }
}

impl<T> Clone for OffsetRecordTable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OffsetRecordTable<'_, T> {}

impl<T> std::fmt::Debug for OffsetRecordTable<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.offsets.values()).finish()
    }
}
