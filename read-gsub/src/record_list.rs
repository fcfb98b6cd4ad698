//! Counted arrays of fixed-size records

use std::ops::Range;

use types::{BigEndian, FixedSize, Scalar};

use crate::{FontData, FontRead, MinByteRange, ReadError};

/// Describes where the number of records in a [`RecordList`] comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListCount {
    /// A `u16` count field at `pos`, with the records immediately after it.
    ///
    /// The stored count exceeds the number of records by `bias`; this is `1`
    /// for the component array of a ligature, whose count includes the first
    /// glyph of the sequence.
    Field { pos: usize, bias: u16 },
    /// There is no count field: records start at `start` and fill the
    /// remainder of the data.
    Implicit { start: usize },
}

impl ListCount {
    /// A count field at the very start of the data, with no bias.
    pub const AT_START: ListCount = ListCount::Field { pos: 0, bias: 0 };

    /// A count field at `pos`, with no bias.
    pub const fn field(pos: usize) -> Self {
        ListCount::Field { pos, bias: 0 }
    }

    /// The position of the first record.
    pub fn records_start(self) -> usize {
        match self {
            ListCount::Field { pos, .. } => pos + u16::RAW_BYTE_LEN,
            ListCount::Implicit { start } => start,
        }
    }

    /// The position of the start of this list, including any count field.
    pub fn list_start(self) -> usize {
        match self {
            ListCount::Field { pos, .. } => pos,
            ListCount::Implicit { start } => start,
        }
    }

    /// The amount by which a stored count exceeds the number of records.
    pub fn bias(self) -> u16 {
        match self {
            ListCount::Field { bias, .. } => bias,
            ListCount::Implicit { .. } => 0,
        }
    }

    /// `true` if the count is stored explicitly.
    pub fn has_count_field(self) -> bool {
        matches!(self, ListCount::Field { .. })
    }
}

/// An ordered sequence of fixed-width records.
///
/// The records are borrowed directly from the font data.
#[derive(Clone, Copy, Debug)]
pub struct RecordList<'a, T> {
    layout: ListCount,
    records: &'a [T],
}

impl<'a, T: bytemuck::AnyBitPattern + FixedSize> RecordList<'a, T> {
    /// Read a list of records from `data`, according to `layout`.
    ///
    /// If the declared count implies more records than `data` can hold,
    /// this returns [`ReadError::InconsistentCount`]; the list is never
    /// silently truncated.
    pub fn read_with_layout(data: FontData<'a>, layout: ListCount) -> Result<Self, ReadError> {
        let count = match layout {
            ListCount::Field { pos, bias } => {
                let raw: u16 = data.read_at(pos)?;
                raw.checked_sub(bias)
                    .ok_or(ReadError::MalformedData("record count smaller than its bias"))?
                    as usize
            }
            ListCount::Implicit { start } => {
                let remaining = data
                    .len()
                    .checked_sub(start)
                    .ok_or(ReadError::OutOfBounds)?;
                remaining / T::RAW_BYTE_LEN
            }
        };
        let start = layout.records_start();
        let end = start + count * T::RAW_BYTE_LEN;
        if end > data.len() {
            return Err(ReadError::InconsistentCount);
        }
        let records = data.read_array(start..end)?;
        Ok(RecordList { layout, records })
    }
}

impl<'a, T> RecordList<'a, T> {
    /// The number of records in the list.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` if the list contains no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the record at `idx`.
    pub fn get(&self, idx: usize) -> Option<&'a T> {
        self.records.get(idx)
    }

    /// Iterate over the records.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        self.records.iter()
    }

    /// The records, as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        self.records
    }

    /// How the count of this list is determined.
    pub fn layout(&self) -> ListCount {
        self.layout
    }

    /// The number of records that would be written to the count field.
    ///
    /// This includes the bias, if any.
    pub fn stored_count(&self) -> usize {
        self.records.len() + self.layout.bias() as usize
    }
}

impl<'a, T: FixedSize> RecordList<'a, T> {
    /// The range of bytes occupied by this list, including any count field.
    pub fn byte_range(&self) -> Range<usize> {
        let end = self.layout.records_start() + self.records.len() * T::RAW_BYTE_LEN;
        self.layout.list_start()..end
    }
}

/// A standalone list, with its count at the start of the data.
impl<'a, T: bytemuck::AnyBitPattern + FixedSize> FontRead<'a> for RecordList<'a, T> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Self::read_with_layout(data, ListCount::AT_START)
    }
}

impl<T: FixedSize> MinByteRange for RecordList<'_, T> {
    fn min_byte_range(&self) -> Range<usize> {
        0..self.byte_range().end
    }
}

impl<'a, T: Scalar> RecordList<'a, BigEndian<T>> {
    /// Get the value at `idx`, converted to its native type.
    pub fn value(&self, idx: usize) -> Option<T> {
        self.records.get(idx).map(BigEndian::get)
    }

    /// Iterate over the values in this list, converted to their native type.
    pub fn values(&self) -> impl Iterator<Item = T> + 'a {
        self.records.iter().map(BigEndian::get)
    }
}
