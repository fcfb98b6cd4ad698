//! OpenType Layout common table formats

use std::ops::Range;

use types::{BigEndian, FixedSize, GlyphId16};

use crate::{FontData, FontRead, Format, ListCount, MinByteRange, ReadError, RecordList};

#[cfg(test)]
#[path = "../tests/layout.rs"]
mod tests;

/// [Coverage Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-format-1)
#[derive(Clone, Copy, Debug)]
pub struct CoverageFormat1<'a> {
    data: FontData<'a>,
    glyph_array: RecordList<'a, BigEndian<GlyphId16>>,
}

impl Format<u16> for CoverageFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for CoverageFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != Self::FORMAT {
            return Err(ReadError::UnsupportedFormat(format));
        }
        let glyph_array: RecordList<BigEndian<GlyphId16>> =
            RecordList::read_with_layout(data, ListCount::field(cursor.position()?))?;
        let sorted = glyph_array
            .as_slice()
            .windows(2)
            .all(|pair| pair[0].get() < pair[1].get());
        if !sorted {
            return Err(ReadError::InvalidCoverage);
        }
        Ok(CoverageFormat1 { data, glyph_array })
    }
}

impl<'a> CoverageFormat1<'a> {
    /// Format identifier: format = 1
    pub fn coverage_format(&self) -> u16 {
        Self::FORMAT
    }

    /// Number of glyphs in the glyph array
    pub fn glyph_count(&self) -> u16 {
        self.glyph_array.len() as u16
    }

    /// Array of glyph IDs, in numerical order
    pub fn glyph_array(&self) -> RecordList<'a, BigEndian<GlyphId16>> {
        self.glyph_array
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }

    /// The coverage index of `gid`, if it is covered.
    pub fn index_of(&self, gid: GlyphId16) -> Option<usize> {
        self.glyph_array
            .as_slice()
            .binary_search_by(|gid16| gid16.get().cmp(&gid))
            .ok()
    }
}

impl MinByteRange for CoverageFormat1<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        0..self.glyph_array.byte_range().end
    }
}

/// Used in [CoverageFormat2]
#[derive(Clone, Debug, Copy, bytemuck::AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct RangeRecord {
    /// First glyph ID in the range
    pub start_glyph_id: BigEndian<GlyphId16>,
    /// Last glyph ID in the range
    pub end_glyph_id: BigEndian<GlyphId16>,
    /// Coverage Index of first glyph ID in range
    pub start_coverage_index: BigEndian<u16>,
}

impl RangeRecord {
    /// First glyph ID in the range
    pub fn start_glyph_id(&self) -> GlyphId16 {
        self.start_glyph_id.get()
    }

    /// Last glyph ID in the range
    pub fn end_glyph_id(&self) -> GlyphId16 {
        self.end_glyph_id.get()
    }

    /// Coverage Index of first glyph ID in range
    pub fn start_coverage_index(&self) -> u16 {
        self.start_coverage_index.get()
    }

    /// The number of glyphs in this range.
    pub fn glyph_count(&self) -> usize {
        (self.end_glyph_id().to_u16() as usize + 1)
            .saturating_sub(self.start_glyph_id().to_u16() as usize)
    }

    /// Iterate over the glyphs in this range.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId16> + '_ {
        (self.start_glyph_id().to_u16()..=self.end_glyph_id().to_u16()).map(GlyphId16::new)
    }
}

impl FixedSize for RangeRecord {
    const RAW_BYTE_LEN: usize =
        GlyphId16::RAW_BYTE_LEN + GlyphId16::RAW_BYTE_LEN + u16::RAW_BYTE_LEN;
}

/// [Coverage Format 2](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-format-2)
#[derive(Clone, Copy, Debug)]
pub struct CoverageFormat2<'a> {
    data: FontData<'a>,
    range_records: RecordList<'a, RangeRecord>,
}

impl Format<u16> for CoverageFormat2<'_> {
    const FORMAT: u16 = 2;
}

impl<'a> FontRead<'a> for CoverageFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != Self::FORMAT {
            return Err(ReadError::UnsupportedFormat(format));
        }
        let range_records: RecordList<RangeRecord> =
            RecordList::read_with_layout(data, ListCount::field(cursor.position()?))?;

        // ranges must be non-empty, ordered, disjoint, and must number the
        // covered glyphs consecutively.
        let mut next_index = 0usize;
        let mut prev_end: Option<GlyphId16> = None;
        for record in range_records.iter() {
            if record.start_glyph_id() > record.end_glyph_id()
                || prev_end.is_some_and(|end| end >= record.start_glyph_id())
                || record.start_coverage_index() as usize != next_index
            {
                return Err(ReadError::InvalidCoverage);
            }
            next_index += record.glyph_count();
            prev_end = Some(record.end_glyph_id());
        }
        Ok(CoverageFormat2 {
            data,
            range_records,
        })
    }
}

impl<'a> CoverageFormat2<'a> {
    /// Format identifier: format = 2
    pub fn coverage_format(&self) -> u16 {
        Self::FORMAT
    }

    /// Number of RangeRecords
    pub fn range_count(&self) -> u16 {
        self.range_records.len() as u16
    }

    /// Array of glyph ranges, ordered by startGlyphID.
    pub fn range_records(&self) -> RecordList<'a, RangeRecord> {
        self.range_records
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }

    /// The total number of covered glyphs.
    pub fn glyph_count(&self) -> usize {
        self.range_records
            .as_slice()
            .last()
            .map(|last| last.start_coverage_index() as usize + last.glyph_count())
            .unwrap_or(0)
    }

    /// The coverage index of `gid`, if it is covered.
    pub fn index_of(&self, gid: GlyphId16) -> Option<usize> {
        let records = self.range_records.as_slice();
        let idx = records
            .binary_search_by(|rec| {
                if rec.end_glyph_id() < gid {
                    std::cmp::Ordering::Less
                } else if rec.start_glyph_id() > gid {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()?;
        let rec = &records[idx];
        let delta = gid.to_u16() - rec.start_glyph_id().to_u16();
        Some(rec.start_coverage_index() as usize + delta as usize)
    }

    /// The glyph with coverage index `index`.
    pub fn glyph_at(&self, index: usize) -> Option<GlyphId16> {
        let records = self.range_records.as_slice();
        let idx = records
            .binary_search_by(|rec| {
                let start = rec.start_coverage_index() as usize;
                if start + rec.glyph_count() <= index {
                    std::cmp::Ordering::Less
                } else if start > index {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .ok()?;
        let rec = &records[idx];
        let delta = index - rec.start_coverage_index() as usize;
        Some(GlyphId16::new(rec.start_glyph_id().to_u16() + delta as u16))
    }
}

impl MinByteRange for CoverageFormat2<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        0..self.range_records.byte_range().end
    }
}

/// [Coverage Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table)
///
/// The set of glyphs a subtable applies to. The position of a glyph in this
/// set (its *coverage index*) selects the matching entry in the subtable's
/// parallel arrays.
#[derive(Clone, Copy, Debug)]
pub enum CoverageTable<'a> {
    Format1(CoverageFormat1<'a>),
    Format2(CoverageFormat2<'a>),
}

impl<'a> FontRead<'a> for CoverageTable<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            CoverageFormat1::FORMAT => Ok(Self::Format1(FontRead::read(data)?)),
            CoverageFormat2::FORMAT => Ok(Self::Format2(FontRead::read(data)?)),
            other => Err(ReadError::UnsupportedFormat(other)),
        }
    }
}

impl<'a> CoverageTable<'a> {
    /// The format of this coverage table.
    pub fn coverage_format(&self) -> u16 {
        match self {
            Self::Format1(item) => item.coverage_format(),
            Self::Format2(item) => item.coverage_format(),
        }
    }

    /// The number of covered glyphs.
    pub fn len(&self) -> usize {
        match self {
            Self::Format1(item) => item.glyph_array().len(),
            Self::Format2(item) => item.glyph_count(),
        }
    }

    /// `true` if no glyphs are covered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The glyph with coverage index `index`.
    pub fn glyph_at(&self, index: usize) -> Option<GlyphId16> {
        match self {
            Self::Format1(item) => item.glyph_array().value(index),
            Self::Format2(item) => item.glyph_at(index),
        }
    }

    /// The coverage index of `gid`, if it is covered.
    pub fn index_of(&self, gid: GlyphId16) -> Option<usize> {
        match self {
            Self::Format1(item) => item.index_of(gid),
            Self::Format2(item) => item.index_of(gid),
        }
    }

    /// Iterate over the covered glyphs, in coverage index order.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId16> + 'a {
        // all one expression so that we have a single return type
        let (iter1, iter2) = match *self {
            CoverageTable::Format1(t) => (Some(t.glyph_array().values()), None),
            CoverageTable::Format2(t) => {
                let iter = t.range_records().as_slice().iter().flat_map(RangeRecord::iter);
                (None, Some(iter))
            }
        };

        iter1
            .into_iter()
            .flatten()
            .chain(iter2.into_iter().flatten())
    }

    pub fn offset_data(&self) -> FontData<'a> {
        match self {
            Self::Format1(item) => item.offset_data(),
            Self::Format2(item) => item.offset_data(),
        }
    }
}

impl MinByteRange for CoverageTable<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        match self {
            Self::Format1(item) => item.min_byte_range(),
            Self::Format2(item) => item.min_byte_range(),
        }
    }
}
