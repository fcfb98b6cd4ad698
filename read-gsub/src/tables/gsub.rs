//! the [GSUB] single and ligature substitution subtables
//!
//! [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub

use std::ops::Range;

use types::{BigEndian, GlyphId16, Offset16};

use crate::{
    FontData, FontRead, Format, ListCount, MinByteRange, OffsetRecordTable, ReadError,
    RecordList, ResolveOffset,
};

pub use super::layout::CoverageTable;

#[cfg(test)]
#[path = "../tests/test_gsub.rs"]
mod tests;

/// [Single Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#11-single-substitution-format-1)
#[derive(Clone, Copy, Debug)]
pub struct SingleSubstFormat1<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    coverage: CoverageTable<'a>,
    delta_glyph_id: u16,
}

impl Format<u16> for SingleSubstFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for SingleSubstFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != Self::FORMAT {
            return Err(ReadError::UnsupportedFormat(format));
        }
        let coverage_offset: Offset16 = cursor.read()?;
        let delta_glyph_id: u16 = cursor.read()?;
        let data = cursor.finish()?;
        let coverage = coverage_offset.resolve(data)?;
        Ok(SingleSubstFormat1 {
            data,
            coverage_offset,
            coverage,
            delta_glyph_id,
        })
    }
}

impl<'a> SingleSubstFormat1<'a> {
    /// Format identifier: format = 1
    pub fn subst_format(&self) -> u16 {
        Self::FORMAT
    }

    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// The Coverage table
    pub fn coverage(&self) -> CoverageTable<'a> {
        self.coverage
    }

    /// Add to original glyph ID to get substitute glyph ID
    ///
    /// The stored field is unsigned; it is reinterpreted as signed, so that
    /// `0x8000` is `-32768` and `0x7FFF` is `32767`.
    pub fn delta_glyph_id(&self) -> i16 {
        self.delta_glyph_id as i16
    }

    /// The delta field as stored.
    pub fn raw_delta(&self) -> u16 {
        self.delta_glyph_id
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

impl MinByteRange for SingleSubstFormat1<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        0..6
    }

    fn subtree_len(&self) -> Result<usize, ReadError> {
        let coverage_end = self.coverage_offset.to_u32() as usize + self.coverage.subtree_len()?;
        Ok(coverage_end.max(self.min_byte_range().end))
    }
}

/// [Single Substitution Format 2](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#12-single-substitution-format-2)
#[derive(Clone, Copy, Debug)]
pub struct SingleSubstFormat2<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    coverage: CoverageTable<'a>,
    substitute_glyph_ids: RecordList<'a, BigEndian<GlyphId16>>,
}

impl Format<u16> for SingleSubstFormat2<'_> {
    const FORMAT: u16 = 2;
}

impl<'a> FontRead<'a> for SingleSubstFormat2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != Self::FORMAT {
            return Err(ReadError::UnsupportedFormat(format));
        }
        let coverage_offset: Offset16 = cursor.read()?;
        let substitute_glyph_ids =
            RecordList::read_with_layout(data, ListCount::field(cursor.position()?))?;
        let coverage: CoverageTable = coverage_offset.resolve(data)?;
        if coverage.len() != substitute_glyph_ids.len() {
            return Err(ReadError::InconsistentCount);
        }
        Ok(SingleSubstFormat2 {
            data,
            coverage_offset,
            coverage,
            substitute_glyph_ids,
        })
    }
}

impl<'a> SingleSubstFormat2<'a> {
    /// Format identifier: format = 2
    pub fn subst_format(&self) -> u16 {
        Self::FORMAT
    }

    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// The Coverage table
    pub fn coverage(&self) -> CoverageTable<'a> {
        self.coverage
    }

    /// Number of glyph IDs in the substituteGlyphIDs array
    pub fn glyph_count(&self) -> u16 {
        self.substitute_glyph_ids.len() as u16
    }

    /// Array of substitute glyph IDs, ordered by Coverage index
    pub fn substitute_glyph_ids(&self) -> RecordList<'a, BigEndian<GlyphId16>> {
        self.substitute_glyph_ids
    }

    /// The substitute for the glyph with the given coverage index.
    pub fn substitute_for(&self, coverage_index: usize) -> Option<GlyphId16> {
        self.substitute_glyph_ids.value(coverage_index)
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

impl MinByteRange for SingleSubstFormat2<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        0..self.substitute_glyph_ids.byte_range().end
    }

    fn subtree_len(&self) -> Result<usize, ReadError> {
        let coverage_end = self.coverage_offset.to_u32() as usize + self.coverage.subtree_len()?;
        Ok(coverage_end.max(self.min_byte_range().end))
    }
}

/// A [Single Substitution](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#lookuptype-1-single-substitution-subtable) subtable, in either format
#[derive(Clone, Copy, Debug)]
pub enum SingleSubst<'a> {
    Format1(SingleSubstFormat1<'a>),
    Format2(SingleSubstFormat2<'a>),
}

impl<'a> FontRead<'a> for SingleSubst<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        match format {
            SingleSubstFormat1::FORMAT => Ok(Self::Format1(FontRead::read(data)?)),
            SingleSubstFormat2::FORMAT => Ok(Self::Format2(FontRead::read(data)?)),
            other => Err(ReadError::UnsupportedFormat(other)),
        }
    }
}

impl<'a> SingleSubst<'a> {
    /// The format of this subtable.
    pub fn subst_format(&self) -> u16 {
        match self {
            Self::Format1(item) => item.subst_format(),
            Self::Format2(item) => item.subst_format(),
        }
    }

    /// The Coverage table
    pub fn coverage(&self) -> CoverageTable<'a> {
        match self {
            Self::Format1(item) => item.coverage(),
            Self::Format2(item) => item.coverage(),
        }
    }

    pub fn offset_data(&self) -> FontData<'a> {
        match self {
            Self::Format1(item) => item.offset_data(),
            Self::Format2(item) => item.offset_data(),
        }
    }
}

impl MinByteRange for SingleSubst<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        match self {
            Self::Format1(item) => item.min_byte_range(),
            Self::Format2(item) => item.min_byte_range(),
        }
    }

    fn subtree_len(&self) -> Result<usize, ReadError> {
        match self {
            Self::Format1(item) => item.subtree_len(),
            Self::Format2(item) => item.subtree_len(),
        }
    }
}

/// Part of [LigatureSubstFormat1]
#[derive(Clone, Copy, Debug)]
pub struct Ligature<'a> {
    data: FontData<'a>,
    ligature_glyph: GlyphId16,
    component_glyph_ids: RecordList<'a, BigEndian<GlyphId16>>,
}

impl<'a> FontRead<'a> for Ligature<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let ligature_glyph: GlyphId16 = cursor.read()?;
        // the stored count includes the first component, which is not
        // written here (it is the glyph in the coverage table).
        let layout = ListCount::Field {
            pos: cursor.position()?,
            bias: 1,
        };
        let component_glyph_ids = RecordList::read_with_layout(data, layout)?;
        Ok(Ligature {
            data,
            ligature_glyph,
            component_glyph_ids,
        })
    }
}

impl<'a> Ligature<'a> {
    /// glyph ID of ligature to substitute
    pub fn ligature_glyph(&self) -> GlyphId16 {
        self.ligature_glyph
    }

    /// Number of components in the ligature
    pub fn component_count(&self) -> u16 {
        self.component_glyph_ids.stored_count() as u16
    }

    /// Array of component glyph IDs, starting with the second
    /// component, ordered in writing direction
    pub fn component_glyph_ids(&self) -> RecordList<'a, BigEndian<GlyphId16>> {
        self.component_glyph_ids
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

impl MinByteRange for Ligature<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        0..self.component_glyph_ids.byte_range().end
    }
}

/// Part of [LigatureSubstFormat1]
///
/// All ligatures beginning with the same glyph, ordered by preference.
pub type LigatureSet<'a> = OffsetRecordTable<'a, Ligature<'a>>;

/// [Ligature Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#41-ligature-substitution-format-1)
#[derive(Clone, Copy, Debug)]
pub struct LigatureSubstFormat1<'a> {
    data: FontData<'a>,
    coverage_offset: Offset16,
    coverage: CoverageTable<'a>,
    ligature_sets: OffsetRecordTable<'a, LigatureSet<'a>>,
}

impl Format<u16> for LigatureSubstFormat1<'_> {
    const FORMAT: u16 = 1;
}

impl<'a> FontRead<'a> for LigatureSubstFormat1<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        if format != Self::FORMAT {
            return Err(ReadError::UnsupportedFormat(format));
        }
        let coverage_offset: Offset16 = cursor.read()?;
        // the offsets are relative to this table, which also holds the count
        let ligature_sets =
            OffsetRecordTable::read_with_layout(data, ListCount::field(cursor.position()?))?;
        let coverage: CoverageTable = coverage_offset.resolve(data)?;
        if coverage.len() != ligature_sets.len() {
            return Err(ReadError::InconsistentCount);
        }
        Ok(LigatureSubstFormat1 {
            data,
            coverage_offset,
            coverage,
            ligature_sets,
        })
    }
}

impl<'a> LigatureSubstFormat1<'a> {
    /// Format identifier: format = 1
    pub fn subst_format(&self) -> u16 {
        Self::FORMAT
    }

    /// Offset to Coverage table, from beginning of substitution
    /// subtable
    pub fn coverage_offset(&self) -> Offset16 {
        self.coverage_offset
    }

    /// The Coverage table
    pub fn coverage(&self) -> CoverageTable<'a> {
        self.coverage
    }

    /// Number of LigatureSet tables
    pub fn ligature_set_count(&self) -> u16 {
        self.ligature_sets.len() as u16
    }

    /// Array of offsets to LigatureSet tables. Offsets are from
    /// beginning of substitution subtable, ordered by Coverage index
    pub fn ligature_sets(&self) -> OffsetRecordTable<'a, LigatureSet<'a>> {
        self.ligature_sets
    }

    /// The ligature set for sequences starting with `first`, if it is covered.
    pub fn ligature_set_for(
        &self,
        first: GlyphId16,
    ) -> Option<Result<LigatureSet<'a>, ReadError>> {
        self.coverage
            .index_of(first)
            .map(|idx| self.ligature_sets.get(idx))
    }

    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }
}

impl MinByteRange for LigatureSubstFormat1<'_> {
    fn min_byte_range(&self) -> Range<usize> {
        self.ligature_sets.min_byte_range()
    }

    fn subtree_len(&self) -> Result<usize, ReadError> {
        let coverage_end = self.coverage_offset.to_u32() as usize + self.coverage.subtree_len()?;
        Ok(coverage_end.max(self.ligature_sets.subtree_len()?))
    }
}
