//! OpenType layout common tables

use std::sync::Arc;

use read::{FontData, FontRead, ReadError};
use types::GlyphId16;

use crate::{
    canonical::Provenance,
    from_data::FromData,
    validate::{ErrorKind, Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

#[cfg(test)]
mod spec_tests;

/// The two encodings of a [`CoverageTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoverageFormat {
    /// An array of glyph ids.
    Format1,
    /// An array of glyph ranges.
    Format2,
}

/// [Coverage Table](https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table)
///
/// The glyphs are stored as a flat list, in coverage index order, regardless
/// of how they are encoded. A table loaded from font data remembers its
/// format, and keeps it when modified; a new table uses whichever format is
/// smaller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageTable {
    glyphs: Vec<GlyphId16>,
    format: Option<CoverageFormat>,
    #[cfg_attr(feature = "serde", serde(skip))]
    provenance: Provenance,
}

impl CoverageTable {
    /// Create a new table from a vec of `GlyphId16`.
    ///
    /// The glyphs are sorted, and duplicates removed.
    pub fn from_glyphs(mut glyphs: Vec<GlyphId16>) -> Self {
        glyphs.sort_unstable();
        glyphs.dedup();
        CoverageTable {
            glyphs,
            ..Default::default()
        }
    }

    /// Replace the covered glyphs.
    ///
    /// The list is stored as given. It must be strictly increasing, which is
    /// checked when the table is validated.
    pub fn set_glyphs(&mut self, glyphs: Vec<GlyphId16>) {
        self.provenance.clear();
        self.glyphs = glyphs;
    }

    /// Add a `GlyphId16` to this coverage table.
    ///
    /// Returns the coverage index of the added glyph.
    ///
    /// If the glyph already exists, this returns its current index.
    pub fn add(&mut self, glyph: GlyphId16) -> usize {
        match self.glyphs.binary_search(&glyph) {
            Ok(ix) => ix,
            Err(ix) => {
                self.provenance.clear();
                self.glyphs.insert(ix, glyph);
                ix
            }
        }
    }

    /// The covered glyphs, in coverage index order.
    pub fn glyphs(&self) -> &[GlyphId16] {
        &self.glyphs
    }

    /// Iterate over the covered glyphs, in coverage index order.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId16> + '_ {
        self.glyphs.iter().copied()
    }

    /// The number of covered glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The coverage index of `gid`, if it is covered.
    pub fn index_of(&self, gid: GlyphId16) -> Option<usize> {
        self.glyphs.binary_search(&gid).ok()
    }

    /// The glyph with coverage index `index`.
    pub fn glyph_at(&self, index: usize) -> Option<GlyphId16> {
        self.glyphs.get(index).copied()
    }

    /// The format this table will be written in.
    pub fn format(&self) -> CoverageFormat {
        match self.format {
            Some(format) => format,
            None if should_choose_coverage_format_2(&self.glyphs) => CoverageFormat::Format2,
            None => CoverageFormat::Format1,
        }
    }

    /// Force a particular format, or with `None`, pick the smaller one.
    pub fn set_format(&mut self, format: Option<CoverageFormat>) {
        self.provenance.clear();
        self.format = format;
    }
}

impl FromIterator<GlyphId16> for CoverageTable {
    fn from_iter<T: IntoIterator<Item = GlyphId16>>(iter: T) -> Self {
        let glyphs = iter.into_iter().collect::<Vec<_>>();
        CoverageTable::from_glyphs(glyphs)
    }
}

impl From<Vec<GlyphId16>> for CoverageTable {
    fn from(value: Vec<GlyphId16>) -> Self {
        CoverageTable::from_glyphs(value)
    }
}

fn should_choose_coverage_format_2(glyphs: &[GlyphId16]) -> bool {
    let format2_len = 4 + RangeRecord::iter_for_glyphs(glyphs).count() * 6;
    let format1_len = 4 + glyphs.len() * 2;
    format2_len < format1_len
}

impl FontWrite for CoverageTable {
    fn write_into(&self, writer: &mut TableWriter) {
        match self.format() {
            CoverageFormat::Format1 => {
                1u16.write_into(writer);
                (self.glyphs.len() as u16).write_into(writer);
                self.glyphs.write_into(writer);
            }
            CoverageFormat::Format2 => {
                let ranges = RangeRecord::iter_for_glyphs(&self.glyphs).collect::<Vec<_>>();
                2u16.write_into(writer);
                (ranges.len() as u16).write_into(writer);
                ranges.write_into(writer);
            }
        }
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        self.provenance.bytes()
    }
}

impl Validate for CoverageTable {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("CoverageTable", |ctx| {
            ctx.in_field("glyphs", |ctx| {
                if self.glyphs.len() > u16::MAX as usize {
                    ctx.report(ErrorKind::TooManyItems, "too many glyphs");
                }
                if let Some(pos) = self.glyphs.windows(2).position(|w| w[0] >= w[1]) {
                    ctx.report(
                        ErrorKind::InvalidCoverage,
                        format!(
                            "glyphs must be strictly increasing, found {} before {}",
                            self.glyphs[pos],
                            self.glyphs[pos + 1]
                        ),
                    );
                }
            })
        })
    }
}

impl FromData for CoverageTable {
    type Read<'a> = read::tables::layout::CoverageTable<'a>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        let table = read::tables::layout::CoverageTable::read(data)?;
        let format = match table {
            read::tables::layout::CoverageTable::Format1(_) => CoverageFormat::Format1,
            read::tables::layout::CoverageTable::Format2(_) => CoverageFormat::Format2,
        };
        Ok(CoverageTable {
            glyphs: table.iter().collect(),
            format: Some(format),
            provenance: Provenance::capture(source, data, &table)?,
        })
    }
}

/// A record in a format 2 [`CoverageTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeRecord {
    /// First glyph ID in the range
    pub start_glyph_id: GlyphId16,
    /// Last glyph ID in the range
    pub end_glyph_id: GlyphId16,
    /// Coverage Index of first glyph ID in range
    pub start_coverage_index: u16,
}

impl RangeRecord {
    /// An iterator over records for this array of glyphs.
    ///
    /// # Note
    ///
    /// this function expects that glyphs are already sorted.
    pub fn iter_for_glyphs(glyphs: &[GlyphId16]) -> impl Iterator<Item = RangeRecord> + '_ {
        let mut cur_range = glyphs.first().copied().map(|g| (g, g));
        let mut len = 0u16;
        let mut iter = glyphs.iter().skip(1).copied();

        #[allow(clippy::while_let_on_iterator)]
        std::iter::from_fn(move || {
            while let Some(glyph) = iter.next() {
                match cur_range {
                    None => return None,
                    Some((a, b)) if are_sequential(b, glyph) => cur_range = Some((a, glyph)),
                    Some((a, b)) => {
                        let result = RangeRecord {
                            start_glyph_id: a,
                            end_glyph_id: b,
                            start_coverage_index: len,
                        };
                        cur_range = Some((glyph, glyph));
                        len += 1 + b.to_u16().saturating_sub(a.to_u16());
                        return Some(result);
                    }
                }
            }
            cur_range
                .take()
                .map(|(start_glyph_id, end_glyph_id)| RangeRecord {
                    start_glyph_id,
                    end_glyph_id,
                    start_coverage_index: len,
                })
        })
    }
}

fn are_sequential(gid1: GlyphId16, gid2: GlyphId16) -> bool {
    gid2.to_u16().saturating_sub(gid1.to_u16()) == 1
}

impl FontWrite for RangeRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.start_glyph_id.write_into(writer);
        self.end_glyph_id.write_into(writer);
        self.start_coverage_index.write_into(writer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_glyph_vec<const N: usize>(gids: [u16; N]) -> Vec<GlyphId16> {
        gids.into_iter().map(GlyphId16::new).collect()
    }

    #[test]
    fn coverage_builder() {
        let coverage = make_glyph_vec([1u16, 2, 9, 3, 6, 9])
            .into_iter()
            .collect::<CoverageTable>();
        assert_eq!(coverage.glyphs(), make_glyph_vec([1, 2, 3, 6, 9]));
    }

    #[test]
    fn add_returns_index() {
        let mut coverage = CoverageTable::from_glyphs(make_glyph_vec([10, 30]));
        assert_eq!(coverage.add(GlyphId16::new(20)), 1);
        assert_eq!(coverage.add(GlyphId16::new(30)), 2);
        assert_eq!(coverage.add(GlyphId16::new(5)), 0);
        assert_eq!(coverage.glyphs(), make_glyph_vec([5, 10, 20, 30]));
        assert_eq!(coverage.index_of(GlyphId16::new(30)), Some(3));
        assert_eq!(coverage.glyph_at(1), Some(GlyphId16::new(10)));
    }

    #[test]
    fn ranges() {
        let glyphs = make_glyph_vec([1, 2, 3, 7, 9, 10]);
        let ranges = RangeRecord::iter_for_glyphs(&glyphs)
            .map(|r| (r.start_glyph_id.to_u16(), r.end_glyph_id.to_u16(), r.start_coverage_index))
            .collect::<Vec<_>>();
        assert_eq!(ranges, [(1, 3, 0), (7, 7, 3), (9, 10, 4)]);
        assert_eq!(RangeRecord::iter_for_glyphs(&[]).count(), 0);
    }
}
