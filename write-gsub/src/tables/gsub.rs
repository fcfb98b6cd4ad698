//! the [GSUB] single and ligature substitution subtables
//!
//! [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub

use std::sync::Arc;

use read::{FontData, FontRead, ReadError, ResolveOffset};
use types::GlyphId16;

use crate::{
    canonical::Provenance,
    from_data::FromData,
    offset_table::OffsetRecordTable,
    offsets::OffsetMarker,
    record_list::RecordList,
    validate::{ErrorKind, Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

pub use super::layout::CoverageTable;

mod builders;
#[cfg(test)]
mod spec_tests;

pub use builders::{LigatureSubBuilder, SingleSubBuilder};

/// Load the coverage table an offset points to.
fn load_coverage(
    offset: types::Offset16,
    base: FontData,
    source: Option<&Arc<[u8]>>,
) -> Result<OffsetMarker<CoverageTable>, ReadError> {
    let data = offset.resolve_data(base)?;
    CoverageTable::from_data(data, source).map(OffsetMarker::new)
}

/// Report a coverage table whose length disagrees with a parallel array.
fn check_coverage_len(
    ctx: &mut ValidationCtx,
    coverage: &OffsetMarker<CoverageTable>,
    field: &'static str,
    len: usize,
) {
    if let Some(coverage) = coverage.get() {
        if coverage.len() != len {
            ctx.in_field(field, |ctx| {
                ctx.report(
                    ErrorKind::InconsistentCount,
                    format!("{len} entries for {} covered glyphs", coverage.len()),
                )
            });
        }
    }
}

/// [Single Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#11-single-substitution-format-1)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleSubstFormat1 {
    coverage: OffsetMarker<CoverageTable>,
    delta_glyph_id: i16,
    #[cfg_attr(feature = "serde", serde(skip))]
    provenance: Provenance,
}

impl SingleSubstFormat1 {
    /// Construct a new `SingleSubstFormat1` subtable
    pub fn new(coverage: CoverageTable, delta_glyph_id: i16) -> Self {
        SingleSubstFormat1 {
            coverage: coverage.into(),
            delta_glyph_id,
            provenance: Provenance::default(),
        }
    }

    /// The Coverage table
    pub fn coverage(&self) -> Option<&CoverageTable> {
        self.coverage.get()
    }

    pub fn coverage_mut(&mut self) -> Option<&mut CoverageTable> {
        self.provenance.clear();
        self.coverage.get_mut()
    }

    pub fn set_coverage(&mut self, coverage: CoverageTable) {
        self.provenance.clear();
        self.coverage.set(coverage);
    }

    /// Add to original glyph ID to get substitute glyph ID
    pub fn delta_glyph_id(&self) -> i16 {
        self.delta_glyph_id
    }

    pub fn set_delta_glyph_id(&mut self, delta: i16) {
        self.provenance.clear();
        self.delta_glyph_id = delta;
    }
}

impl FontWrite for SingleSubstFormat1 {
    fn write_into(&self, writer: &mut TableWriter) {
        1u16.write_into(writer);
        self.coverage.write_into(writer);
        self.delta_glyph_id.write_into(writer);
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        self.provenance.bytes()
    }
}

impl Validate for SingleSubstFormat1 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("SingleSubstFormat1", |ctx| {
            ctx.in_field("coverage", |ctx| self.coverage.validate_impl(ctx));
        })
    }
}

impl FromData for SingleSubstFormat1 {
    type Read<'a> = read::tables::gsub::SingleSubstFormat1<'a>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        let table = read::tables::gsub::SingleSubstFormat1::read(data)?;
        Ok(SingleSubstFormat1 {
            coverage: load_coverage(table.coverage_offset(), table.offset_data(), source)?,
            delta_glyph_id: table.delta_glyph_id(),
            provenance: Provenance::capture(source, data, &table)?,
        })
    }
}

/// [Single Substitution Format 2](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#12-single-substitution-format-2)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SingleSubstFormat2 {
    coverage: OffsetMarker<CoverageTable>,
    substitute_glyph_ids: RecordList<GlyphId16>,
    #[cfg_attr(feature = "serde", serde(skip))]
    provenance: Provenance,
}

impl SingleSubstFormat2 {
    /// Construct a new `SingleSubstFormat2` subtable
    pub fn new(coverage: CoverageTable, substitute_glyph_ids: Vec<GlyphId16>) -> Self {
        SingleSubstFormat2 {
            coverage: coverage.into(),
            substitute_glyph_ids: substitute_glyph_ids.into(),
            provenance: Provenance::default(),
        }
    }

    /// The Coverage table
    pub fn coverage(&self) -> Option<&CoverageTable> {
        self.coverage.get()
    }

    pub fn coverage_mut(&mut self) -> Option<&mut CoverageTable> {
        self.provenance.clear();
        self.coverage.get_mut()
    }

    pub fn set_coverage(&mut self, coverage: CoverageTable) {
        self.provenance.clear();
        self.coverage.set(coverage);
    }

    /// Array of substitute glyph IDs, ordered by Coverage index
    pub fn substitute_glyph_ids(&self) -> &RecordList<GlyphId16> {
        &self.substitute_glyph_ids
    }

    pub fn substitute_glyph_ids_mut(&mut self) -> &mut RecordList<GlyphId16> {
        self.provenance.clear();
        &mut self.substitute_glyph_ids
    }

    /// The substitute for the glyph with the given coverage index.
    pub fn substitute_for(&self, coverage_index: usize) -> Option<GlyphId16> {
        self.substitute_glyph_ids.get(coverage_index).copied()
    }
}

impl FontWrite for SingleSubstFormat2 {
    fn write_into(&self, writer: &mut TableWriter) {
        2u16.write_into(writer);
        self.coverage.write_into(writer);
        self.substitute_glyph_ids.write_into(writer);
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        self.provenance.bytes()
    }
}

impl Validate for SingleSubstFormat2 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("SingleSubstFormat2", |ctx| {
            ctx.in_field("coverage", |ctx| self.coverage.validate_impl(ctx));
            ctx.in_field("substitute_glyph_ids", |ctx| {
                self.substitute_glyph_ids.validate_impl(ctx)
            });
            check_coverage_len(
                ctx,
                &self.coverage,
                "substitute_glyph_ids",
                self.substitute_glyph_ids.len(),
            );
        })
    }
}

impl FromData for SingleSubstFormat2 {
    type Read<'a> = read::tables::gsub::SingleSubstFormat2<'a>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        let table = read::tables::gsub::SingleSubstFormat2::read(data)?;
        Ok(SingleSubstFormat2 {
            coverage: load_coverage(table.coverage_offset(), table.offset_data(), source)?,
            substitute_glyph_ids: RecordList::from_read(&table.substitute_glyph_ids()),
            provenance: Provenance::capture(source, data, &table)?,
        })
    }
}

/// A [Single Substitution](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#lookuptype-1-single-substitution-subtable) subtable, in either format
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SingleSubst {
    Format1(SingleSubstFormat1),
    Format2(SingleSubstFormat2),
}

impl SingleSubst {
    /// Construct a new `SingleSubstFormat1` subtable
    pub fn format_1(coverage: CoverageTable, delta_glyph_id: i16) -> Self {
        Self::Format1(SingleSubstFormat1::new(coverage, delta_glyph_id))
    }

    /// Construct a new `SingleSubstFormat2` subtable
    pub fn format_2(coverage: CoverageTable, substitute_glyph_ids: Vec<GlyphId16>) -> Self {
        Self::Format2(SingleSubstFormat2::new(coverage, substitute_glyph_ids))
    }

    /// The format of this subtable.
    pub fn subst_format(&self) -> u16 {
        match self {
            Self::Format1(_) => 1,
            Self::Format2(_) => 2,
        }
    }

    /// The Coverage table
    pub fn coverage(&self) -> Option<&CoverageTable> {
        match self {
            Self::Format1(item) => item.coverage(),
            Self::Format2(item) => item.coverage(),
        }
    }
}

impl FontWrite for SingleSubst {
    fn write_into(&self, writer: &mut TableWriter) {
        match self {
            Self::Format1(item) => item.write_into(writer),
            Self::Format2(item) => item.write_into(writer),
        }
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Format1(item) => item.canonical_bytes(),
            Self::Format2(item) => item.canonical_bytes(),
        }
    }
}

impl Validate for SingleSubst {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        match self {
            Self::Format1(item) => item.validate_impl(ctx),
            Self::Format2(item) => item.validate_impl(ctx),
        }
    }
}

impl FromData for SingleSubst {
    type Read<'a> = read::tables::gsub::SingleSubst<'a>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        match read::tables::gsub::SingleSubst::read(data)? {
            read::tables::gsub::SingleSubst::Format1(_) => {
                SingleSubstFormat1::from_data(data, source).map(Self::Format1)
            }
            read::tables::gsub::SingleSubst::Format2(_) => {
                SingleSubstFormat2::from_data(data, source).map(Self::Format2)
            }
        }
    }
}

impl From<SingleSubstFormat1> for SingleSubst {
    fn from(src: SingleSubstFormat1) -> SingleSubst {
        SingleSubst::Format1(src)
    }
}

impl From<SingleSubstFormat2> for SingleSubst {
    fn from(src: SingleSubstFormat2) -> SingleSubst {
        SingleSubst::Format2(src)
    }
}

/// Part of [LigatureSubstFormat1]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ligature {
    ligature_glyph: GlyphId16,
    /// Starts with the second component; the first is the glyph in the
    /// coverage table.
    component_glyph_ids: Vec<GlyphId16>,
    #[cfg_attr(feature = "serde", serde(skip))]
    provenance: Provenance,
}

impl Ligature {
    /// Construct a new `Ligature` table
    ///
    /// `component_glyph_ids` starts with the second component.
    pub fn new(ligature_glyph: GlyphId16, component_glyph_ids: Vec<GlyphId16>) -> Self {
        Ligature {
            ligature_glyph,
            component_glyph_ids,
            provenance: Provenance::default(),
        }
    }

    /// glyph ID of ligature to substitute
    pub fn ligature_glyph(&self) -> GlyphId16 {
        self.ligature_glyph
    }

    pub fn set_ligature_glyph(&mut self, glyph: GlyphId16) {
        self.provenance.clear();
        self.ligature_glyph = glyph;
    }

    /// Number of components in the ligature, including the first.
    pub fn component_count(&self) -> usize {
        self.component_glyph_ids.len() + 1
    }

    /// Array of component glyph IDs, starting with the second
    /// component, ordered in writing direction
    pub fn component_glyph_ids(&self) -> &[GlyphId16] {
        &self.component_glyph_ids
    }

    pub fn component_glyph_ids_mut(&mut self) -> &mut Vec<GlyphId16> {
        self.provenance.clear();
        &mut self.component_glyph_ids
    }
}

impl FontWrite for Ligature {
    fn write_into(&self, writer: &mut TableWriter) {
        self.ligature_glyph.write_into(writer);
        // validation ensures the count fits
        (self.component_count() as u16).write_into(writer);
        self.component_glyph_ids.write_into(writer);
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        self.provenance.bytes()
    }
}

impl Validate for Ligature {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("Ligature", |ctx| {
            ctx.in_field("component_glyph_ids", |ctx| {
                if self.component_count() > u16::MAX as usize {
                    ctx.report(
                        ErrorKind::TooManyItems,
                        format!(
                            "{} components do not fit in a u16 count",
                            self.component_count()
                        ),
                    );
                }
            })
        })
    }
}

impl FromData for Ligature {
    type Read<'a> = read::tables::gsub::Ligature<'a>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        let table = read::tables::gsub::Ligature::read(data)?;
        Ok(Ligature {
            ligature_glyph: table.ligature_glyph(),
            component_glyph_ids: table.component_glyph_ids().values().collect(),
            provenance: Provenance::capture(source, data, &table)?,
        })
    }
}

/// Part of [LigatureSubstFormat1]
///
/// All ligatures beginning with the same glyph, ordered by preference.
pub type LigatureSet = OffsetRecordTable<Ligature>;

/// [Ligature Substitution Format 1](https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#41-ligature-substitution-format-1)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LigatureSubstFormat1 {
    coverage: OffsetMarker<CoverageTable>,
    ligature_sets: OffsetRecordTable<LigatureSet>,
    #[cfg_attr(feature = "serde", serde(skip))]
    provenance: Provenance,
}

impl LigatureSubstFormat1 {
    /// Construct a new `LigatureSubstFormat1` subtable
    ///
    /// The ligature sets are ordered by coverage index.
    pub fn new(coverage: CoverageTable, ligature_sets: Vec<LigatureSet>) -> Self {
        LigatureSubstFormat1 {
            coverage: coverage.into(),
            ligature_sets: ligature_sets.into(),
            provenance: Provenance::default(),
        }
    }

    /// The Coverage table
    pub fn coverage(&self) -> Option<&CoverageTable> {
        self.coverage.get()
    }

    pub fn coverage_mut(&mut self) -> Option<&mut CoverageTable> {
        self.provenance.clear();
        self.coverage.get_mut()
    }

    pub fn set_coverage(&mut self, coverage: CoverageTable) {
        self.provenance.clear();
        self.coverage.set(coverage);
    }

    /// Array of LigatureSet tables, ordered by Coverage index
    pub fn ligature_sets(&self) -> &OffsetRecordTable<LigatureSet> {
        &self.ligature_sets
    }

    pub fn ligature_sets_mut(&mut self) -> &mut OffsetRecordTable<LigatureSet> {
        self.provenance.clear();
        &mut self.ligature_sets
    }

    /// The ligature set for sequences starting with `first`, if it is covered.
    pub fn ligature_set_for(&self, first: GlyphId16) -> Option<&LigatureSet> {
        let idx = self.coverage.get()?.index_of(first)?;
        self.ligature_sets.get(idx)
    }
}

impl FontWrite for LigatureSubstFormat1 {
    fn write_into(&self, writer: &mut TableWriter) {
        1u16.write_into(writer);
        self.coverage.write_into(writer);
        self.ligature_sets.write_into(writer);
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        self.provenance.bytes()
    }
}

impl Validate for LigatureSubstFormat1 {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("LigatureSubstFormat1", |ctx| {
            ctx.in_field("coverage", |ctx| self.coverage.validate_impl(ctx));
            ctx.in_field("ligature_sets", |ctx| self.ligature_sets.validate_impl(ctx));
            check_coverage_len(ctx, &self.coverage, "ligature_sets", self.ligature_sets.len());
        })
    }
}

impl FromData for LigatureSubstFormat1 {
    type Read<'a> = read::tables::gsub::LigatureSubstFormat1<'a>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        let table = read::tables::gsub::LigatureSubstFormat1::read(data)?;
        Ok(LigatureSubstFormat1 {
            coverage: load_coverage(table.coverage_offset(), table.offset_data(), source)?,
            ligature_sets: OffsetRecordTable::from_read(&table.ligature_sets(), source)?,
            provenance: Provenance::capture(source, data, &table)?,
        })
    }
}
