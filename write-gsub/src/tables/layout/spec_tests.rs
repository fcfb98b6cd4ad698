use super::*;
use crate::{assert_hex_eq, validate::ErrorKind, BuildTable, Error};
use gsub_test_data::layout as test_data;
use rstest::rstest;

fn gids(raw: &[u16]) -> Vec<GlyphId16> {
    raw.iter().copied().map(GlyphId16::new).collect()
}

#[rstest]
#[case::format_1(test_data::COVERAGEFORMAT1_TABLE)]
#[case::format_2(test_data::COVERAGEFORMAT2_TABLE)]
#[case::two_ranges(test_data::COVERAGEFORMAT2_TWO_RANGES)]
fn full_rewrite_matches(#[case] bytes: &[u8]) {
    // https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table
    let table = CoverageTable::load(FontData::new(bytes)).unwrap();
    let dumped = crate::dump_table(&table).unwrap();
    assert_hex_eq!(bytes, &dumped);
}

#[test]
fn loaded_format_is_kept() {
    // ten consecutive glyphs, encoded as a single range
    let mut table = CoverageTable::load_canonical(test_data::COVERAGEFORMAT2_TABLE).unwrap();
    assert_eq!(table.format(), CoverageFormat::Format2);
    assert_eq!(table.len(), 10);
    table.add(GlyphId16::new(100));
    assert_eq!(table.format(), CoverageFormat::Format2);

    let mut table = CoverageTable::load_canonical(test_data::COVERAGEFORMAT1_TABLE).unwrap();
    table.add(GlyphId16::new(0x39));
    table.add(GlyphId16::new(0x3A));
    // 0x38..=0x3B is now a run, but the table stays in format 1
    let bytes = table.build().unwrap();
    assert_eq!(bytes[..4], [0, 1, 0, 7]);
}

#[rstest]
#[case::empty(&[], CoverageFormat::Format1)]
#[case::scattered(&[1, 5, 9], CoverageFormat::Format1)]
#[case::three_in_a_row(&[1, 2, 3], CoverageFormat::Format1)]
#[case::four_in_a_row(&[1, 2, 3, 4], CoverageFormat::Format2)]
#[case::two_runs(&[1, 2, 3, 4, 10, 11, 12, 13], CoverageFormat::Format2)]
fn new_tables_pick_smaller_format(#[case] glyphs: &[u16], #[case] expected: CoverageFormat) {
    let table = CoverageTable::from_glyphs(gids(glyphs));
    assert_eq!(table.format(), expected);
}

#[test]
fn empty_coverage() {
    let table = CoverageTable::default();
    assert_eq!(table.build().unwrap(), [0, 1, 0, 0]);
}

#[test]
fn unsorted_glyphs_fail_validation() {
    let mut table = CoverageTable::default();
    table.set_glyphs(gids(&[5, 3, 7]));
    let Err(Error::ValidationFailed(report)) = table.build() else {
        panic!("unsorted glyphs should not build");
    };
    assert_eq!(report.errors().len(), 1);
    assert_eq!(report.errors()[0].kind(), ErrorKind::InvalidCoverage);
    assert_eq!(report.errors()[0].path(), "CoverageTable.glyphs");

    table.set_glyphs(gids(&[3, 3]));
    assert!(table.validate().is_err());
}

#[test]
fn format_2_ranges_written() {
    let mut table = CoverageTable::from_glyphs(gids(&[10, 11, 12, 20, 21]));
    table.set_format(Some(CoverageFormat::Format2));
    assert_hex_eq!(test_data::COVERAGEFORMAT2_TWO_RANGES, &table.build().unwrap());
}

#[test]
fn malformed_input_is_a_read_error() {
    let bytes = [0u8, 1, 0, 2, 0, 9, 0, 4];
    assert_eq!(
        CoverageTable::load(FontData::new(&bytes)).unwrap_err(),
        ReadError::InvalidCoverage
    );
    assert_eq!(
        CoverageTable::load(FontData::new(&[0, 3, 0, 0])).unwrap_err(),
        ReadError::UnsupportedFormat(3)
    );
}
