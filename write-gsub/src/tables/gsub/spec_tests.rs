use super::*;
use crate::{assert_hex_eq, validate::ErrorKind, BuildTable, Error};
use gsub_test_data::{gsub as test_data, BeBuffer};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn gid(raw: u16) -> GlyphId16 {
    GlyphId16::new(raw)
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `10 30 -> 99` and `20 40 -> 88`, built from scratch
fn two_ligatures() -> LigatureSubstFormat1 {
    let set = |second: u16, lig: u16| {
        LigatureSet::from(vec![Ligature::new(gid(lig), vec![gid(second)])])
    };
    LigatureSubstFormat1::new(
        CoverageTable::from_glyphs(vec![gid(10), gid(20)]),
        vec![set(30, 99), set(40, 88)],
    )
}

#[test]
fn singlesubstformat1() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-2-singlesubstformat1-subtable
    let table = SingleSubstFormat1::load(test_data::SINGLESUBSTFORMAT1_TABLE.into()).unwrap();
    let dumped = crate::dump_table(&table).unwrap();
    assert_hex_eq!(test_data::SINGLESUBSTFORMAT1_TABLE, &dumped);
}

#[test]
fn singlesubstformat2() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-3-singlesubstformat2-subtable
    let table = SingleSubstFormat2::load(test_data::SINGLESUBSTFORMAT2_TABLE.into()).unwrap();
    assert_eq!(table.substitute_for(2), Some(gid(318)));
    let dumped = crate::dump_table(&table).unwrap();
    assert_hex_eq!(test_data::SINGLESUBSTFORMAT2_TABLE, &dumped);
}

#[rstest]
#[case::small(0x0005, 5)]
#[case::max(0x7FFF, 32767)]
#[case::min(0x8000, -32768)]
#[case::minus_one(0xFFFF, -1)]
fn delta_sign(#[case] raw: u16, #[case] expected: i16) {
    let buf = BeBuffer::new()
        .push(1u16)
        .push(6u16)
        .push(raw)
        .extend([1u16, 1, 3]);
    let table = SingleSubstFormat1::load(FontData::new(&buf)).unwrap();
    assert_eq!(table.delta_glyph_id(), expected);
    assert_hex_eq!(&buf, &table.build().unwrap());
}

#[test]
fn single_subst_dispatch() {
    let table = SingleSubst::load_canonical(test_data::SINGLESUBSTFORMAT2_TABLE).unwrap();
    assert_eq!(table.subst_format(), 2);
    assert_eq!(table.coverage().unwrap().len(), 4);
    assert_hex_eq!(test_data::SINGLESUBSTFORMAT2_TABLE, &table.build().unwrap());

    let buf = BeBuffer::new().push(3u16).push(6u16).push(0u16);
    assert_eq!(
        SingleSubst::load(FontData::new(&buf)).unwrap_err(),
        ReadError::UnsupportedFormat(3)
    );
}

#[test]
fn canonical_round_trip() {
    init_logging();
    // the coverage follows the ligature sets, which is not how we write them
    let table = LigatureSubstFormat1::load_canonical(test_data::LIGATURE_SUBST_SETS_FIRST).unwrap();
    let dumped = table.build().unwrap();
    assert_hex_eq!(test_data::LIGATURE_SUBST_SETS_FIRST, &dumped);
}

#[test]
fn full_rewrite_uses_builder_order() {
    let table =
        LigatureSubstFormat1::load(test_data::LIGATURE_SUBST_SETS_FIRST.into()).unwrap();
    let dumped = table.build().unwrap();
    assert_hex_eq!(test_data::LIGATURE_SUBST_BUILDER_ORDER, &dumped);
    // the canonical and full loads hold the same contents
    let canonical =
        LigatureSubstFormat1::load_canonical(test_data::LIGATURE_SUBST_SETS_FIRST).unwrap();
    assert_eq!(table, canonical);
}

#[test]
fn built_ligatures_reparse() {
    let dumped = two_ligatures().build().unwrap();
    assert_hex_eq!(test_data::LIGATURE_SUBST_BUILDER_ORDER, &dumped);

    let parsed = read::tables::gsub::LigatureSubstFormat1::read(FontData::new(&dumped)).unwrap();
    assert_eq!(parsed.coverage().index_of(gid(20)), Some(1));
    let set = parsed.ligature_sets().get(1).unwrap();
    assert_eq!(set.get(0).unwrap().ligature_glyph(), gid(88));
    assert_eq!(
        set.get(0).unwrap().component_glyph_ids().values().collect::<Vec<_>>(),
        [gid(40)]
    );
}

#[test]
fn edit_only_changes_edited_subtable() {
    init_logging();
    let original = test_data::LIGATURE_SUBST_SETS_FIRST;
    let mut table = LigatureSubstFormat1::load_canonical(original).unwrap();
    table
        .ligature_sets_mut()
        .get_mut(1)
        .and_then(|set| set.get_mut(0))
        .unwrap()
        .set_ligature_glyph(gid(77));
    let dumped = table.build().unwrap();

    // header, coverage, set 0, then the rewritten set 1
    assert_eq!(dumped.len(), original.len());
    assert_eq!(dumped[2..4], [0, 10]);
    assert_eq!(dumped[10..18], original[30..38]);
    assert_eq!(dumped[18..28], original[10..20]);
    assert_eq!(dumped[28..], [0, 1, 0, 4, 0, 77, 0, 2, 0, 40]);

    let reparsed = LigatureSubstFormat1::load(FontData::new(&dumped)).unwrap();
    assert_eq!(reparsed, table);
}

#[test]
fn replaced_components_keep_first_glyph_in_count() {
    let mut table = LigatureSubstFormat1::load_canonical(test_data::LIGATURE_SUBST_SETS_FIRST)
        .unwrap();
    let lig = table
        .ligature_sets_mut()
        .get_mut(1)
        .and_then(|set| set.get_mut(0))
        .unwrap();
    *lig.component_glyph_ids_mut() = vec![gid(41), gid(42)];
    assert_eq!(lig.component_count(), 3);
    let dumped = table.build().unwrap();

    let parsed = read::tables::gsub::LigatureSubstFormat1::read(FontData::new(&dumped)).unwrap();
    let lig = parsed.ligature_set_for(gid(20)).unwrap().unwrap().get(0).unwrap();
    assert_eq!(lig.component_count(), 3);
    assert_eq!(
        lig.component_glyph_ids().values().collect::<Vec<_>>(),
        [gid(41), gid(42)]
    );
}

#[test]
fn trailing_bytes_survive_canonical_round_trip() {
    let mut padded = test_data::LIGATURE_SUBST_BUILDER_ORDER.to_vec();
    padded.extend([0, 0]);

    let table = LigatureSubstFormat1::load_canonical(padded.clone()).unwrap();
    assert_hex_eq!(&padded, &table.build().unwrap());

    // the padding belongs to the input, not the table
    let table = LigatureSubstFormat1::load(FontData::new(&padded)).unwrap();
    assert_hex_eq!(test_data::LIGATURE_SUBST_BUILDER_ORDER, &table.build().unwrap());

    let mut table = LigatureSubstFormat1::load_canonical(padded).unwrap();
    table.coverage_mut().unwrap().add(gid(10));
    assert_hex_eq!(test_data::LIGATURE_SUBST_BUILDER_ORDER, &table.build().unwrap());
}

#[test]
fn shared_set_round_trips() {
    let original = test_data::LIGATURE_SUBST_SHARED_SET;
    let mut table = LigatureSubstFormat1::load_canonical(original).unwrap();
    assert_hex_eq!(original, &table.build().unwrap());

    // both offsets loaded the same set, but it is written once per reference
    table.coverage_mut().unwrap().set_format(None);
    let dumped = table.build().unwrap();
    assert_eq!(dumped.len(), original.len() + 10);
    assert_eq!(dumped[8..10], [0, 28]);
    assert_eq!(dumped[18..28], dumped[28..38]);
}

#[test]
fn ligature_order_is_preserved() {
    let table = LigatureSubstFormat1::load(test_data::LIGATURE_SUBST_TWO_LIGATURES.into()).unwrap();
    let set = table.ligature_set_for(gid(5)).unwrap();
    let ligs = set.iter().map(|lig| lig.unwrap().ligature_glyph()).collect::<Vec<_>>();
    assert_eq!(ligs, [gid(100), gid(101)]);
    assert_eq!(set.get(0).unwrap().component_count(), 3);
    assert_hex_eq!(test_data::LIGATURE_SUBST_TWO_LIGATURES, &table.build().unwrap());
}

#[test]
fn unset_ligature_set() {
    init_logging();
    let mut table = LigatureSubstFormat1::new(
        CoverageTable::from_glyphs(vec![gid(1), gid(2), gid(3)]),
        Vec::new(),
    );
    table
        .ligature_sets_mut()
        .set(2, vec![Ligature::new(gid(9), vec![gid(4)])].into());
    let Err(Error::ValidationFailed(report)) = table.build() else {
        panic!("unset ligature sets should not build");
    };
    let paths = report.errors().iter().map(|e| e.path()).collect::<Vec<_>>();
    assert_eq!(
        paths,
        [
            "LigatureSubstFormat1.ligature_sets[0]",
            "LigatureSubstFormat1.ligature_sets[1]"
        ]
    );
    assert!(report
        .errors()
        .iter()
        .all(|e| e.kind() == ErrorKind::IncompleteTable));
}

#[test]
fn unsorted_coverage() {
    let mut table = two_ligatures();
    table
        .coverage_mut()
        .unwrap()
        .set_glyphs(vec![gid(20), gid(10)]);
    let report = table.validate().unwrap_err();
    assert!(report.has(ErrorKind::InvalidCoverage));
    assert_eq!(
        report.errors()[0].path(),
        "LigatureSubstFormat1.coverage/CoverageTable.glyphs"
    );
}

#[test]
fn coverage_and_sets_disagree() {
    let mut table = two_ligatures();
    table.ligature_sets_mut().remove(1);
    let report = table.validate().unwrap_err();
    assert_eq!(report.errors()[0].kind(), ErrorKind::InconsistentCount);
    assert_eq!(report.errors()[0].path(), "LigatureSubstFormat1.ligature_sets");
}

#[test]
fn set_count_overruns_buffer() {
    let mut buf = BeBuffer::new()
        .push(1u16)
        .push(10u16)
        .push_with_tag(2u16, "count")
        .extend([18u16, 28])
        .extend_bytes(&test_data::LIGATURE_SUBST_BUILDER_ORDER[10..]);
    assert!(LigatureSubstFormat1::load(FontData::new(&buf)).is_ok());
    buf.write_at("count", 40u16);
    assert_eq!(
        LigatureSubstFormat1::load(FontData::new(&buf)).unwrap_err(),
        ReadError::InconsistentCount
    );
}

#[test]
fn offset_past_end() {
    let mut bytes = test_data::LIGATURE_SUBST_BUILDER_ORDER.to_vec();
    // point the second set past the end of the data
    bytes[9] = 0x40;
    assert_eq!(
        LigatureSubstFormat1::load_canonical(bytes).unwrap_err(),
        ReadError::MalformedOffset
    );
}

#[test]
fn offset_overflow() {
    init_logging();
    // each set is a little over 40k, so the third cannot be reached
    let big_set = || {
        LigatureSet::from(vec![Ligature::new(
            gid(1),
            (0..20_000).map(gid).collect(),
        )])
    };
    let table = LigatureSubstFormat1::new(
        CoverageTable::from_glyphs(vec![gid(1), gid(2), gid(3)]),
        vec![big_set(), big_set(), big_set()],
    );
    assert!(matches!(table.build(), Err(Error::OffsetOverflow)));
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let table =
        LigatureSubstFormat1::load_canonical(test_data::LIGATURE_SUBST_SETS_FIRST).unwrap();
    let json = serde_json::to_string(&table).unwrap();
    let loaded: LigatureSubstFormat1 = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, table);
    // the original bytes are not serialized
    assert_hex_eq!(test_data::LIGATURE_SUBST_BUILDER_ORDER, &loaded.build().unwrap());
}
