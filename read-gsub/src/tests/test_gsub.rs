use super::*;
use gsub_test_data::{gsub as test_data, BeBuffer};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn gids(list: RecordList<BigEndian<GlyphId16>>) -> Vec<u16> {
    list.values().map(GlyphId16::to_u16).collect()
}

#[test]
fn singlesubstformat1() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-2-singlesubstformat1-subtable
    let table = SingleSubstFormat1::read(test_data::SINGLESUBSTFORMAT1_TABLE.into()).unwrap();
    assert_eq!(table.delta_glyph_id(), 192);
    assert_eq!(table.coverage().len(), 11);
    assert_eq!(
        table.subtree_len().unwrap(),
        test_data::SINGLESUBSTFORMAT1_TABLE.len()
    );
}

#[test]
fn singlesubstformat2() {
    // https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-3-singlesubstformat2-subtable
    let table = SingleSubstFormat2::read(test_data::SINGLESUBSTFORMAT2_TABLE.into()).unwrap();
    assert_eq!(gids(table.substitute_glyph_ids()), [305, 309, 318, 323]);
    let coverage = table.coverage();
    let idx = coverage.index_of(GlyphId16::new(0x4B)).unwrap();
    assert_eq!(table.substitute_for(idx), Some(GlyphId16::new(318)));
    assert_eq!(table.substitute_for(4), None);
    assert_eq!(table.min_byte_range(), 0..14);
}

#[rstest]
#[case(0x0005, 5)]
#[case(0x7FFF, 32767)]
#[case(0x8000, -32768)]
#[case(0xFFFF, -1)]
fn delta_is_reinterpreted_as_signed(#[case] raw: u16, #[case] expected: i16) {
    let buf = BeBuffer::new()
        .push(1u16)
        .push(6u16)
        .push(raw)
        .extend_bytes(gsub_test_data::layout::COVERAGEFORMAT1_TABLE);
    let table = SingleSubstFormat1::read(FontData::new(&buf)).unwrap();
    assert_eq!(table.delta_glyph_id(), expected);
    assert_eq!(table.raw_delta(), raw);
}

#[test]
fn single_subst_dispatches_on_format() {
    let one = SingleSubst::read(test_data::SINGLESUBSTFORMAT1_TABLE.into()).unwrap();
    assert!(matches!(one, SingleSubst::Format1(_)));
    let two = SingleSubst::read(test_data::SINGLESUBSTFORMAT2_TABLE.into()).unwrap();
    assert_eq!(two.subst_format(), 2);
    assert_eq!(two.coverage().len(), 4);

    let buf = BeBuffer::new().push(3u16).push(6u16).push(0u16);
    assert_eq!(
        SingleSubst::read(FontData::new(&buf)).unwrap_err(),
        ReadError::UnsupportedFormat(3)
    );
}

#[test]
fn singlesubstformat2_count_mismatch() {
    // three substitutes, but the coverage has four glyphs
    let buf = BeBuffer::new()
        .push(2u16)
        .push(12u16)
        .push(3u16)
        .extend([1u16, 2, 3])
        .extend_bytes(&test_data::SINGLESUBSTFORMAT2_TABLE[14..]);
    assert_eq!(
        SingleSubstFormat2::read(FontData::new(&buf)).unwrap_err(),
        ReadError::InconsistentCount
    );
}

#[test]
fn ligaturesubstformat1() {
    let table = LigatureSubstFormat1::read(test_data::LIGATURE_SUBST_BUILDER_ORDER.into()).unwrap();
    assert_eq!(table.ligature_set_count(), 2);
    assert_eq!(table.coverage_offset(), Offset16::new(10));
    assert_eq!(table.ligature_sets().offset(1), Some(Offset16::new(28)));

    let coverage = table.coverage();
    assert_eq!(coverage.index_of(GlyphId16::new(20)), Some(1));

    let set1 = table.ligature_sets().get(1).unwrap();
    assert_eq!(set1.len(), 1);
    let lig = set1.get(0).unwrap();
    assert_eq!(lig.ligature_glyph(), GlyphId16::new(88));
    assert_eq!(lig.component_count(), 2);
    assert_eq!(gids(lig.component_glyph_ids()), [40]);

    assert_eq!(
        table.subtree_len().unwrap(),
        test_data::LIGATURE_SUBST_BUILDER_ORDER.len()
    );
}

#[test]
fn coverage_after_sets() {
    let table = LigatureSubstFormat1::read(test_data::LIGATURE_SUBST_SETS_FIRST.into()).unwrap();
    assert_eq!(table.coverage_offset(), Offset16::new(30));
    let set0 = table
        .ligature_set_for(GlyphId16::new(10))
        .unwrap()
        .unwrap();
    assert_eq!(set0.get(0).unwrap().ligature_glyph(), GlyphId16::new(99));
    assert!(table.ligature_set_for(GlyphId16::new(11)).is_none());
    assert_eq!(
        table.subtree_len().unwrap(),
        test_data::LIGATURE_SUBST_SETS_FIRST.len()
    );
}

#[test]
fn shared_ligature_set() {
    let table = LigatureSubstFormat1::read(test_data::LIGATURE_SUBST_SHARED_SET.into()).unwrap();
    let a = table.ligature_sets().get(0).unwrap();
    let b = table.ligature_sets().get(1).unwrap();
    assert_eq!(a.offset_data().position(), b.offset_data().position());
    assert_eq!(
        table.subtree_len().unwrap(),
        test_data::LIGATURE_SUBST_SHARED_SET.len()
    );
}

#[test]
fn ligature_order_is_preserved() {
    let table =
        LigatureSubstFormat1::read(test_data::LIGATURE_SUBST_TWO_LIGATURES.into()).unwrap();
    assert_eq!(table.coverage().coverage_format(), 2);
    let set = table.ligature_sets().get(0).unwrap();
    let ligs: Vec<_> = set
        .iter()
        .map(|lig| {
            let lig = lig.unwrap();
            (lig.ligature_glyph().to_u16(), gids(lig.component_glyph_ids()))
        })
        .collect();
    assert_eq!(ligs, [(100, vec![6, 7]), (101, vec![6])]);
}

#[test]
fn ligature_set_count_overruns_buffer() {
    let mut buf = BeBuffer::new()
        .push(1u16)
        .push(10u16)
        .push_with_tag(2u16, "count")
        .extend_bytes(&test_data::LIGATURE_SUBST_BUILDER_ORDER[6..]);
    buf.write_at("count", 40u16);
    assert_eq!(
        LigatureSubstFormat1::read(FontData::new(&buf)).unwrap_err(),
        ReadError::InconsistentCount
    );
}

#[test]
fn ligature_set_count_disagrees_with_coverage() {
    let mut bytes = test_data::LIGATURE_SUBST_BUILDER_ORDER.to_vec();
    // claim a single ligature set
    bytes[5] = 1;
    assert_eq!(
        LigatureSubstFormat1::read(FontData::new(&bytes)).unwrap_err(),
        ReadError::InconsistentCount
    );
}

#[test]
fn ligature_set_offset_past_end() {
    let mut bytes = test_data::LIGATURE_SUBST_BUILDER_ORDER.to_vec();
    // point the second set at the end of the table
    bytes[9] = bytes.len() as u8;
    let table = LigatureSubstFormat1::read(FontData::new(&bytes)).unwrap();
    assert!(table.ligature_sets().get(0).is_ok());
    assert_eq!(
        table.ligature_sets().get(1).unwrap_err(),
        ReadError::MalformedOffset
    );
}

#[test]
fn unknown_ligature_subst_format() {
    let mut bytes = test_data::LIGATURE_SUBST_BUILDER_ORDER.to_vec();
    bytes[1] = 2;
    assert_eq!(
        LigatureSubstFormat1::read(FontData::new(&bytes)).unwrap_err(),
        ReadError::UnsupportedFormat(2)
    );
}

#[test]
fn ligature_with_single_component() {
    // a ligature of one glyph has no trailing components
    let buf = BeBuffer::new().push(GlyphId16::new(7)).push(1u16);
    let lig = Ligature::read(FontData::new(&buf)).unwrap();
    assert!(lig.component_glyph_ids().is_empty());
    assert_eq!(lig.component_count(), 1);
}
