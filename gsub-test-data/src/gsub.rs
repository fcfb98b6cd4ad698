//! GSUB single and ligature substitution subtables

// https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-2-singlesubstformat1-subtable
#[rustfmt::skip]
pub static SINGLESUBSTFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x06, // coverageOffset
    0x00, 0xC0, // deltaGlyphID: 192
    // coverage
    0x00, 0x02, // coverageFormat
    0x00, 0x01, // rangeCount
    0x00, 0x4E, 0x00, 0x58, 0x00, 0x00, // 78..=88, starting at index 0
];

// https://learn.microsoft.com/en-us/typography/opentype/spec/gsub#example-3-singlesubstformat2-subtable
#[rustfmt::skip]
pub static SINGLESUBSTFORMAT2_TABLE: &[u8] = &[
    0x00, 0x02, // substFormat
    0x00, 0x0E, // coverageOffset
    0x00, 0x04, // glyphCount
    0x01, 0x31, // substituteGlyphIDs[0]
    0x01, 0x35, // substituteGlyphIDs[1]
    0x01, 0x3E, // substituteGlyphIDs[2]
    0x01, 0x43, // substituteGlyphIDs[3]
    // coverage
    0x00, 0x01, // coverageFormat
    0x00, 0x04, // glyphCount
    0x00, 0x3C, 0x00, 0x40, 0x00, 0x4B, 0x00, 0x4F,
];

/// Ligatures `10 30 -> 99` and `20 40 -> 88`, laid out the way the
/// builders write them: header, coverage, then each ligature set.
#[rustfmt::skip]
pub static LIGATURE_SUBST_BUILDER_ORDER: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x0A, // coverageOffset: 10
    0x00, 0x02, // ligatureSetCount
    0x00, 0x12, // ligatureSetOffsets[0]: 18
    0x00, 0x1C, // ligatureSetOffsets[1]: 28
    // 10: coverage
    0x00, 0x01, 0x00, 0x02, 0x00, 0x0A, 0x00, 0x14,
    // 18: ligature set 0
    0x00, 0x01, // ligatureCount
    0x00, 0x04, // ligatureOffsets[0]
    0x00, 0x63, // ligatureGlyph: 99
    0x00, 0x02, // componentCount
    0x00, 0x1E, // componentGlyphIDs[0]: 30
    // 28: ligature set 1
    0x00, 0x01, // ligatureCount
    0x00, 0x04, // ligatureOffsets[0]
    0x00, 0x58, // ligatureGlyph: 88
    0x00, 0x02, // componentCount
    0x00, 0x28, // componentGlyphIDs[0]: 40
];

/// The same ligatures as [`LIGATURE_SUBST_BUILDER_ORDER`], but with the
/// coverage table written after the ligature sets.
#[rustfmt::skip]
pub static LIGATURE_SUBST_SETS_FIRST: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x1E, // coverageOffset: 30
    0x00, 0x02, // ligatureSetCount
    0x00, 0x0A, // ligatureSetOffsets[0]: 10
    0x00, 0x14, // ligatureSetOffsets[1]: 20
    // 10: ligature set 0
    0x00, 0x01, 0x00, 0x04,
    0x00, 0x63, 0x00, 0x02, 0x00, 0x1E,
    // 20: ligature set 1
    0x00, 0x01, 0x00, 0x04,
    0x00, 0x58, 0x00, 0x02, 0x00, 0x28,
    // 30: coverage
    0x00, 0x01, 0x00, 0x02, 0x00, 0x0A, 0x00, 0x14,
];

/// Two coverage entries whose offsets point at one shared ligature set
/// (`x 30 -> 99`).
#[rustfmt::skip]
pub static LIGATURE_SUBST_SHARED_SET: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x0A, // coverageOffset: 10
    0x00, 0x02, // ligatureSetCount
    0x00, 0x12, // ligatureSetOffsets[0]: 18
    0x00, 0x12, // ligatureSetOffsets[1]: 18
    // 10: coverage
    0x00, 0x01, 0x00, 0x02, 0x00, 0x0A, 0x00, 0x14,
    // 18: the shared ligature set
    0x00, 0x01, 0x00, 0x04,
    0x00, 0x63, 0x00, 0x02, 0x00, 0x1E,
];

/// One ligature set holding `5 6 7 -> 100` and `5 6 -> 101`, in that
/// order, with a format 2 coverage.
#[rustfmt::skip]
pub static LIGATURE_SUBST_TWO_LIGATURES: &[u8] = &[
    0x00, 0x01, // substFormat
    0x00, 0x08, // coverageOffset: 8
    0x00, 0x01, // ligatureSetCount
    0x00, 0x12, // ligatureSetOffsets[0]: 18
    // 8: coverage
    0x00, 0x02, 0x00, 0x01,
    0x00, 0x05, 0x00, 0x05, 0x00, 0x00,
    // 18: ligature set
    0x00, 0x02, // ligatureCount
    0x00, 0x06, // ligatureOffsets[0]
    0x00, 0x0E, // ligatureOffsets[1]
    // ligature 0
    0x00, 0x64, 0x00, 0x03, 0x00, 0x06, 0x00, 0x07,
    // ligature 1
    0x00, 0x65, 0x00, 0x02, 0x00, 0x06,
];
