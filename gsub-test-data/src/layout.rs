//! common layout tables

// https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#example-5-coverageformat1-table-glyph-id-list
#[rustfmt::skip]
pub static COVERAGEFORMAT1_TABLE: &[u8] = &[
    0x00, 0x01, // coverageFormat
    0x00, 0x05, // glyphCount
    0x00, 0x38, // glyphArray[0]
    0x00, 0x3B, // glyphArray[1]
    0x00, 0x41, // glyphArray[2]
    0x00, 0x42, // glyphArray[3]
    0x00, 0x4A, // glyphArray[4]
];

// https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#example-6-coverageformat2-table-range-of-glyphs
#[rustfmt::skip]
pub static COVERAGEFORMAT2_TABLE: &[u8] = &[
    0x00, 0x02, // coverageFormat
    0x00, 0x01, // rangeCount
    0x00, 0x4E, // rangeRecords[0].startGlyphID
    0x00, 0x57, // rangeRecords[0].endGlyphID
    0x00, 0x00, // rangeRecords[0].startCoverageIndex
];

/// Two ranges with a gap between them: 10..=12 and 20..=21.
#[rustfmt::skip]
pub static COVERAGEFORMAT2_TWO_RANGES: &[u8] = &[
    0x00, 0x02, // coverageFormat
    0x00, 0x02, // rangeCount
    0x00, 0x0A, 0x00, 0x0C, 0x00, 0x00, // 10..=12, starting at index 0
    0x00, 0x14, 0x00, 0x15, 0x00, 0x03, // 20..=21, starting at index 3
];
