//! Reading OpenType GSUB subtables
//!
//! This crate provides memory safe, zero-allocation parsing of the glyph
//! substitution subtables that are built out of coverage tables and
//! offset-addressed subtables:
//!
//! - [Coverage tables][CoverageTable] (formats 1 and 2)
//! - [Ligature substitution, format 1][LigatureSubstFormat1]
//! - [Single substitution, formats 1 and 2][SingleSubst]
//!
//! Every table is a thin, `Copy` view over a [`FontData`]. Subtables
//! referenced by offset are resolved lazily, each time they are accessed, by
//! slicing the parent's data; nothing is copied or cached.
//!
//! This crate does not interpret shaping semantics. It exposes the structure
//! of the data for a shaping engine (or an editing tool, such as the
//! `write-gsub` crate) to consume.
//!
//! # Example
//!
//! ```
//! use read_gsub::{tables::gsub::LigatureSubstFormat1, FontData, FontRead};
//! # let bytes = gsub_test_data::gsub::LIGATURE_SUBST_BUILDER_ORDER;
//! let table = LigatureSubstFormat1::read(FontData::new(bytes)).unwrap();
//! for (glyph, set) in table.coverage().iter().zip(table.ligature_sets().iter()) {
//!     let set = set.unwrap();
//!     println!("{glyph} starts {} ligatures", set.len());
//! }
//! ```
//!
//! [`FontData`]: crate::FontData
//! [CoverageTable]: tables::layout::CoverageTable
//! [LigatureSubstFormat1]: tables::gsub::LigatureSubstFormat1
//! [SingleSubst]: tables::gsub::SingleSubst

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod font_data;
mod offset;
mod offset_table;
mod read;
mod record_list;
pub mod tables;

pub use font_data::{Cursor, FontData};
pub use offset::ResolveOffset;
pub use offset_table::OffsetRecordTable;
pub use read::{FontRead, Format, MinByteRange, ReadError};
pub use record_list::{ListCount, RecordList};

/// Public re-export of the gsub-types crate.
pub extern crate gsub_types as types;
