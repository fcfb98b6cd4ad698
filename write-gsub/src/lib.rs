//! Building and writing OpenType GSUB subtables
//!
//! This crate is the owned, editable counterpart to [`read-gsub`]. Every
//! table type in `read-gsub` has a mirror here that can be loaded from font
//! data, modified, and serialized back to bytes.
//!
//! # Canonical loading
//!
//! A table loaded with [`FromData::load_canonical`] remembers the exact bytes
//! it was read from, as do all of its subtables. Writing an unmodified table
//! reproduces those bytes exactly, regardless of how the original compiler
//! laid out its subtables. Modifying a table (through any `&mut` accessor)
//! discards the remembered bytes for that table and every table above it;
//! untouched subtables are still written verbatim.
//!
//! Tables built from scratch, or loaded with [`FromData::load`], are always
//! fully serialized: each table's header is followed by its subtables, in the
//! order their offsets are declared. Identical subtables are written once per
//! reference; they are never shared.
//!
//! # Example
//!
//! ```
//! use write_gsub::{
//!     tables::gsub::{Ligature, LigatureSubstFormat1},
//!     types::GlyphId16,
//!     BuildTable, FromData,
//! };
//!
//! # let bytes = gsub_test_data::gsub::LIGATURE_SUBST_SETS_FIRST;
//! let mut table = LigatureSubstFormat1::load_canonical(bytes).unwrap();
//! // unmodified tables round-trip exactly
//! assert_eq!(table.build().unwrap(), bytes);
//!
//! let set = table.ligature_sets_mut().get_mut(1).unwrap();
//! set.push(Ligature::new(GlyphId16::new(77), vec![GlyphId16::new(41)]));
//! let rebuilt = table.build().unwrap();
//! assert_ne!(rebuilt, bytes);
//! ```
//!
//! [`read-gsub`]: https://docs.rs/read-gsub

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod canonical;
pub mod error;
mod from_data;
#[cfg(test)]
mod hex_diff;
mod offset_table;
mod offsets;
mod record_list;
pub mod tables;
pub mod validate;
mod write;

pub use canonical::{CanonicalBytes, Provenance};
pub use error::Error;
pub use from_data::FromData;
pub use offset_table::OffsetRecordTable;
pub use offsets::OffsetMarker;
pub use record_list::RecordList;
pub use validate::Validate;
pub use write::{dump_table, BuildTable, FontWrite, TableWriter};

/// Public re-export of the read-gsub crate.
pub extern crate read_gsub as read;

/// Public re-export of the gsub-types crate.
pub extern crate gsub_types as types;
