//! Scalar [data types] used by the GSUB subtable codec
//!
//! Everything in a GSUB subtable is a 16-bit big-endian value: glyph ids,
//! counts, format tags and offsets. This crate provides the wrappers used to
//! read those values without copying and to write them back out.
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod glyph_id;
mod offset;
mod raw;

pub use glyph_id::GlyphId16;
pub use offset::{Offset16, OffsetLen};
pub use raw::{BigEndian, FixedSize, Scalar};
