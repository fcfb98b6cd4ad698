use types::{GlyphId16, OffsetLen};

use crate::error::Error;
use crate::validate::Validate;

/// A type that that can be written out as part of a font file.
///
/// This both handles writing big-endian bytes as well as describing the
/// relationship between tables and their subtables.
pub trait FontWrite {
    /// Write our data and information about offsets into this [TableWriter].
    fn write_into(&self, writer: &mut TableWriter);

    /// The exact bytes to write for this table, if it should be written verbatim.
    ///
    /// This is `Some` for tables loaded in canonical mode and not modified
    /// since. It is consulted whenever the table is written as the target of
    /// an offset, or as the root of [`dump_table`]; a table embedded in its
    /// parent is always written field by field.
    fn canonical_bytes(&self) -> Option<&[u8]> {
        None
    }
}

/// An object that serializes a table and its subtables.
///
/// Each subtable is serialized as soon as its offset is written, into a
/// self-contained blob. When a table is finished, the blobs of its subtables
/// are appended after its own fields, in the order the offsets were written,
/// and each offset is patched to point at its blob.
///
/// Identical subtables are not deduplicated.
#[derive(Debug, Default)]
pub struct TableWriter {
    /// The table currently being written.
    current: TableData,
    /// The number of offsets that did not fit in their field.
    overflows: usize,
}

/// Attempt to serialize a table.
///
/// If the table is malformed, this will return an [`Error::ValidationFailed`];
/// if some offset cannot be represented, an [`Error::OffsetOverflow`].
/// Otherwise it will return the bytes encoding the table.
pub fn dump_table<T: FontWrite + Validate + ?Sized>(table: &T) -> Result<Vec<u8>, Error> {
    log::trace!("writing table");
    table.validate()?;
    if let Some(bytes) = table.canonical_bytes() {
        log::trace!("reusing {} canonical bytes", bytes.len());
        return Ok(bytes.to_vec());
    }
    let mut writer = TableWriter::default();
    table.write_into(&mut writer);
    let bytes = writer.finish()?;
    log::debug!("wrote table of {} bytes", bytes.len());
    Ok(bytes)
}

/// Validate and serialize a table.
///
/// This is implemented for every table in this crate.
pub trait BuildTable: FontWrite + Validate {
    /// Serialize this table to bytes.
    ///
    /// See [`dump_table`].
    fn build(&self) -> Result<Vec<u8>, Error> {
        dump_table(self)
    }
}

impl<T: FontWrite + Validate> BuildTable for T {}

impl TableWriter {
    /// Serialize `table` (and its subtables) into a standalone blob.
    fn add_table(&mut self, table: &dyn FontWrite) -> Vec<u8> {
        if let Some(bytes) = table.canonical_bytes() {
            log::trace!("reusing {} canonical bytes", bytes.len());
            return bytes.to_vec();
        }
        let parent = std::mem::take(&mut self.current);
        table.write_into(self);
        let child = std::mem::replace(&mut self.current, parent);
        self.resolve(child)
    }

    /// Append the subtable blobs of `data`, patching the offsets to each.
    fn resolve(&mut self, data: TableData) -> Vec<u8> {
        let TableData { mut bytes, offsets } = data;
        for offset in offsets {
            let target = bytes.len();
            let field = &mut bytes[offset.pos..offset.pos + offset.len as u8 as usize];
            if write_offset(field, offset.len, target).is_err() {
                log::warn!(
                    "offset at {} overflows: {target} > {}",
                    offset.pos,
                    offset.len.max_value()
                );
                self.overflows += 1;
            }
            bytes.extend_from_slice(&offset.blob);
        }
        bytes
    }

    /// Finish writing, returning the bytes of the root table.
    fn finish(mut self) -> Result<Vec<u8>, Error> {
        let root = std::mem::take(&mut self.current);
        let bytes = self.resolve(root);
        if self.overflows > 0 {
            return Err(Error::OffsetOverflow);
        }
        Ok(bytes)
    }

    /// Write raw bytes into this table.
    ///
    /// The caller is responsible for ensuring bytes are in big-endian order.
    #[inline]
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.current.bytes.extend_from_slice(bytes)
    }

    /// Create an offset to another table.
    ///
    /// The provided table will be serialized immediately, and the position
    /// of the offset within the current table will be recorded. Offsets
    /// are resolved when the current table is finished, at which point we
    /// overwrite each recorded offset position with the position of the
    /// subtable's blob.
    pub fn write_offset(&mut self, obj: &dyn FontWrite, len: OffsetLen) {
        let blob = self.add_table(obj);
        self.current.add_offset(blob, len);
    }

    /// Write the null bytes of an offset whose target is missing.
    pub fn write_null_offset(&mut self, len: OffsetLen) {
        self.write_slice(len.null_bytes());
    }

    /// The number of bytes written to the current table so far.
    ///
    /// This does not include subtables.
    pub fn current_len(&self) -> usize {
        self.current.bytes.len()
    }
}

fn write_offset(at: &mut [u8], len: OffsetLen, resolved: usize) -> Result<(), ()> {
    match len {
        OffsetLen::Offset16 => at.copy_from_slice(
            u16::try_from(resolved)
                .map_err(|_| ())?
                .to_be_bytes()
                .as_slice(),
        ),
    }
    Ok(())
}

/// The encoded data for a given table, along with its pending offsets
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct TableData {
    bytes: Vec<u8>,
    offsets: Vec<PendingOffset>,
}

/// The position and width of an offset, along with the serialized target
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingOffset {
    /// the position of the offset within the parent table
    pos: usize,
    len: OffsetLen,
    blob: Vec<u8>,
}

impl TableData {
    fn add_offset(&mut self, blob: Vec<u8>, len: OffsetLen) {
        self.offsets.push(PendingOffset {
            pos: self.bytes.len(),
            len,
            blob,
        });
        self.bytes.extend_from_slice(len.null_bytes());
    }
}

macro_rules! write_be_bytes {
    ($ty:ty) => {
        impl FontWrite for $ty {
            #[inline]
            fn write_into(&self, writer: &mut TableWriter) {
                writer.write_slice(&self.to_be_bytes())
            }
        }
    };
}

//NOTE: not implemented for offsets! it would be too easy to accidentally write them.
write_be_bytes!(u8);
write_be_bytes!(i8);
write_be_bytes!(u16);
write_be_bytes!(i16);
write_be_bytes!(u32);
write_be_bytes!(i32);
write_be_bytes!(GlyphId16);

impl<T: FontWrite> FontWrite for [T] {
    fn write_into(&self, writer: &mut TableWriter) {
        self.iter().for_each(|item| item.write_into(writer))
    }
}

impl<T: FontWrite> FontWrite for Vec<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.as_slice().write_into(writer)
    }
}
