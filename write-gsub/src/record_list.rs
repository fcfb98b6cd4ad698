//! Owned counted arrays of records

use std::sync::Arc;

use read::{FontData, FontRead, ReadError};
use types::{BigEndian, FixedSize, Scalar};

use crate::{
    canonical::Provenance,
    from_data::FromData,
    validate::{ErrorKind, Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

/// A u16-counted array of fixed-size records.
///
/// Entries may be *unset*: [`set`][Self::set] and [`insert`][Self::insert]
/// past the end of the list fill the gap with unset entries, and a list with
/// unset entries fails validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordList<T> {
    records: Vec<Option<T>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    provenance: Provenance,
}

impl<T> RecordList<T> {
    /// An empty list.
    pub fn new() -> Self {
        RecordList {
            records: Vec::new(),
            provenance: Provenance::default(),
        }
    }

    /// Copy the records out of a parsed list.
    ///
    /// The result is embedded in its parent, so it has no provenance.
    pub(crate) fn from_read(list: &read::RecordList<BigEndian<T>>) -> Self
    where
        T: Scalar,
    {
        RecordList {
            records: list.values().map(Some).collect(),
            provenance: Provenance::default(),
        }
    }

    /// The number of entries, including unset ones.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `idx`, if it exists and is set.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.records.get(idx).and_then(Option::as_ref)
    }

    /// A mutable reference to the record at `idx`, if it exists and is set.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.provenance.clear();
        self.records.get_mut(idx).and_then(Option::as_mut)
    }

    /// Set the record at `idx`.
    ///
    /// If `idx` is past the end, the list is first extended with unset entries.
    pub fn set(&mut self, idx: usize, value: T) {
        self.provenance.clear();
        if idx >= self.records.len() {
            self.records.resize_with(idx + 1, || None);
        }
        self.records[idx] = Some(value);
    }

    /// Insert a record at `idx`, shifting later records back.
    ///
    /// If `idx` is past the end, the list is first extended with unset entries.
    pub fn insert(&mut self, idx: usize, value: T) {
        self.provenance.clear();
        if idx > self.records.len() {
            self.records.resize_with(idx, || None);
        }
        self.records.insert(idx, Some(value));
    }

    /// Remove the entry at `idx`, returning its record if it was set.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx >= self.records.len() {
            return None;
        }
        self.provenance.clear();
        self.records.remove(idx)
    }

    pub fn push(&mut self, value: T) {
        self.provenance.clear();
        self.records.push(Some(value));
    }

    /// Iterate over every entry, including unset ones.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.records.iter().map(Option::as_ref)
    }

    /// Iterate over the records that are set.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter().flatten()
    }
}

impl<T> FromIterator<T> for RecordList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        RecordList {
            records: iter.into_iter().map(Some).collect(),
            provenance: Provenance::default(),
        }
    }
}

impl<T> From<Vec<T>> for RecordList<T> {
    fn from(src: Vec<T>) -> Self {
        src.into_iter().collect()
    }
}

impl<T: FontWrite + FixedSize> FontWrite for RecordList<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        // validation ensures the count fits
        (self.records.len() as u16).write_into(writer);
        for (i, record) in self.records.iter().enumerate() {
            match record {
                Some(record) => record.write_into(writer),
                None => {
                    log::warn!("writing unset record {i} as zeros");
                    writer.write_slice(&vec![0u8; T::RAW_BYTE_LEN]);
                }
            }
        }
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        self.provenance.bytes()
    }
}

impl<T> Validate for RecordList<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        if self.records.len() > u16::MAX as usize {
            ctx.report(
                ErrorKind::TooManyItems,
                format!("{} records do not fit in a u16 count", self.records.len()),
            );
        }
        ctx.in_array(|ctx| {
            for record in &self.records {
                ctx.array_item(|ctx| {
                    if record.is_none() {
                        ctx.report(ErrorKind::IncompleteTable, "record was never set");
                    }
                })
            }
        })
    }
}

/// A standalone list, with its count at the start of the data.
impl<T: Scalar + 'static> FromData for RecordList<T> {
    type Read<'a> = read::RecordList<'a, BigEndian<T>>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        let list = read::RecordList::<'a, BigEndian<T>>::read(data)?;
        let mut out = Self::from_read(&list);
        out.provenance = Provenance::capture(source, data, &list)?;
        Ok(out)
    }
}
