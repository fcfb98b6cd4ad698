//! Owned counted arrays of offsets

use std::sync::Arc;

use read::{FontData, FontRead, ReadError, ResolveOffset};

use crate::{
    canonical::Provenance,
    from_data::FromData,
    offsets::OffsetMarker,
    validate::{ErrorKind, Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

/// A u16-counted array of offsets to subtables of type `T`.
///
/// Each entry is an [`OffsetMarker`]; entries created implicitly by
/// [`set`][Self::set] or [`insert`][Self::insert] past the end of the table
/// are unset, and fail validation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetRecordTable<T> {
    entries: Vec<OffsetMarker<T>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    provenance: Provenance,
}

impl<T> Default for OffsetRecordTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OffsetRecordTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        OffsetRecordTable {
            entries: Vec::new(),
            provenance: Provenance::default(),
        }
    }

    /// Load every subtable referenced by a parsed offset table.
    ///
    /// Each subtable keeps its own provenance; the table itself is assumed to
    /// be embedded in a parent, and has none.
    pub(crate) fn from_read<U>(
        table: &read::OffsetRecordTable<U>,
        source: Option<&Arc<[u8]>>,
    ) -> Result<Self, ReadError>
    where
        T: FromData,
    {
        let base = table.offset_data();
        let entries = table
            .offsets()
            .values()
            .map(|off| {
                let data = off.resolve_data(base)?;
                T::from_data(data, source).map(OffsetMarker::new)
            })
            .collect::<Result<_, _>>()?;
        Ok(OffsetRecordTable {
            entries,
            provenance: Provenance::default(),
        })
    }

    /// The number of entries, including unset ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The subtable at `idx`, if it exists and is set.
    pub fn get(&self, idx: usize) -> Option<&T> {
        self.entries.get(idx).and_then(OffsetMarker::get)
    }

    /// A mutable reference to the subtable at `idx`, if it exists and is set.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut T> {
        self.provenance.clear();
        self.entries.get_mut(idx).and_then(OffsetMarker::get_mut)
    }

    /// Set the subtable at `idx`.
    ///
    /// If `idx` is past the end, the table is first extended with unset entries.
    pub fn set(&mut self, idx: usize, table: T) {
        self.provenance.clear();
        if idx >= self.entries.len() {
            self.entries.resize_with(idx + 1, OffsetMarker::unset);
        }
        self.entries[idx].set(table);
    }

    /// Insert a subtable at `idx`, shifting later entries back.
    ///
    /// If `idx` is past the end, the table is first extended with unset entries.
    pub fn insert(&mut self, idx: usize, table: T) {
        self.provenance.clear();
        if idx > self.entries.len() {
            self.entries.resize_with(idx, OffsetMarker::unset);
        }
        self.entries.insert(idx, OffsetMarker::new(table));
    }

    /// Remove the entry at `idx`, returning its subtable if it was set.
    pub fn remove(&mut self, idx: usize) -> Option<T> {
        if idx >= self.entries.len() {
            return None;
        }
        self.provenance.clear();
        self.entries.remove(idx).into_inner()
    }

    pub fn push(&mut self, table: T) {
        self.provenance.clear();
        self.entries.push(OffsetMarker::new(table));
    }

    /// Iterate over every entry, including unset ones.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.entries.iter().map(OffsetMarker::get)
    }
}

impl<T> FromIterator<T> for OffsetRecordTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OffsetRecordTable {
            entries: iter.into_iter().map(OffsetMarker::new).collect(),
            provenance: Provenance::default(),
        }
    }
}

impl<T> From<Vec<T>> for OffsetRecordTable<T> {
    fn from(src: Vec<T>) -> Self {
        src.into_iter().collect()
    }
}

impl<T: FontWrite> FontWrite for OffsetRecordTable<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        // validation ensures the count fits
        (self.entries.len() as u16).write_into(writer);
        self.entries.write_into(writer);
    }

    fn canonical_bytes(&self) -> Option<&[u8]> {
        self.provenance.bytes()
    }
}

impl<T: Validate> Validate for OffsetRecordTable<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        if self.entries.len() > u16::MAX as usize {
            ctx.report(
                ErrorKind::TooManyItems,
                format!("{} offsets do not fit in a u16 count", self.entries.len()),
            );
        }
        self.entries.validate_impl(ctx);
    }
}

/// A standalone table, with its count at the start of the data.
impl<T: FromData> FromData for OffsetRecordTable<T> {
    type Read<'a> = read::OffsetRecordTable<'a, T::Read<'a>>;

    fn from_data<'a>(data: FontData<'a>, source: Option<&Arc<[u8]>>) -> Result<Self, ReadError> {
        let table = read::OffsetRecordTable::<'a, T::Read<'a>>::read(data)?;
        let mut out = Self::from_read(&table, source)?;
        out.provenance = Provenance::capture(source, data, &table)?;
        Ok(out)
    }
}
