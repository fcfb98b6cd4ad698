//! Remembering where a table was loaded from

use std::{ops::Range, sync::Arc};

use read::{FontData, MinByteRange, ReadError};

/// The original bytes of a table loaded in canonical mode.
///
/// All the tables loaded from one buffer share a single allocation; each
/// knows the range it occupies within it. The range runs from the start of
/// the table to the end of the furthest byte reachable from it, so it
/// includes every subtable. The table at the root of the buffer covers the
/// whole buffer.
#[derive(Clone)]
pub struct CanonicalBytes {
    source: Arc<[u8]>,
    range: Range<usize>,
}

impl CanonicalBytes {
    /// The bytes of this table and its subtables.
    pub fn bytes(&self) -> &[u8] {
        // checked on construction
        &self.source[self.range.clone()]
    }

    /// The position of these bytes in the buffer they were loaded from.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// The whole buffer these bytes were loaded from.
    pub fn source(&self) -> &Arc<[u8]> {
        &self.source
    }
}

impl std::fmt::Debug for CanonicalBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CanonicalBytes({}..{})", self.range.start, self.range.end)
    }
}

/// Where a table came from.
///
/// This is either nothing (a table built from scratch, fully loaded, or
/// modified since it was loaded) or the [`CanonicalBytes`] it was loaded
/// from.
///
/// Provenance never affects equality: two tables with the same contents are
/// equal wherever they came from.
#[derive(Clone, Default)]
pub struct Provenance(Option<CanonicalBytes>);

impl Provenance {
    /// Record the extent of `table`, if we are loading in canonical mode.
    ///
    /// `data` must be the data `table` was read from, and must be a view into
    /// `source`.
    pub(crate) fn capture(
        source: Option<&Arc<[u8]>>,
        data: FontData,
        table: &impl MinByteRange,
    ) -> Result<Self, ReadError> {
        let Some(source) = source else {
            return Ok(Provenance(None));
        };
        let start = data.position();
        // the root of a canonical load owns the whole buffer, including any
        // bytes past its last subtable
        let len = if start == 0 && data.len() == source.len() {
            source.len()
        } else {
            table.subtree_len()?
        };
        let range = start..start + len;
        let same_bytes = match (source.get(range.clone()), data.as_bytes().get(..len)) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        };
        if !same_bytes {
            return Err(ReadError::MalformedData(
                "table data is not a view of the canonical source",
            ));
        }
        Ok(Provenance(Some(CanonicalBytes {
            source: source.clone(),
            range,
        })))
    }

    /// The remembered bytes, if the table is unmodified since loading.
    pub fn bytes(&self) -> Option<&[u8]> {
        self.0.as_ref().map(CanonicalBytes::bytes)
    }

    /// The remembered bytes and their location, if any.
    pub fn canonical(&self) -> Option<&CanonicalBytes> {
        self.0.as_ref()
    }

    /// `true` if this table will be written from its original bytes.
    pub fn is_canonical(&self) -> bool {
        self.0.is_some()
    }

    /// Forget the original bytes; called whenever the table is modified.
    pub fn clear(&mut self) {
        if let Some(prev) = self.0.take() {
            log::trace!("dropping canonical bytes {prev:?}");
        }
    }
}

impl PartialEq for Provenance {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Provenance {}

impl std::fmt::Debug for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(bytes) => bytes.fmt(f),
            None => f.write_str("Modified"),
        }
    }
}
