//! compile-time representations of offsets

use types::OffsetLen;

use crate::{
    validate::{ErrorKind, Validate, ValidationCtx},
    write::{FontWrite, TableWriter},
};

/// An offset subtable.
///
/// An offset whose target was never set is written as null, but fails
/// validation: none of the offsets in these subtables are nullable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetMarker<T> {
    obj: Option<T>,
}

impl<T> OffsetMarker<T> {
    /// Create a new marker.
    pub fn new(obj: T) -> Self {
        OffsetMarker { obj: Some(obj) }
    }

    /// A marker with no target.
    pub fn unset() -> Self {
        OffsetMarker { obj: None }
    }

    /// `true` if the offset has a target
    pub fn is_some(&self) -> bool {
        self.obj.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.obj.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.obj.as_mut()
    }

    pub fn set(&mut self, obj: T) {
        self.obj = Some(obj);
    }

    pub fn clear(&mut self) {
        self.obj = None;
    }

    pub fn into_inner(self) -> Option<T> {
        self.obj
    }
}

impl<T> From<T> for OffsetMarker<T> {
    fn from(obj: T) -> Self {
        OffsetMarker::new(obj)
    }
}

impl<T: FontWrite> FontWrite for OffsetMarker<T> {
    fn write_into(&self, writer: &mut TableWriter) {
        match self.obj.as_ref() {
            Some(obj) => writer.write_offset(obj, OffsetLen::Offset16),
            None => {
                log::warn!("unexpected null OffsetMarker");
                writer.write_null_offset(OffsetLen::Offset16);
            }
        }
    }
}

impl<T: Validate> Validate for OffsetMarker<T> {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        match self.obj.as_ref() {
            Some(obj) => obj.validate_impl(ctx),
            None => ctx.report(ErrorKind::IncompleteTable, "offset target was never set"),
        }
    }
}
