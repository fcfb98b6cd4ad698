//! Offsets to subtables

/// The byte length of some offset.
///
/// This is used during compilation as a token for a pending offset whose
/// value is not yet known.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum OffsetLen {
    Offset16 = 2,
}

impl OffsetLen {
    /// The empty represntation of this offset
    pub fn null_bytes(self) -> &'static [u8] {
        match self {
            Self::Offset16 => &[0, 0],
        }
    }

    /// The largest value representable by this offset.
    pub fn max_value(self) -> u32 {
        match self {
            Self::Offset16 => u16::MAX as u32,
        }
    }
}

/// A 16-bit offset to a table.
///
/// Offsets are measured from the start of the table that contains them.
/// Specific offset fields may or may not permit NULL values; however we
/// assume that errors are possible, and expect the caller to handle
/// the `None` case.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset16(u16);

impl Offset16 {
    /// The null offset.
    pub const NULL: Offset16 = Offset16(0);

    /// Create a new offset.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Return this offset as a 32-bit unsigned integer.
    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    /// Returns this offset as a `usize`, or `None` if it is `0`.
    pub const fn non_null(self) -> Option<usize> {
        match self.0 {
            0 => None,
            other => Some(other as usize),
        }
    }

    /// `true` if this offset is zero.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Offset16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

crate::newtype_scalar!(Offset16, [u8; 2]);
