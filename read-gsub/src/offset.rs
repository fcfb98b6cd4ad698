//! Handling offsets

use types::Offset16;

use crate::{font_data::FontData, read::FontRead, ReadError};

/// A helper trait providing a 'resolve' method for offset types
pub trait ResolveOffset {
    /// Read the table this offset points to.
    ///
    /// The offset is relative to the start of `data`, which should be the
    /// table that contains the offset.
    fn resolve<'a, T: FontRead<'a>>(&self, data: FontData<'a>) -> Result<T, ReadError> {
        self.resolve_data(data).and_then(T::read)
    }

    /// Return the data this offset points to, without interpreting it.
    fn resolve_data<'a>(&self, data: FontData<'a>) -> Result<FontData<'a>, ReadError>;
}

impl ResolveOffset for Offset16 {
    fn resolve_data<'a>(&self, data: FontData<'a>) -> Result<FontData<'a>, ReadError> {
        let offset = self.non_null().ok_or(ReadError::NullOffset)?;
        // an offset equal to the length would point at an empty table, which
        // can never be well formed.
        if offset >= data.len() {
            return Err(ReadError::MalformedOffset);
        }
        data.split_off(offset).ok_or(ReadError::MalformedOffset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Word(u16);

    impl FontRead<'_> for Word {
        fn read(data: FontData<'_>) -> Result<Self, ReadError> {
            data.read_at(0).map(Word)
        }
    }

    #[test]
    fn resolve_checks_offset() {
        let data = FontData::new(&[0, 0, 0xab, 0xcd]);
        let word: Word = Offset16::new(2).resolve(data).unwrap();
        assert_eq!(word.0, 0xabcd);
        assert_eq!(Offset16::new(2).resolve_data(data).unwrap().position(), 2);
        assert_eq!(
            Offset16::NULL.resolve::<Word>(data).err(),
            Some(ReadError::NullOffset)
        );
        assert_eq!(
            Offset16::new(4).resolve::<Word>(data).err(),
            Some(ReadError::MalformedOffset)
        );
        // in bounds, but the child itself is truncated
        assert_eq!(
            Offset16::new(3).resolve::<Word>(data).err(),
            Some(ReadError::OutOfBounds)
        );
    }
}
