//! Reading fixed layouts of little-endian fields from the front of a byte slice.
//!
//! A [`Layout`] is a list of [`Field`]s. Reading a layout consumes exactly
//! [`Layout::byte_count`] bytes and hands back the decoded values together with the
//! unconsumed tail of the input, so callers can thread the remainder through the
//! next parse step without copying.

use alloc::vec::Vec;

/// A single primitive in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Little-endian unsigned integer, 1 byte
    U8,
    /// Little-endian unsigned integer, 2 bytes
    U16,
    /// Little-endian unsigned integer, 4 bytes
    U32,
    /// Little-endian unsigned integer, 8 bytes
    U64,
    /// One byte that is interpreted as a character
    Char,
    /// A block of raw bytes, handed back as a sub-slice of the input
    Bytes(usize),
}

impl Field {
    pub const fn width(&self) -> usize {
        match self {
            Field::U8 | Field::Char => 1,
            Field::U16 => 2,
            Field::U32 => 4,
            Field::U64 => 8,
            Field::Bytes(n) => *n,
        }
    }
}

/// A value produced by reading a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'s> {
    Int(u64),
    Char(u8),
    Bytes(&'s [u8]),
}

impl<'s> Value<'s> {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<u8> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'s [u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("Layout needs {need} bytes but only {got} bytes are left in the source")]
    NotEnoughBytes { need: usize, got: usize },
    #[error("Field {index} of the layout does not hold a {expected}")]
    UnexpectedField { index: usize, expected: &'static str },
}

/// An ordered list of fields that is read as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<'f>(pub &'f [Field]);

/// Three little-endian u32s. Both headers of the container use this shape.
pub const HEADER: Layout<'static> = Layout(&[Field::U32, Field::U32, Field::U32]);
/// The frequency that precedes every table record.
pub const FREQUENCY: Layout<'static> = Layout(&[Field::U32]);
/// A table record: the symbol and three bytes of padding.
pub const SYMBOL_RECORD: Layout<'static> = Layout(&[Field::Char, Field::Bytes(3)]);

impl Layout<'_> {
    pub fn byte_count(&self) -> usize {
        self.0.iter().map(Field::width).sum()
    }

    /// Decode the layout from the front of `source`.
    ///
    /// Returns the values in declaration order and the part of `source` that
    /// follows the layout.
    pub fn read<'s>(&self, source: &'s [u8]) -> Result<(Values<'s>, &'s [u8]), LayoutError> {
        let need = self.byte_count();
        if source.len() < need {
            return Err(LayoutError::NotEnoughBytes {
                need,
                got: source.len(),
            });
        }
        let (mut raw, rest) = source.split_at(need);

        let mut values = Vec::with_capacity(self.0.len());
        for field in self.0 {
            let (bytes, tail) = raw.split_at(field.width());
            raw = tail;
            values.push(match field {
                Field::Char => Value::Char(bytes[0]),
                Field::Bytes(_) => Value::Bytes(bytes),
                _ => Value::Int(read_little_endian(bytes)),
            });
        }

        Ok((Values(values), rest))
    }
}

fn read_little_endian(raw: &[u8]) -> u64 {
    let mut val = 0;
    for (idx, x) in raw.iter().enumerate() {
        val |= u64::from(*x) << (8 * idx);
    }
    val
}

/// The decoded values of one layout read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values<'s>(Vec<Value<'s>>);

impl<'s> Values<'s> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value<'s>> {
        self.0.get(index)
    }

    pub fn int(&self, index: usize) -> Result<u64, LayoutError> {
        self.0
            .get(index)
            .and_then(Value::as_int)
            .ok_or(LayoutError::UnexpectedField {
                index,
                expected: "integer",
            })
    }

    /// Like [`Values::int`], for fields declared as [`Field::U32`] or narrower.
    pub fn u32(&self, index: usize) -> Result<u32, LayoutError> {
        let v = self.int(index)?;
        u32::try_from(v).map_err(|_| LayoutError::UnexpectedField {
            index,
            expected: "32 bit integer",
        })
    }

    pub fn char(&self, index: usize) -> Result<u8, LayoutError> {
        self.0
            .get(index)
            .and_then(Value::as_char)
            .ok_or(LayoutError::UnexpectedField {
                index,
                expected: "character",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_mixed_fields_and_returns_rest() {
        let source = [
            0x01, 0x02, 0x03, 0x04, // u32
            0xAA, 0xBB, // u16
            b'x', // char
            0x10, 0x20, // bytes
            0xFF, 0xEE, // rest
        ];
        let layout = Layout(&[Field::U32, Field::U16, Field::Char, Field::Bytes(2)]);
        assert_eq!(layout.byte_count(), 9);

        let (values, rest) = layout.read(&source).unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values.int(0).unwrap(), 0x0403_0201);
        assert_eq!(values.int(1).unwrap(), 0xBBAA);
        assert_eq!(values.char(2).unwrap(), b'x');
        assert_eq!(values.get(3), Some(&Value::Bytes(&[0x10, 0x20])));
        assert_eq!(rest, &[0xFF, 0xEE]);
    }

    #[test]
    fn u64_is_little_endian() {
        let source = 0x0123_4567_89AB_CDEFu64.to_le_bytes();
        let (values, rest) = Layout(&[Field::U64]).read(&source).unwrap();
        assert_eq!(values.int(0).unwrap(), 0x0123_4567_89AB_CDEF);
        assert!(rest.is_empty());
    }

    #[test]
    fn short_source_is_an_error() {
        let err = HEADER.read(&[0u8; 11]).unwrap_err();
        assert_eq!(err, LayoutError::NotEnoughBytes { need: 12, got: 11 });
    }

    #[test]
    fn wrong_accessor_is_an_error() {
        let (values, _) = SYMBOL_RECORD.read(b"a\0\0\0").unwrap();
        assert_eq!(values.char(0).unwrap(), b'a');
        assert!(matches!(
            values.int(0),
            Err(LayoutError::UnexpectedField { index: 0, .. })
        ));
        assert!(values.char(5).is_err());
    }

    #[test]
    fn empty_layout_consumes_nothing() {
        let (values, rest) = Layout(&[]).read(&[1, 2, 3]).unwrap();
        assert!(values.is_empty());
        assert_eq!(rest, &[1, 2, 3]);
    }
}
