use crate::errors::DecodeError;
use std::marker::PhantomData;

/// A type whose binary representation has a fixed size.
pub(crate) trait Layout {
    const SIZE: u32;
}

/// A fixed-size value that can be decoded from the start of a byte slice.
///
/// Implementors are often marker types that only select a byte order,
/// so the decoded value is an associated type.
pub(crate) trait ReadFromBytes: Layout {
    type Value;

    fn read_from(bytes: &[u8]) -> Result<Self::Value, DecodeError>;
}

/// The position of some piece of data within a buffer,
/// in bytes from the start of the buffer.
///
/// The type parameter indicates what data is expected to be found there.
pub(crate) struct Position<T> {
    byte_position: u32,
    ty: PhantomData<T>,
}

/// The position and length of a consecutive sequence of homogeneous data in a buffer.
/// This is similar to `&[T]` in the same way that `Position<T>` is similar to `&T`.
pub(crate) struct Slice<T> {
    start: Position<T>,
    count: u32,
}

/// An iterator for `Slice<T>`.
pub(crate) struct SliceIter<T> {
    start: Position<T>,
    end: Position<T>,
}

/// A read position that advances through a buffer,
/// for data whose layout is only known while reading it.
#[derive(Clone)]
pub(crate) struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: Position<()>,
}

impl<T> Position<T> {
    pub(crate) fn initial() -> Self {
        Self::at(0)
    }

    pub(crate) fn at(byte_position: u32) -> Self {
        Position {
            byte_position,
            ty: PhantomData,
        }
    }

    pub(crate) fn byte_position(self) -> u32 {
        self.byte_position
    }

    pub(crate) fn cast<U>(self) -> Position<U> {
        Position::at(self.byte_position)
    }

    /// Positions saturate rather than wrap:
    /// an overflowing offset is past the end of any buffer and fails when read.
    pub(crate) fn offset_bytes<U>(self, by: u32) -> Position<U> {
        Position::at(self.byte_position.saturating_add(by))
    }

    /// The position of the `index`-th `T` in an array starting here.
    pub(crate) fn offset(self, index: u32) -> Self
    where
        T: Layout,
    {
        self.offset_bytes(T::SIZE.saturating_mul(index))
    }

    pub(crate) fn followed_by<U>(self) -> Position<U>
    where
        T: Layout,
    {
        self.offset_bytes(T::SIZE)
    }

    pub(crate) fn read_from(self, bytes: &[u8]) -> Result<T::Value, DecodeError>
    where
        T: ReadFromBytes,
    {
        T::read_from(
            bytes
                .get(self.byte_position as usize..)
                .ok_or(DecodeError::BufferTruncated)?,
        )
    }
}

impl Slice<u8> {
    pub(crate) fn read_from<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8], DecodeError> {
        bytes
            .get(self.start.byte_position as usize..)
            .and_then(|bytes| bytes.get(..self.count as usize))
            .ok_or(DecodeError::BufferTruncated)
    }
}

impl<T> Slice<T> {
    pub(crate) fn new<C: Into<u32>>(start: Position<T>, count: C) -> Self {
        Slice {
            start,
            count: count.into(),
        }
    }

    pub(crate) fn empty() -> Self {
        Slice::new(Position::initial(), 0_u32)
    }

    pub(crate) fn start(&self) -> Position<T> {
        self.start
    }

    pub(crate) fn followed_by<U>(&self) -> Position<U>
    where
        T: Layout,
    {
        self.start.offset(self.count).cast()
    }

    /// This is not an `unsafe fn` because invalid `Position`s are safe,
    /// they only return an error when reading.
    pub(crate) fn get_unchecked(&self, index: u32) -> Position<T>
    where
        T: Layout,
    {
        self.start.offset(index)
    }
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, Position::<()>::initial())
    }

    pub(crate) fn at<T>(bytes: &'a [u8], position: Position<T>) -> Self {
        ByteCursor {
            bytes,
            position: position.cast(),
        }
    }

    pub(crate) fn position<T>(&self) -> Position<T> {
        self.position.cast()
    }

    pub(crate) fn read<T: ReadFromBytes>(&mut self) -> Result<T::Value, DecodeError> {
        let position = self.position.cast::<T>();
        let value = position.read_from(self.bytes)?;
        self.position = position.followed_by();
        Ok(value)
    }

    pub(crate) fn skip(&mut self, length: u64) -> Result<(), DecodeError> {
        let end = u64::from(self.position.byte_position) + length;
        if end > self.bytes.len() as u64 {
            return Err(DecodeError::BufferTruncated);
        }
        self.position = Position::at(u32::try_from(end).map_err(|_| DecodeError::BufferTruncated)?);
        Ok(())
    }

    /// Read a variable-length unsigned integer:
    /// 7 data bits per byte, least significant group first,
    /// with the high bit set on every byte but the last.
    pub(crate) fn read_var_uint(&mut self) -> Result<u32, DecodeError> {
        const MAX_BYTES: u32 = 5;
        let mut result: u32 = 0;
        for count in 0..MAX_BYTES {
            let byte = self.read::<u8>()?;
            let bits = u32::from(byte & 0x7F);
            if count == MAX_BYTES - 1 && bits > 0x0F {
                // More than 32 bits
                return Err(DecodeError::MalformedHeader);
            }
            result |= bits << (7 * count);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(DecodeError::MalformedHeader)
    }
}

// ~~~~ Boring trait impls ~~~~

impl<T> Copy for Position<T> {}

impl<T> Clone for Position<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Position<T> {
    fn eq(&self, other: &Self) -> bool {
        self.byte_position == other.byte_position
    }
}

impl<T> Eq for Position<T> {}

impl<T> std::fmt::Debug for Position<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({:#x})", self.byte_position)
    }
}

impl<T> Copy for Slice<T> {}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Slice<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.count == other.count
    }
}

impl<T> Eq for Slice<T> {}

impl<T> std::fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slice({:#x}, {})", self.start.byte_position, self.count)
    }
}

impl<T> Clone for SliceIter<T> {
    fn clone(&self) -> Self {
        SliceIter {
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: Layout> IntoIterator for Slice<T> {
    type Item = Position<T>;
    type IntoIter = SliceIter<T>;

    fn into_iter(self) -> SliceIter<T> {
        SliceIter {
            start: self.start,
            end: self.followed_by(),
        }
    }
}

impl<T: Layout> Iterator for SliceIter<T> {
    type Item = Position<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start.byte_position < self.end.byte_position {
            let next = self.start;
            self.start = next.followed_by();
            Some(next)
        } else {
            None
        }
    }
}
