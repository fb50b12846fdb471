use byteorder::{BigEndian, ByteOrder};

use crate::internal::error::{DecodeError, DecodeErrorKind, DecodeResult};

/// A read window over one immutable byte slice.
///
/// Advancing produces a new view; the underlying bytes are never copied or
/// mutated. `position` is always relative to the start of the slice the
/// cursor was created over, so errors can report absolute offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Cursor { buf, pos: 0 }
    }

    /// Number of bytes remaining in the view.
    pub fn len(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute offset of the view's first byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> DecodeResult<u8> {
        Ok(self.require(1)?[0])
    }

    /// Returns the next four bytes as a big-endian `i32` without consuming them.
    pub fn peek_i32_be(&self) -> DecodeResult<i32> {
        Ok(BigEndian::read_i32(self.require(4)?))
    }

    /// Returns a view starting `n` bytes later.
    pub fn advance(self, n: usize) -> DecodeResult<Cursor<'a>> {
        self.require(n)?;
        Ok(Cursor {
            buf: self.buf,
            pos: self.pos + n,
        })
    }

    /// Builds an error located at this cursor's position.
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.pos)
    }

    fn require(&self, needed: usize) -> DecodeResult<&'a [u8]> {
        let remaining = self.remaining();
        if remaining.len() < needed {
            return Err(self.error(DecodeErrorKind::Truncated {
                needed,
                remaining: remaining.len(),
            }));
        }
        Ok(&remaining[..needed])
    }
}
