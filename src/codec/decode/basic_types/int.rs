use std::mem;

use crate::codec::decode::{read_frame_header, Frame, FRAME_HEADER_LEN};
use crate::codec::types::{Decoded, GValue, TypeCode};
use crate::codec::{Codec, DecodeContext};
use crate::internal::cursor::Cursor;
use crate::internal::error::{DecodeErrorKind, DecodeResult};

/// Width of an Int payload on the wire.
pub const INT_WIDTH: usize = mem::size_of::<i32>();

/// Codec for 32-bit big-endian signed integers. Also reads the value-only
/// length prefixes of composite values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntCodec {
    id: TypeCode,
}

impl IntCodec {
    pub const fn new(id: TypeCode) -> Self {
        IntCodec { id }
    }

    /// Reads a value-only Int: exactly [`INT_WIDTH`] bytes, no framing.
    pub fn read_value(&self, cursor: Cursor<'_>) -> DecodeResult<Decoded<i32>> {
        let value = cursor.peek_i32_be()?;
        Ok(Decoded::new(value, INT_WIDTH))
    }
}

impl Codec for IntCodec {
    fn type_code(&self) -> TypeCode {
        self.id
    }

    fn name(&self) -> &'static str {
        "IntCodec"
    }

    fn can_be_used_for(&self, value: &GValue) -> bool {
        matches!(value, GValue::Int(_))
    }

    fn read(
        &self,
        cursor: Cursor<'_>,
        fully_qualified: bool,
        _ctx: &DecodeContext<'_>,
    ) -> DecodeResult<Decoded> {
        if cursor.is_empty() {
            return Err(cursor.error(DecodeErrorKind::BufferEmpty));
        }

        let mut len = 0;
        let mut cursor = cursor;
        if fully_qualified {
            match read_frame_header(cursor, self.id)? {
                Frame::Null => return Ok(Decoded::new(GValue::Null, FRAME_HEADER_LEN)),
                Frame::Value(payload) => {
                    cursor = payload;
                    len += FRAME_HEADER_LEN;
                }
            }
        }

        let value = self.read_value(cursor)?;
        Ok(Decoded::new(GValue::Int(value.value), len + value.len))
    }
}
