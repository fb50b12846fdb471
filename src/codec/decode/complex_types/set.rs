// Decoding logic for the Set type.
//
// Wire layout:
//   [type_code:1][value_flag:1]      fully-qualified only
//   [length:i32 BE, value-only]
//   [element_0]...[element_{length-1}]   each a fully-qualified frame

use std::collections::BTreeSet;

use crate::codec::decode::{read_any, read_frame_header, Frame, FRAME_HEADER_LEN};
use crate::codec::types::{Decoded, GValue, TypeCode};
use crate::codec::{Codec, DecodeContext};
use crate::internal::cursor::Cursor;
use crate::internal::error::{DecodeErrorKind, DecodeResult, PathSegment};

/// Codec for sets of arbitrary values.
///
/// Elements equal by value collapse into one member, so the decoded set may
/// hold fewer members than the wire length announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCodec {
    id: TypeCode,
}

impl SetCodec {
    pub const fn new(id: TypeCode) -> Self {
        SetCodec { id }
    }
}

impl Codec for SetCodec {
    fn type_code(&self) -> TypeCode {
        self.id
    }

    fn name(&self) -> &'static str {
        "SetCodec"
    }

    fn can_be_used_for(&self, value: &GValue) -> bool {
        matches!(value, GValue::Set(_))
    }

    fn read(
        &self,
        cursor: Cursor<'_>,
        fully_qualified: bool,
        ctx: &DecodeContext<'_>,
    ) -> DecodeResult<Decoded> {
        if cursor.is_empty() {
            return Err(cursor.error(DecodeErrorKind::BufferEmpty));
        }
        let start = cursor;
        let mut len = 0;
        let mut cursor = cursor;

        // 1. Type code and value flag
        if fully_qualified {
            match read_frame_header(cursor, self.id)? {
                Frame::Null => return Ok(Decoded::new(GValue::Null, FRAME_HEADER_LEN)),
                Frame::Value(payload) => {
                    cursor = payload;
                    len += FRAME_HEADER_LEN;
                }
            }
        }
        // Null frames have no children and do not count towards the depth
        let ctx = ctx.nested(&start)?;

        // 2. Length, value-only
        let length = ctx
            .registry()
            .int()
            .read_value(cursor)
            .map_err(|e| e.within(PathSegment::Field("length")))?;
        if length.value < 0 {
            return Err(cursor
                .error(DecodeErrorKind::LengthNegative(length.value))
                .within(PathSegment::Field("length")));
        }
        len += length.len;
        cursor = cursor.advance(length.len)?;

        // 3. Elements, each self-describing
        let mut members = BTreeSet::new();
        for i in 0..length.value as usize {
            let item = read_any(cursor, &ctx).map_err(|e| e.within(PathSegment::Item(i)))?;
            len += item.len;
            cursor = cursor.advance(item.len)?;
            members.insert(item.value);
        }

        Ok(Decoded::new(GValue::Set(members), len))
    }
}
