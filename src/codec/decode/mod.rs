// Decode module for GraphBinary frames

pub mod basic_types;
pub mod complex_types;

use tracing::trace;

use crate::codec::types::{Decoded, TypeCode, ValueFlag};
use crate::codec::DecodeContext;
use crate::internal::cursor::Cursor;
use crate::internal::error::{DecodeErrorKind, DecodeResult};

/// Size of the `[type_code][value_flag]` header of a fully-qualified frame.
pub const FRAME_HEADER_LEN: usize = 2;

/// Outcome of reading a fully-qualified frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// The value flag marked the value as null; no payload follows.
    Null,
    /// A payload follows, starting at the contained cursor.
    Value(Cursor<'a>),
}

/// Reads and validates the header of a fully-qualified frame of type `expected`.
/// Either way the header spans exactly [`FRAME_HEADER_LEN`] bytes.
pub fn read_frame_header<'a>(cursor: Cursor<'a>, expected: TypeCode) -> DecodeResult<Frame<'a>> {
    // 1. Type code
    let found = TypeCode::new(cursor.peek_u8()?);
    if found != expected {
        return Err(cursor.error(DecodeErrorKind::TypeCodeMismatch { expected, found }));
    }
    let cursor = cursor.advance(1)?;

    // 2. Value flag
    let flag_byte = cursor
        .peek_u8()
        .map_err(|_| cursor.error(DecodeErrorKind::ValueFlagMissing))?;
    match ValueFlag::from_byte(flag_byte) {
        Some(ValueFlag::Null) => Ok(Frame::Null),
        Some(ValueFlag::Value) => Ok(Frame::Value(cursor.advance(1)?)),
        None => Err(cursor.error(DecodeErrorKind::ValueFlagInvalid(flag_byte))),
    }
}

/// Decodes one self-describing value: peeks its type code, looks up the
/// codec registered for it and delegates the whole fully-qualified frame.
///
/// Composite codecs decode every child through this function.
pub fn read_any(cursor: Cursor<'_>, ctx: &DecodeContext<'_>) -> DecodeResult<Decoded> {
    if cursor.is_empty() {
        return Err(cursor.error(DecodeErrorKind::BufferEmpty));
    }
    let code = TypeCode::new(cursor.peek_u8()?);
    let codec = ctx
        .registry()
        .lookup(code)
        .map_err(|kind| cursor.error(kind))?;

    trace!(
        type_code = %code,
        type_name = code.well_known_name(),
        codec = codec.name(),
        offset = cursor.position(),
        depth = ctx.depth(),
        "dispatching value"
    );
    codec.read(cursor, true, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::registry::SerializerRegistry;
    use crate::codec::types::GValue;

    #[test]
    fn test_read_frame_header() {
        let data: &[u8] = &[0x0b, 0x00, 0xAA];
        match read_frame_header(Cursor::new(data), TypeCode::SET).unwrap() {
            Frame::Value(payload) => {
                assert_eq!(payload.position(), FRAME_HEADER_LEN);
                assert_eq!(payload.remaining(), &[0xAAu8]);
            }
            Frame::Null => panic!("Expected a value frame"),
        }

        let data: &[u8] = &[0x0b, 0x01];
        assert_eq!(
            read_frame_header(Cursor::new(data), TypeCode::SET).unwrap(),
            Frame::Null
        );
    }

    #[test]
    fn test_read_frame_header_errors() {
        let err = read_frame_header(Cursor::new(&[0x01, 0x00]), TypeCode::SET).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorKind::TypeCodeMismatch {
                expected: TypeCode::SET,
                found: TypeCode::INT
            }
        );
        assert_eq!(err.offset(), 0);

        let err = read_frame_header(Cursor::new(&[0x0b]), TypeCode::SET).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::ValueFlagMissing);
        assert_eq!(err.offset(), 1);

        let err = read_frame_header(Cursor::new(&[0x0b, 0x02]), TypeCode::SET).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::ValueFlagInvalid(0x02));
    }

    #[test]
    fn test_read_any_delegates() {
        let registry = SerializerRegistry::default();
        let ctx = DecodeContext::new(&registry);
        let data: &[u8] = &[0x01, 0x00, 0x00, 0x00, 0x00, 0x2A, 0xEE];
        let decoded = read_any(Cursor::new(data), &ctx).unwrap();
        assert_eq!(decoded, Decoded::new(GValue::Int(42), 6));
    }

    #[test]
    fn test_read_any_unknown_type_code() {
        let registry = SerializerRegistry::default();
        let ctx = DecodeContext::new(&registry);
        let data: &[u8] = &[0x00, 0x00, 0x00, 0x00];
        let cursor = Cursor::new(data).advance(1).unwrap();
        let err = read_any(cursor, &ctx).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::UnknownTypeCode(TypeCode::new(0x00)));
        assert_eq!(err.offset(), 1);

        // Well-known but unregistered
        let err = read_any(Cursor::new(&[0x03, 0x00]), &ctx).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::UnknownTypeCode(TypeCode::STRING));
    }

    #[test]
    fn test_read_any_empty() {
        let registry = SerializerRegistry::default();
        let ctx = DecodeContext::new(&registry);
        let err = read_any(Cursor::new(&[]), &ctx).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::BufferEmpty);
    }
}
