//! Property-based tests using proptest
//!
//! Consumed-length accounting and deterministic re-decoding over randomly
//! generated sets and random byte noise.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use bytes::{BufMut, BytesMut};
use gremlin_graphbinary::{GValue, SerializerRegistry, TypeCode};
use proptest::prelude::*;

fn encode_int_set(buf: &mut BytesMut, fully_qualified: bool, values: &[i32]) {
    if fully_qualified {
        buf.put_u8(TypeCode::SET.as_u8());
        buf.put_u8(0x00);
    }
    buf.put_i32(values.len() as i32);
    for v in values {
        buf.put_u8(TypeCode::INT.as_u8());
        buf.put_u8(0x00);
        buf.put_i32(*v);
    }
}

// Property: consumed length is header + length field + sum of element spans
proptest! {
    #[test]
    fn prop_set_consumed_length(
        values in prop::collection::vec(any::<i32>(), 0..200),
        fully_qualified in any::<bool>(),
        trailing in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        let mut buf = BytesMut::new();
        encode_int_set(&mut buf, fully_qualified, &values);
        buf.put_slice(&trailing);

        let decoded = SerializerRegistry::global()
            .deserialize_with(TypeCode::SET, Some(&buf[..]), fully_qualified)
            .expect("well-formed set should decode");

        let header = if fully_qualified { 2 } else { 0 };
        prop_assert_eq!(decoded.len, header + 4 + 6 * values.len());

        let expected: GValue = values.iter().copied().map(GValue::Int).collect();
        prop_assert_eq!(decoded.value, expected);
    }
}

// Property: decoding arbitrary bytes never panics and is deterministic
proptest! {
    #[test]
    fn prop_decode_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let registry = SerializerRegistry::global();
        let first = registry.decode(&data);
        let second = registry.decode(&data);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert!(a.len <= data.len());
                prop_assert_eq!(a, b);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.decode_error(), b.decode_error()),
            _ => prop_assert!(false, "decode results diverged"),
        }
    }
}

// Property: cutting a well-formed set short always fails
proptest! {
    #[test]
    fn prop_truncated_set_fails(
        values in prop::collection::vec(any::<i32>(), 1..50),
        cut in 1usize..6,
    ) {
        let mut buf = BytesMut::new();
        encode_int_set(&mut buf, true, &values);
        let truncated = &buf[..buf.len() - cut];

        let result = SerializerRegistry::global().decode(truncated);
        prop_assert!(result.is_err());
    }
}
