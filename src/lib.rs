//! GraphBinary deserialization for Gremlin traversal results.
//!
//! A [`SerializerRegistry`] maps one-byte type codes to codecs. Decoding a
//! buffer peeks its type code, delegates to the registered codec, and
//! composite codecs such as Set decode their elements the same way.
//! Every decode returns the value together with the exact number of bytes
//! it consumed.
//!
//! ```rust
//! use gremlin_graphbinary::{GValue, SerializerRegistry};
//!
//! // Set{1, 2}
//! let buffer = [
//!     0x0b, 0x00, 0x00, 0x00, 0x00, 0x02,
//!     0x01, 0x00, 0x00, 0x00, 0x00, 0x01,
//!     0x01, 0x00, 0x00, 0x00, 0x00, 0x02,
//! ];
//! let decoded = SerializerRegistry::global().decode(&buffer).unwrap();
//! assert_eq!(decoded.len, buffer.len());
//! assert_eq!(decoded.value, [GValue::Int(1), GValue::Int(2)].into_iter().collect::<GValue>());
//! ```

pub mod codec;
pub mod config;
pub mod internal;

pub use codec::registry::{RegistryBuilder, SerializerRegistry};
pub use codec::types::{Decoded, GValue, TypeCode, ValueFlag};
pub use codec::{Codec, DecodeContext};
pub use config::DecoderConfig;
pub use internal::cursor::Cursor;
pub use internal::diagnostic::Diagnostic;
pub use internal::error::{DecodeError, DecodeErrorKind, Error, PathSegment, Result};
