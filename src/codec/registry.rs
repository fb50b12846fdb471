//! # Serializer Registry
//!
//! Maps each one-byte [`TypeCode`] to the codec that decodes it. A registry is
//! assembled once through [`RegistryBuilder`] and is read-only afterwards, so
//! it can be shared freely between threads decoding independent buffers.
//!
//! ```rust
//! use gremlin_graphbinary::codec::registry::SerializerRegistry;
//! use gremlin_graphbinary::codec::types::GValue;
//!
//! let registry = SerializerRegistry::default();
//! let decoded = registry.decode(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x05]).unwrap();
//! assert_eq!(decoded.value, GValue::Int(5));
//! assert_eq!(decoded.len, 6);
//! ```

use std::fmt;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::codec::decode::basic_types::int::IntCodec;
use crate::codec::decode::complex_types::set::SetCodec;
use crate::codec::decode::read_any;
use crate::codec::types::{Decoded, GValue, TypeCode};
use crate::codec::{Codec, DecodeContext};
use crate::config::DecoderConfig;
use crate::internal::cursor::Cursor;
use crate::internal::diagnostic::boundary_error;
use crate::internal::error::{DecodeError, DecodeErrorKind, Result};

/// Codec name reported when a failure happens before any codec was resolved.
pub const ANY_CODEC_NAME: &str = "AnyCodec";

const TABLE_SIZE: usize = u8::MAX as usize + 1;

type CodecTable = [Option<Box<dyn Codec>>; TABLE_SIZE];

/// Immutable dispatch table from type code to codec.
pub struct SerializerRegistry {
    table: CodecTable,
    int: IntCodec,
    config: DecoderConfig,
}

impl SerializerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Process-wide registry with the default codecs and configuration.
    pub fn global() -> &'static SerializerRegistry {
        static GLOBAL: OnceLock<SerializerRegistry> = OnceLock::new();
        GLOBAL.get_or_init(SerializerRegistry::default)
    }

    /// Returns the codec registered for `code`.
    pub fn lookup(&self, code: TypeCode) -> std::result::Result<&dyn Codec, DecodeErrorKind> {
        self.table[usize::from(code.as_u8())]
            .as_deref()
            .ok_or(DecodeErrorKind::UnknownTypeCode(code))
    }

    /// The integer codec used for value-only length prefixes.
    pub fn int(&self) -> &IntCodec {
        &self.int
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Registered codes in ascending order.
    pub fn type_codes(&self) -> impl Iterator<Item = TypeCode> + '_ {
        self.table
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(byte, _)| TypeCode::new(byte as u8))
    }

    /// First registered codec able to encode `value`.
    pub fn codec_for(&self, value: &GValue) -> Option<&dyn Codec> {
        self.table
            .iter()
            .flatten()
            .map(|codec| codec.as_ref())
            .find(|codec| codec.can_be_used_for(value))
    }

    /// Decodes one self-describing value from the start of `buffer`.
    ///
    /// Returns the value and the number of bytes it occupied; bytes after
    /// the value are left untouched.
    pub fn decode(&self, buffer: &[u8]) -> Result<Decoded> {
        let ctx = DecodeContext::new(self);
        read_any(Cursor::new(buffer), &ctx).map_err(|cause| {
            let code = buffer.first().copied().map(TypeCode::new);
            let name = code
                .and_then(|code| self.lookup(code).ok())
                .map_or(ANY_CODEC_NAME, |codec| codec.name());
            self.wrap(name, code, true, buffer, cause)
        })
    }

    /// Decodes a value of the type registered under `code`.
    ///
    /// `buffer` of `None` reports a missing buffer. In value-only mode
    /// (`fully_qualified == false`) the buffer holds just the payload.
    pub fn deserialize_with(
        &self,
        code: TypeCode,
        buffer: Option<&[u8]>,
        fully_qualified: bool,
    ) -> Result<Decoded> {
        let input = buffer.unwrap_or_default();
        let codec = self.lookup(code).map_err(|kind| {
            self.wrap(ANY_CODEC_NAME, Some(code), fully_qualified, input, DecodeError::new(kind, 0))
        })?;

        let Some(buffer) = buffer else {
            let cause = DecodeError::new(DecodeErrorKind::BufferMissing, 0);
            return Err(self.wrap(codec.name(), Some(code), fully_qualified, input, cause));
        };

        let ctx = DecodeContext::new(self);
        codec
            .read(Cursor::new(buffer), fully_qualified, &ctx)
            .map_err(|cause| self.wrap(codec.name(), Some(code), fully_qualified, buffer, cause))
    }

    fn wrap(
        &self,
        codec: &'static str,
        code: Option<TypeCode>,
        fully_qualified: bool,
        input: &[u8],
        cause: DecodeError,
    ) -> crate::internal::error::Error {
        boundary_error(
            codec,
            code,
            fully_qualified,
            input,
            cause,
            self.config.residual_preview_bytes,
        )
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        SerializerRegistry::builder().with_default_codecs().build()
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializerRegistry")
            .field("type_codes", &self.type_codes().collect::<Vec<_>>())
            .field("int", &self.int)
            .field("config", &self.config)
            .finish()
    }
}

/// Assembles a [`SerializerRegistry`]. The last registration for a code wins.
#[derive(Debug)]
pub struct RegistryBuilder {
    table: CodecTable,
    int: IntCodec,
    config: DecoderConfig,
}

impl RegistryBuilder {
    fn new() -> Self {
        RegistryBuilder {
            table: std::array::from_fn(|_| None),
            int: IntCodec::new(TypeCode::INT),
            config: DecoderConfig::default(),
        }
    }

    /// Sets the decode limits, rejecting an invalid configuration.
    pub fn config(mut self, config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Registers `codec` under its own type code.
    pub fn register<C: Codec + 'static>(mut self, codec: C) -> Self {
        let code = codec.type_code();
        let name = codec.name();
        let slot = &mut self.table[usize::from(code.as_u8())];
        if let Some(previous) = slot.replace(Box::new(codec)) {
            warn!(type_code = %code, previous = previous.name(), codec = name, "Replacing registered codec");
        } else {
            debug!(type_code = %code, codec = name, "Registered codec");
        }
        self
    }

    /// Int at `0x01` and Set at `0x0b`.
    pub fn with_default_codecs(self) -> Self {
        self.int_codec(IntCodec::new(TypeCode::INT))
            .register(SetCodec::new(TypeCode::SET))
    }

    /// Registers `codec` and uses it for composite length prefixes.
    pub fn int_codec(mut self, codec: IntCodec) -> Self {
        self.int = codec;
        self.register(codec)
    }

    pub fn build(self) -> SerializerRegistry {
        let registry = SerializerRegistry {
            table: self.table,
            int: self.int,
            config: self.config,
        };
        debug!(
            codecs = registry.type_codes().count(),
            max_nesting_depth = registry.config.max_nesting_depth,
            "Built serializer registry"
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registrations() {
        let registry = SerializerRegistry::default();
        assert_eq!(
            registry.type_codes().collect::<Vec<_>>(),
            vec![TypeCode::INT, TypeCode::SET]
        );
        assert_eq!(registry.lookup(TypeCode::INT).unwrap().name(), "IntCodec");
        assert_eq!(registry.lookup(TypeCode::SET).unwrap().name(), "SetCodec");
        assert_eq!(registry.int().type_code(), TypeCode::INT);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = SerializerRegistry::default();
        for byte in [0x00, 0x02, 0x03, 0xfe, 0xff] {
            let code = TypeCode::new(byte);
            assert_eq!(
                registry.lookup(code).unwrap_err(),
                DecodeErrorKind::UnknownTypeCode(code)
            );
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = SerializerRegistry::builder()
            .register(IntCodec::new(TypeCode::new(0x20)))
            .register(SetCodec::new(TypeCode::new(0x20)))
            .build();
        assert_eq!(registry.lookup(TypeCode::new(0x20)).unwrap().name(), "SetCodec");
        assert_eq!(registry.type_codes().count(), 1);
    }

    #[test]
    fn test_custom_codes() {
        let registry = SerializerRegistry::builder()
            .int_codec(IntCodec::new(TypeCode::new(0x41)))
            .register(SetCodec::new(TypeCode::new(0x42)))
            .build();
        let decoded = registry
            .decode(&[0x42, 0x00, 0x00, 0x00, 0x00, 0x01, 0x41, 0x00, 0x00, 0x00, 0x00, 0x03])
            .unwrap();
        assert_eq!(decoded.len, 12);
        assert_eq!(decoded.value, [GValue::Int(3)].into_iter().collect::<GValue>());

        // The default codes mean nothing to this registry
        let err = registry.decode(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x03]).unwrap_err();
        assert_eq!(err.kind(), Some(&DecodeErrorKind::UnknownTypeCode(TypeCode::INT)));
    }

    #[test]
    fn test_codec_for() {
        let registry = SerializerRegistry::default();
        assert_eq!(registry.codec_for(&GValue::Int(1)).map(|c| c.name()), Some("IntCodec"));
        let set: GValue = std::iter::empty::<GValue>().collect();
        assert_eq!(registry.codec_for(&set).map(|c| c.name()), Some("SetCodec"));
        assert!(registry.codec_for(&GValue::Null).is_none());
    }

    #[test]
    fn test_deserialize_with_missing_and_empty() {
        let registry = SerializerRegistry::default();

        let err = registry.deserialize_with(TypeCode::SET, None, true).unwrap_err();
        assert_eq!(err.kind(), Some(&DecodeErrorKind::BufferMissing));

        let err = registry.deserialize_with(TypeCode::SET, Some(&[]), true).unwrap_err();
        assert_eq!(err.kind(), Some(&DecodeErrorKind::BufferEmpty));

        let err = registry.deserialize_with(TypeCode::LIST, Some(&[0x09]), true).unwrap_err();
        assert_eq!(err.kind(), Some(&DecodeErrorKind::UnknownTypeCode(TypeCode::LIST)));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = DecoderConfig {
            max_nesting_depth: 0,
            ..DecoderConfig::default()
        };
        let err = SerializerRegistry::builder().config(config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config Error: max_nesting_depth must be at least 1"
        );
    }

    #[test]
    fn test_global_is_shared() {
        let a = SerializerRegistry::global();
        let b = SerializerRegistry::global();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.config(), &DecoderConfig::default());
    }
}
