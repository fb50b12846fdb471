// Codec module for the GraphBinary wire format

pub mod decode;
pub mod registry;
pub mod types;

use std::fmt;

use crate::codec::registry::SerializerRegistry;
use crate::codec::types::{Decoded, GValue, TypeCode};
use crate::internal::cursor::Cursor;
use crate::internal::error::{DecodeErrorKind, DecodeResult, Error, Result};

/// A codec for one GraphBinary type.
///
/// Codecs are stateless apart from their identity and may be shared across
/// threads and reused for any number of decodes.
pub trait Codec: Send + Sync + fmt::Debug {
    /// The code this codec was registered under.
    fn type_code(&self) -> TypeCode;

    /// Name used to identify the codec in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this codec is the one to encode `value` with.
    fn can_be_used_for(&self, value: &GValue) -> bool;

    /// Decodes one value starting at `cursor`.
    ///
    /// With `fully_qualified` set the frame starts with the type code and
    /// value flag; otherwise only the payload is read. Failures carry the
    /// structural path below this value but are not wrapped; wrapping
    /// happens once at the registry boundary.
    fn read(
        &self,
        cursor: Cursor<'_>,
        fully_qualified: bool,
        ctx: &DecodeContext<'_>,
    ) -> DecodeResult<Decoded>;

    /// Encodes `value`. Not available for any codec in this crate.
    fn serialize(&self, _value: &GValue, _fully_qualified: bool) -> Result<Vec<u8>> {
        Err(Error::NotImplemented {
            codec: self.name(),
            method: "serialize",
        })
    }
}

/// Per-call decode state: the registry to dispatch through and the current
/// composite nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct DecodeContext<'r> {
    registry: &'r SerializerRegistry,
    depth: usize,
}

impl<'r> DecodeContext<'r> {
    pub fn new(registry: &'r SerializerRegistry) -> Self {
        DecodeContext { registry, depth: 0 }
    }

    pub fn registry(&self) -> &'r SerializerRegistry {
        self.registry
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Context for the children of a composite value starting at `at`.
    pub fn nested(&self, at: &Cursor<'_>) -> DecodeResult<DecodeContext<'r>> {
        let limit = self.registry.config().max_nesting_depth;
        let depth = self.depth + 1;
        if depth > limit {
            return Err(at.error(DecodeErrorKind::DepthExceeded { limit }));
        }
        Ok(DecodeContext {
            registry: self.registry,
            depth,
        })
    }
}
