use std::fmt;

use thiserror::Error;

use crate::codec::types::TypeCode;
use crate::internal::diagnostic::Diagnostic;

/// A framing violation detected while reading a GraphBinary frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// No buffer was supplied to a top-level decode.
    #[error("buffer is missing")]
    BufferMissing,

    /// The buffer (or the remaining view of it) holds no bytes.
    #[error("buffer is empty")]
    BufferEmpty,

    #[error("unexpected type code {found} (expected {expected})")]
    TypeCodeMismatch { expected: TypeCode, found: TypeCode },

    #[error("value flag is missing")]
    ValueFlagMissing,

    #[error("unexpected value flag {0:#04x}")]
    ValueFlagInvalid(u8),

    #[error("length is negative: {0}")]
    LengthNegative(i32),

    /// Raised by the dispatcher when no codec is registered for a code.
    #[error("unknown type code {0}")]
    UnknownTypeCode(TypeCode),

    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("maximum nesting depth ({limit}) exceeded")]
    DepthExceeded { limit: usize },
}

/// Structural position of a child inside a composite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field of the enclosing value, e.g. `length`.
    Field(&'static str),
    /// The n-th element of the enclosing value, rendered as `item_<n>`.
    Item(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Item(index) => write!(f, "item_{}", index),
        }
    }
}

/// A decode failure: what went wrong, the absolute byte offset where it was
/// detected and the path from the outermost value down to the failing child.
///
/// Errors are never edited in place. Each call site that knows its position
/// builds a new error with [`DecodeError::within`] as the failure unwinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    offset: usize,
    path: Vec<PathSegment>,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        DecodeError {
            kind,
            offset,
            path: Vec::new(),
        }
    }

    /// Returns this error nested under `segment`.
    pub fn within(self, segment: PathSegment) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.push(segment);
        path.extend(self.path);
        DecodeError { path, ..self }
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Absolute offset into the top-level buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Outermost segment first.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Index of the outermost element whose decoding failed, if any.
    pub fn failed_element(&self) -> Option<usize> {
        self.path.iter().find_map(|segment| match segment {
            PathSegment::Item(index) => Some(*index),
            PathSegment::Field(_) => None,
        })
    }

    /// Name of the outermost field whose decoding failed, if any.
    pub fn failed_field(&self) -> Option<&'static str> {
        self.path.iter().find_map(|segment| match segment {
            PathSegment::Field(name) => Some(*name),
            PathSegment::Item(_) => None,
        })
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.path {
            write!(f, "{}: ", segment)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for DecodeError {}

/// Result of the internal, unwrapped decode steps.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Unified error type for the library.
#[derive(Error, Debug)]
pub enum Error {
    /// A decode failed; carries the full boundary diagnostic.
    #[error("{0}")]
    Deserialize(#[source] Box<Diagnostic>),

    #[error("{method}() method not implemented for {codec}")]
    NotImplemented {
        codec: &'static str,
        method: &'static str,
    },

    #[error("Config Error: {0}")]
    ConfigError(String),
}

impl Error {
    /// The underlying decode failure, if this is a decode error.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Error::Deserialize(diagnostic) => Some(diagnostic.cause()),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<&DecodeErrorKind> {
        self.decode_error().map(DecodeError::kind)
    }
}

/// A specialized `Result` type for GraphBinary operations.
pub type Result<T> = std::result::Result<T, Error>;
