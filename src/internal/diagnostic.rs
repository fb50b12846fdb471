// Boundary wrapping of decode failures

use std::fmt;

use tracing::debug;

use crate::codec::types::TypeCode;
use crate::internal::error::{DecodeError, Error};

/// State of the read window at the point a decode failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorState {
    pub offset: usize,
    pub remaining: usize,
    /// Hex of up to `residual_preview_bytes` bytes starting at `offset`.
    pub preview: String,
}

impl fmt::Display for CursorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "offset {}, {} bytes remaining [{}",
            self.offset, self.remaining, self.preview
        )?;
        if self.remaining * 2 > self.preview.len() {
            f.write_str("...")?;
        }
        f.write_str("]")
    }
}

/// Full context of a failed top-level decode: which codec was called, with
/// what arguments, where the cursor stood, and the path-tagged cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    codec: &'static str,
    type_code: Option<TypeCode>,
    fully_qualified: bool,
    input_len: usize,
    cursor: CursorState,
    cause: DecodeError,
}

impl Diagnostic {
    pub fn capture(
        codec: &'static str,
        type_code: Option<TypeCode>,
        fully_qualified: bool,
        input: &[u8],
        cause: DecodeError,
        preview_bytes: usize,
    ) -> Self {
        let offset = cause.offset().min(input.len());
        let residual = &input[offset..];
        let cursor = CursorState {
            offset,
            remaining: residual.len(),
            preview: hex::encode(&residual[..residual.len().min(preview_bytes)]),
        };

        Diagnostic {
            codec,
            type_code,
            fully_qualified,
            input_len: input.len(),
            cursor,
            cause,
        }
    }

    pub fn codec(&self) -> &'static str {
        self.codec
    }

    pub fn type_code(&self) -> Option<TypeCode> {
        self.type_code
    }

    pub fn fully_qualified(&self) -> bool {
        self.fully_qualified
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn cause(&self) -> &DecodeError {
        &self.cause
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codec)?;
        if let Some(code) = self.type_code {
            write!(f, " ({})", code)?;
        }
        write!(
            f,
            ".deserialize(fully_qualified={}, {} bytes) failed: {}; cursor at {}",
            self.fully_qualified, self.input_len, self.cause, self.cursor
        )
    }
}

impl std::error::Error for Diagnostic {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Wraps a path-tagged failure once, at the outermost decode call.
pub(crate) fn boundary_error(
    codec: &'static str,
    type_code: Option<TypeCode>,
    fully_qualified: bool,
    input: &[u8],
    cause: DecodeError,
    preview_bytes: usize,
) -> Error {
    debug!(
        codec,
        type_name = type_code.and_then(TypeCode::well_known_name),
        offset = cause.offset(),
        error = %cause,
        "GraphBinary decode failed"
    );
    Error::Deserialize(Box::new(Diagnostic::capture(
        codec,
        type_code,
        fully_qualified,
        input,
        cause,
        preview_bytes,
    )))
}
