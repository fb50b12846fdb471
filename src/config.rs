//! # Decoder Configuration
//!
//! Limits applied by a [`SerializerRegistry`](crate::codec::registry::SerializerRegistry)
//! to every decode it performs. The configuration is fixed when the registry
//! is built.
//!
//! ```toml
//! max_nesting_depth = 16
//! residual_preview_bytes = 32
//! ```

use serde::{Deserialize, Serialize};

use crate::internal::error::{Error, Result};

/// Maximum nesting of composite values accepted by default.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Number of residual bytes rendered in a failure diagnostic by default.
pub const DEFAULT_RESIDUAL_PREVIEW_BYTES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Composite values nested deeper than this are rejected. Nesting depth
    /// is chosen by whoever produced the bytes, so it must be bounded.
    pub max_nesting_depth: usize,

    pub residual_preview_bytes: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            residual_preview_bytes: DEFAULT_RESIDUAL_PREVIEW_BYTES,
        }
    }
}

impl DecoderConfig {
    /// Load configuration from a TOML string. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_nesting_depth == 0 {
            return Err(Error::ConfigError(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
