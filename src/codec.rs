//! Artifact codecs - how a model value becomes bytes on disk
//!
//! The store is generic over [`Codec`], so the directory and overwrite logic
//! never depends on a particular serialization library. [`JsonCodec`] is the
//! default; it refuses NaN and infinite floats, which JSON cannot hold.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::finite;
use crate::{Error, Result};

/// Serialization strategy for artifacts.
pub trait Codec {
    /// File extension for artifacts written by this codec (without the dot).
    fn extension(&self) -> &str;

    /// Serialize an artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the value cannot be serialized.
    fn encode<T: Serialize + ?Sized>(&self, artifact: &T) -> Result<Vec<u8>>;

    /// Deserialize an artifact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the bytes are not a valid `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Whether encoded bytes represent an absent value (`None`, `()`).
    ///
    /// Such artifacts are rejected on save.
    fn is_null(&self, _encoded: &[u8]) -> bool {
        false
    }
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact JSON.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented, human-readable JSON.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Whether output is indented.
    #[must_use]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for JsonCodec {
    fn extension(&self) -> &str {
        "json"
    }

    fn encode<T: Serialize + ?Sized>(&self, artifact: &T) -> Result<Vec<u8>> {
        finite::check(artifact).map_err(|e| Error::storage("JSON serialization failed", e))?;
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(artifact)
        } else {
            serde_json::to_vec(artifact)
        };
        encoded.map_err(|e| Error::storage("JSON serialization failed", e))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| Error::storage("JSON deserialization failed", e))
    }

    fn is_null(&self, encoded: &[u8]) -> bool {
        encoded == b"null"
    }
}
