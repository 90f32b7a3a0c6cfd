//! Error types for model-vault
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed lower-level cause carried by [`Error::Storage`].
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// model-vault error types
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid construction argument, or storage root absent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed call argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Save attempted onto an existing artifact without overwrite permission
    #[error("Artifact already exists at {}\nPass overwrite = Some(true) to replace it", .path.display())]
    AlreadyExists {
        /// Path of the existing artifact
        path: PathBuf,
    },

    /// Load attempted on an artifact that was never saved
    #[error("Artifact not found at {}", .path.display())]
    NotFound {
        /// Expected artifact path
        path: PathBuf,
    },

    /// Experiment key could not be derived from the calling context
    #[error("Cannot derive experiment key: {0}\nUse an explicit experiment key instead")]
    Environment(String),

    /// Lower-level I/O, serialization or compression failure
    #[error("Storage error: {context}: {source}")]
    Storage {
        /// What the store was doing when the failure occurred
        context: String,
        /// Original cause
        #[source]
        source: BoxedCause,
    },
}

impl Error {
    /// Wrap a lower-level failure as [`Error::Storage`].
    pub fn storage(context: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Storage {
            context: context.into(),
            source: source.into(),
        }
    }

    /// Path named by [`Error::AlreadyExists`] or [`Error::NotFound`].
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::AlreadyExists { path } | Self::NotFound { path } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_storage_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = Error::storage("writing net.json", io);

        let source = error.source().expect("source preserved");
        assert!(source.to_string().contains("denied"));
        assert!(error.to_string().contains("writing net.json"));
    }

    #[test]
    fn test_path_accessor() {
        let error = Error::NotFound {
            path: PathBuf::from("/models/a/b/net.json"),
        };
        assert_eq!(error.path(), Some(std::path::Path::new("/models/a/b/net.json")));
        assert!(Error::Configuration("x".into()).path().is_none());
    }
}
