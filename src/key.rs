//! Experiment Key - names the directory an experiment's artifacts live in
//!
//! A key is either given explicitly (`"5_classification/3_cifar10"`) or
//! derived from a source file as `(parent_folder, file_stem)`:
//!
//! ```text
//! .../experiments/exp1.py  ──>  experiments/exp1
//! ```

use std::fmt;
use std::panic::Location;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Relative path identifying one experiment under the storage root.
///
/// Always non-empty and made only of normal path components, so joining it
/// onto the storage root can never escape the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PathBuf")]
pub struct ExperimentKey(PathBuf);

impl ExperimentKey {
    /// Create a key from an explicit relative path.
    ///
    /// `.` components are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the path is empty, absolute, or
    /// contains `..`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut key = PathBuf::new();

        for component in path.components() {
            match component {
                Component::Normal(part) => key.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(Error::Configuration(format!(
                        "experiment key '{}' must not contain '..'",
                        path.display()
                    )));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::Configuration(format!(
                        "experiment key '{}' must be a relative path, e.g. '5_classification/3_cifar10'",
                        path.display()
                    )));
                }
            }
        }

        if key.as_os_str().is_empty() {
            return Err(Error::Configuration(
                "experiment key must not be empty, e.g. '5_classification/3_cifar10'".to_string(),
            ));
        }

        Ok(Self(key))
    }

    /// Derive a key from a source file as `parent_folder/file_stem`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if the file has no named parent folder
    /// or no stem.
    pub fn from_source_file(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();

        let stem = file.file_stem().ok_or_else(|| {
            Error::Environment(format!("'{}' has no file name", file.display()))
        })?;
        let parent = file
            .parent()
            .and_then(Path::file_name)
            .ok_or_else(|| {
                Error::Environment(format!("'{}' has no parent folder", file.display()))
            })?;

        let key = Self::new(Path::new(parent).join(stem))
            .map_err(|e| Error::Environment(format!("'{}': {e}", file.display())))?;
        debug!(file = %file.display(), key = %key, "derived experiment key");
        Ok(key)
    }

    /// Derive a key from the source file of the calling code.
    ///
    /// Called from `experiments/exp1.rs`, this yields `experiments/exp1`.
    ///
    /// # Errors
    ///
    /// Same as [`ExperimentKey::from_source_file`].
    #[track_caller]
    pub fn of_caller() -> Result<Self> {
        Self::from_source_file(Location::caller().file())
    }

    /// Get the key as a relative path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<PathBuf> for ExperimentKey {
    type Error = Error;

    fn try_from(path: PathBuf) -> Result<Self> {
        Self::new(path)
    }
}

impl fmt::Display for ExperimentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for ExperimentKey {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
