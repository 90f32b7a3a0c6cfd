//! Artifact Record - what was stored, where, and when

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ExperimentKey;

/// Artifact Record describes one artifact file on disk.
///
/// Returned by [`ModelStore::save`](crate::ModelStore::save) for the file just
/// written and by [`ModelStore::list`](crate::ModelStore::list) for every
/// artifact of an experiment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactRecord {
    experiment: ExperimentKey,
    name: String,
    path: PathBuf,
    size_bytes: u64,
    modified_at: DateTime<Utc>,
}

impl ArtifactRecord {
    /// Create a new artifact record.
    ///
    /// # Arguments
    ///
    /// * `experiment` - Key of the owning experiment
    /// * `name` - Artifact name without extension (e.g., "net")
    /// * `path` - Full path of the artifact file
    /// * `size_bytes` - Size of the artifact file in bytes
    /// * `modified_at` - Last write time of the file
    #[must_use]
    pub fn new(
        experiment: ExperimentKey,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        size_bytes: u64,
        modified_at: SystemTime,
    ) -> Self {
        Self {
            experiment,
            name: name.into(),
            path: path.into(),
            size_bytes,
            modified_at: modified_at.into(),
        }
    }

    /// Get the experiment key.
    #[must_use]
    pub const fn experiment(&self) -> &ExperimentKey {
        &self.experiment
    }

    /// Get the artifact name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the full file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the artifact size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Get the last modification timestamp.
    #[must_use]
    pub const fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}
