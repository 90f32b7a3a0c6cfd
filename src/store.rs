//! Model Store - per-experiment artifact persistence
//!
//! ## Layout
//!
//! ```text
//! <root>/<experiment key>/<artifact name>.<extension>
//! ```
//!
//! The experiment key is either fixed at construction
//! ([`KeyStrategy::Fixed`]) or derived from the source file that calls the
//! store ([`KeyStrategy::CallerFile`]).
//!
//! ## Overwrite Safety (Poka-Yoke)
//!
//! `save` refuses to replace an existing artifact unless the caller says so.
//! Under [`OverwritePolicy::Explicit`] the caller must always say yes or no.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codec::{Codec, JsonCodec};
use crate::compression::Compression;
use crate::record::ArtifactRecord;
use crate::{Error, ExperimentKey, Result};

/// Fixed storage root used by [`ModelStore::explicit`].
pub const DEFAULT_STORAGE_ROOT: &str = "/home/jovyan/work/models";

/// Storage root used by [`ModelStore::auto_detect`] when no base is given.
pub const DEFAULT_AUTO_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/models");

/// How the experiment key is obtained for each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyStrategy {
    /// Same key for every operation
    Fixed(ExperimentKey),
    /// Key derived from the source file calling the store
    CallerFile,
}

/// What an omitted `overwrite` flag means on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Flag is mandatory (`None` is rejected)
    #[default]
    Explicit,
    /// `None` means do not overwrite
    DefaultDeny,
}

impl OverwritePolicy {
    /// Turn the caller's flag into a decision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `None` under [`OverwritePolicy::Explicit`].
    pub fn resolve(self, overwrite: Option<bool>) -> Result<bool> {
        match (self, overwrite) {
            (_, Some(overwrite)) => Ok(overwrite),
            (Self::DefaultDeny, None) => Ok(false),
            (Self::Explicit, None) => Err(Error::InvalidArgument(
                "overwrite must be given explicitly as Some(true) or Some(false)".to_string(),
            )),
        }
    }
}

/// Per-experiment model artifact store.
///
/// # Example
///
/// ```rust,no_run
/// use model_vault::ModelStore;
///
/// let store = ModelStore::explicit("5_classification/3_cifar10")?;
/// store.save(&vec![0.5_f32, -1.25], "weights", Some(false))?;
/// let weights: Vec<f32> = store.load("weights")?;
/// # Ok::<(), model_vault::Error>(())
/// ```
#[derive(Debug)]
pub struct ModelStore<C = JsonCodec> {
    root: PathBuf,
    strategy: KeyStrategy,
    overwrite_policy: OverwritePolicy,
    codec: C,
    compression: Compression,
    extension: String,
}

impl ModelStore<JsonCodec> {
    /// Explicit-path mode: fixed key under [`DEFAULT_STORAGE_ROOT`].
    ///
    /// The root must already exist. `overwrite` is mandatory on save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `subpath` is empty or invalid, or
    /// if the storage root does not exist.
    pub fn explicit(subpath: impl AsRef<Path>) -> Result<Self> {
        Self::builder()
            .root(DEFAULT_STORAGE_ROOT)
            .experiment(subpath)
            .overwrite_policy(OverwritePolicy::Explicit)
            .build()
    }

    /// Auto-detect mode: key derived from the calling source file.
    ///
    /// The root (default [`DEFAULT_AUTO_ROOT`]) is created if missing.
    /// `overwrite` defaults to `false` on save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the root cannot be created.
    pub fn auto_detect(base: Option<PathBuf>) -> Result<Self> {
        Self::builder()
            .root(base.unwrap_or_else(|| PathBuf::from(DEFAULT_AUTO_ROOT)))
            .caller_derived()
            .create_root(true)
            .overwrite_policy(OverwritePolicy::DefaultDeny)
            .build()
    }

    /// Create a store builder with the JSON codec.
    #[must_use]
    pub fn builder() -> ModelStoreBuilder<JsonCodec> {
        ModelStoreBuilder::default()
    }
}

impl<C: Codec> ModelStore<C> {
    /// Get the storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the artifact file extension (codec extension plus compression suffix).
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Get the overwrite policy.
    #[must_use]
    pub const fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite_policy
    }

    /// Get the key strategy.
    #[must_use]
    pub const fn key_strategy(&self) -> &KeyStrategy {
        &self.strategy
    }

    /// Get the codec.
    #[must_use]
    pub const fn codec(&self) -> &C {
        &self.codec
    }

    /// Get the compression algorithm.
    #[must_use]
    pub const fn compression(&self) -> Compression {
        self.compression
    }

    /// Experiment key for an operation issued from the caller's location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if the key must be derived from the
    /// caller and that fails.
    #[track_caller]
    pub fn experiment_key(&self) -> Result<ExperimentKey> {
        match &self.strategy {
            KeyStrategy::Fixed(key) => Ok(key.clone()),
            KeyStrategy::CallerFile => ExperimentKey::of_caller(),
        }
    }

    /// Directory holding this experiment's artifacts, created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if the key cannot be derived, or
    /// [`Error::Storage`] if the directory cannot be created.
    #[track_caller]
    pub fn resolve_experiment_dir(&self) -> Result<PathBuf> {
        let key = self.experiment_key()?;
        self.ensure_dir(&key)
    }

    /// Path that `save`/`load` use for `name`.
    ///
    /// # Errors
    ///
    /// Same as [`ModelStore::resolve_experiment_dir`], plus
    /// [`Error::InvalidArgument`] for an invalid name.
    #[track_caller]
    pub fn artifact_path(&self, name: &str) -> Result<PathBuf> {
        self.locate(name).map(|(_, path)| path)
    }

    /// Whether an artifact called `name` exists.
    ///
    /// # Errors
    ///
    /// Same as [`ModelStore::artifact_path`], plus [`Error::Storage`] if the
    /// file system cannot be queried.
    #[track_caller]
    pub fn contains(&self, name: &str) -> Result<bool> {
        let (_, path) = self.locate(name)?;
        path.try_exists()
            .map_err(|e| Error::storage(format!("checking {}", path.display()), e))
    }

    /// Save an artifact as `name`.
    ///
    /// `overwrite` is resolved through the store's [`OverwritePolicy`]. The
    /// file is written to a temporary sibling and renamed into place, so a
    /// failed save never leaves a partial artifact behind.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`]: bad name, null artifact, or missing flag
    /// - [`Error::AlreadyExists`]: artifact exists and overwrite is false
    /// - [`Error::Environment`]: caller-derived key unavailable
    /// - [`Error::Storage`]: serialization or I/O failure
    #[track_caller]
    pub fn save<T: Serialize + ?Sized>(
        &self,
        artifact: &T,
        name: &str,
        overwrite: Option<bool>,
    ) -> Result<ArtifactRecord> {
        validate_name(name)?;
        let overwrite = self.overwrite_policy.resolve(overwrite)?;

        let (key, path) = self.locate(name)?;
        let exists = path
            .try_exists()
            .map_err(|e| Error::storage(format!("checking {}", path.display()), e))?;
        if exists && !overwrite {
            return Err(Error::AlreadyExists { path });
        }

        let encoded = self.codec.encode(artifact)?;
        if self.codec.is_null(&encoded) {
            return Err(Error::InvalidArgument(format!(
                "artifact '{name}' is empty (None or unit); nothing to save"
            )));
        }

        if exists {
            warn!(experiment = %key, "Overwriting model at {}", path.display());
        }
        let bytes = self.compression.compress(&encoded)?;
        write_atomic(&path, &bytes)?;
        info!(experiment = %key, "Model saved to {}", path.display());

        record_for(key, name, path)
    }

    /// Load the artifact saved as `name`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`]: bad name
    /// - [`Error::NotFound`]: no artifact called `name`
    /// - [`Error::Environment`]: caller-derived key unavailable
    /// - [`Error::Storage`]: I/O, decompression or deserialization failure
    #[track_caller]
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let (key, path) = self.locate(name)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound { path });
            }
            Err(e) => return Err(Error::storage(format!("reading {}", path.display()), e)),
        };

        let decoded = self.compression.decompress(&bytes)?;
        let artifact = self.codec.decode(&decoded)?;
        info!(experiment = %key, "Model loaded from {}", path.display());

        Ok(artifact)
    }

    /// Every artifact stored for the experiment, sorted by name.
    ///
    /// Only files carrying this store's extension are reported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if the key cannot be derived, or
    /// [`Error::Storage`] if the directory cannot be read.
    #[track_caller]
    pub fn list(&self) -> Result<Vec<ArtifactRecord>> {
        let key = self.experiment_key()?;
        let dir = self.ensure_dir(&key)?;
        let suffix = format!(".{}", self.extension);
        let read_error = |e: io::Error| Error::storage(format!("listing {}", dir.display()), e);

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let file_name = entry.file_name();
            let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(suffix.as_str()))
            else {
                continue;
            };
            if validate_name(name).is_err() || !entry.path().is_file() {
                continue;
            }
            match record_for(key.clone(), name, entry.path()) {
                Ok(record) => records.push(record),
                // Removed between read_dir and stat
                Err(Error::Storage { source, .. })
                    if source
                        .downcast_ref::<io::Error>()
                        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound) => {}
                Err(e) => return Err(e),
            }
        }

        records.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(records)
    }

    #[track_caller]
    fn locate(&self, name: &str) -> Result<(ExperimentKey, PathBuf)> {
        validate_name(name)?;
        let key = self.experiment_key()?;
        let dir = self.ensure_dir(&key)?;
        let path = dir.join(format!("{name}.{}", self.extension));
        Ok((key, path))
    }

    fn ensure_dir(&self, key: &ExperimentKey) -> Result<PathBuf> {
        let dir = self.root.join(key);
        if !dir.is_dir() {
            fs::create_dir_all(&dir)
                .map_err(|e| Error::storage(format!("creating {}", dir.display()), e))?;
            debug!(experiment = %key, "Created experiment directory {}", dir.display());
        }
        Ok(dir)
    }
}

/// Builder for [`ModelStore`].
///
/// Defaults: root [`DEFAULT_STORAGE_ROOT`], root must exist,
/// [`OverwritePolicy::Explicit`], compact JSON, no compression. An
/// experiment key (or [`ModelStoreBuilder::caller_derived`]) is required.
#[derive(Debug)]
pub struct ModelStoreBuilder<C = JsonCodec> {
    root: PathBuf,
    key: PendingKey,
    create_root: bool,
    overwrite_policy: OverwritePolicy,
    codec: C,
    compression: Compression,
}

#[derive(Debug)]
enum PendingKey {
    Unset,
    Path(PathBuf),
    Caller,
}

impl Default for ModelStoreBuilder<JsonCodec> {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_STORAGE_ROOT),
            key: PendingKey::Unset,
            create_root: false,
            overwrite_policy: OverwritePolicy::default(),
            codec: JsonCodec::default(),
            compression: Compression::default(),
        }
    }
}

impl<C: Codec> ModelStoreBuilder<C> {
    /// Set the storage root.
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Use a fixed experiment key (relative path under the root).
    #[must_use]
    pub fn experiment(mut self, key: impl AsRef<Path>) -> Self {
        self.key = PendingKey::Path(key.as_ref().to_path_buf());
        self
    }

    /// Derive the experiment key from the calling source file on every operation.
    #[must_use]
    pub fn caller_derived(mut self) -> Self {
        self.key = PendingKey::Caller;
        self
    }

    /// Create the root if it does not exist (default: require it).
    #[must_use]
    pub const fn create_root(mut self, create: bool) -> Self {
        self.create_root = create;
        self
    }

    /// Set what an omitted `overwrite` flag means.
    #[must_use]
    pub const fn overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite_policy = policy;
        self
    }

    /// Set the compression applied to encoded artifacts.
    #[must_use]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Replace the serialization codec.
    #[must_use]
    pub fn codec<D: Codec>(self, codec: D) -> ModelStoreBuilder<D> {
        ModelStoreBuilder {
            root: self.root,
            key: self.key,
            create_root: self.create_root,
            overwrite_policy: self.overwrite_policy,
            codec,
            compression: self.compression,
        }
    }

    /// Build the store.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`]: no or invalid experiment key, root missing
    ///   (without `create_root`), or root not a directory
    /// - [`Error::Storage`]: root could not be created
    pub fn build(self) -> Result<ModelStore<C>> {
        let strategy = match self.key {
            PendingKey::Path(path) => KeyStrategy::Fixed(ExperimentKey::new(path)?),
            PendingKey::Caller => KeyStrategy::CallerFile,
            PendingKey::Unset => {
                return Err(Error::Configuration(
                    "experiment key must be set, e.g. .experiment(\"5_classification/3_cifar10\"), \
                     or use .caller_derived()"
                        .to_string(),
                ));
            }
        };

        if self.root.exists() {
            if !self.root.is_dir() {
                return Err(Error::Configuration(format!(
                    "storage root '{}' is not a directory",
                    self.root.display()
                )));
            }
        } else if self.create_root {
            fs::create_dir_all(&self.root).map_err(|e| {
                Error::storage(format!("creating storage root {}", self.root.display()), e)
            })?;
            debug!("Created storage root {}", self.root.display());
        } else {
            return Err(Error::Configuration(format!(
                "storage root '{}' does not exist. Create it before using the store",
                self.root.display()
            )));
        }

        let extension = match self.compression.suffix() {
            Some(suffix) => format!("{}.{suffix}", self.codec.extension()),
            None => self.codec.extension().to_string(),
        };

        Ok(ModelStore {
            root: self.root,
            strategy,
            overwrite_policy: self.overwrite_policy,
            codec: self.codec,
            compression: self.compression,
            extension,
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidArgument(
            "artifact name must not be empty".to_string(),
        ));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(Error::InvalidArgument(format!(
            "artifact name '{name}' must be a plain file name without path separators"
        )));
    }
    Ok(())
}

/// Write `bytes` to a uniquely named hidden sibling, then rename it over `path`.
///
/// The temporary file is removed on any failure.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::storage(format!("creating temporary file in {}", dir.display()), e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| Error::storage(format!("writing {}", tmp.path().display()), e))?;
    tmp.persist(path).map_err(|e| {
        Error::storage(format!("moving artifact into {}", path.display()), e.error)
    })?;
    Ok(())
}

fn record_for(key: ExperimentKey, name: &str, path: PathBuf) -> Result<ArtifactRecord> {
    let stat_error =
        |e: io::Error| Error::storage(format!("reading metadata of {}", path.display()), e);
    let meta = fs::metadata(&path).map_err(stat_error)?;
    let modified_at = meta.modified().map_err(stat_error)?;
    Ok(ArtifactRecord::new(key, name, path, meta.len(), modified_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn fixed_store(root: &Path, key: &str) -> ModelStore {
        ModelStore::builder()
            .root(root)
            .experiment(key)
            .build()
            .unwrap()
    }

    #[test]
    fn test_overwrite_policy_resolve() {
        assert!(OverwritePolicy::Explicit.resolve(Some(true)).unwrap());
        assert!(!OverwritePolicy::Explicit.resolve(Some(false)).unwrap());
        assert!(matches!(
            OverwritePolicy::Explicit.resolve(None),
            Err(Error::InvalidArgument(_))
        ));
        assert!(!OverwritePolicy::DefaultDeny.resolve(None).unwrap());
        assert!(OverwritePolicy::DefaultDeny.resolve(Some(true)).unwrap());
    }

    #[test]
    fn test_builder_requires_key() {
        let dir = TempDir::new().unwrap();
        let result = ModelStore::builder().root(dir.path()).build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_builder_rejects_empty_key() {
        let dir = TempDir::new().unwrap();
        let result = ModelStore::builder().root(dir.path()).experiment("").build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_builder_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("models");
        let result = ModelStore::builder().root(&missing).experiment("a").build();
        assert!(matches!(result, Err(Error::Configuration(_))));
        assert!(!missing.exists());
    }

    #[test]
    fn test_builder_creates_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("models");
        let store = ModelStore::builder()
            .root(&missing)
            .experiment("a")
            .create_root(true)
            .build()
            .unwrap();
        assert!(missing.is_dir());
        assert_eq!(store.root(), missing);
    }

    #[test]
    fn test_builder_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("models");
        fs::write(&file, b"").unwrap();
        let result = ModelStore::builder().root(&file).experiment("a").build();
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_resolve_experiment_dir_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "a/b");

        let first = store.resolve_experiment_dir().unwrap();
        let second = store.resolve_experiment_dir().unwrap();
        assert_eq!(first, dir.path().join("a/b"));
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_save_load_scenario() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "a/b");

        let mut model = HashMap::new();
        model.insert("w".to_string(), vec![1, 2, 3]);

        let record = store.save(&model, "net", Some(true)).unwrap();
        let expected = dir.path().join("a/b/net.json");
        assert_eq!(record.path(), expected);
        assert_eq!(record.name(), "net");
        assert_eq!(record.size_bytes(), fs::metadata(&expected).unwrap().len());
        assert!(expected.is_file());

        let loaded: HashMap<String, Vec<i32>> = store.load("net").unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_save_without_overwrite_keeps_first() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");

        store.save(&1_u32, "m", Some(false)).unwrap();
        let err = store.save(&2_u32, "m", Some(false)).unwrap_err();

        assert!(matches!(err, Error::AlreadyExists { .. }));
        assert_eq!(err.path(), Some(dir.path().join("exp/m.json").as_path()));
        assert_eq!(store.load::<u32>("m").unwrap(), 1);
    }

    #[test]
    fn test_save_null_artifact_rejected() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");

        let err = store.save(&None::<u32>, "m", Some(true)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(!store.contains("m").unwrap());
    }

    #[test]
    fn test_save_rejects_path_like_names() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");

        for name in ["", ".", "..", "a/b", "..\\x"] {
            assert!(
                matches!(store.save(&1, name, Some(true)), Err(Error::InvalidArgument(_))),
                "name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_save_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");
        store.save(&vec![1.0_f64; 16], "m", Some(true)).unwrap();
        store.save(&vec![2.0_f64; 16], "m", Some(true)).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path().join("exp"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("m.json")]);
    }

    #[test]
    fn test_save_non_finite_floats_fails_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");

        let err = store.save(&vec![f32::NAN], "m", Some(true)).unwrap_err();
        assert!(matches!(err, Error::Storage { .. }), "got {err:?}");
        let err = store.save(&f64::NAN, "m", Some(true)).unwrap_err();
        assert!(matches!(err, Error::Storage { .. }), "got {err:?}");

        assert!(!store.contains("m").unwrap());
        assert_eq!(fs::read_dir(dir.path().join("exp")).unwrap().count(), 0);
    }

    #[test]
    fn test_denied_overwrite_checked_before_encoding() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");
        store.save(&vec![1.0_f32], "m", Some(true)).unwrap();

        // Unencodable under JSON; the existing file must win
        let err = store.save(&vec![f32::NAN], "m", Some(false)).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }), "got {err:?}");
        assert_eq!(store.load::<Vec<f32>>("m").unwrap(), vec![1.0]);
    }

    #[test]
    fn test_save_record_matches_file_metadata() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");
        let record = store.save(&vec![3_u32; 64], "m", Some(true)).unwrap();

        let meta = fs::metadata(record.path()).unwrap();
        assert_eq!(record.size_bytes(), meta.len());
        assert!(record.size_bytes() > 0);
        let modified: chrono::DateTime<chrono::Utc> = meta.modified().unwrap().into();
        assert_eq!(record.modified_at(), modified);
    }

    #[test]
    fn test_load_corrupt_artifact_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");
        let path = store.artifact_path("m").unwrap();
        fs::write(&path, b"{broken").unwrap();

        let err = store.load::<Vec<u8>>("m").unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }

    #[test]
    fn test_caller_derived_uses_calling_file() {
        let dir = TempDir::new().unwrap();
        let store = ModelStore::builder()
            .root(dir.path())
            .caller_derived()
            .build()
            .unwrap();

        let record = store.save(&42_u8, "answer", Some(true)).unwrap();
        assert_eq!(record.path(), dir.path().join("src/store/answer.json"));
        assert_eq!(record.experiment().as_path(), Path::new("src/store"));
        assert_eq!(store.load::<u8>("answer").unwrap(), 42);
    }

    #[test]
    fn test_list_reports_only_own_extension() {
        let dir = TempDir::new().unwrap();
        let store = fixed_store(dir.path(), "exp");
        store.save(&1, "b", Some(true)).unwrap();
        store.save(&2, "a", Some(true)).unwrap();
        fs::write(dir.path().join("exp/notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("exp/nested.json")).unwrap();

        let names: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
