//! # model-vault: Per-Experiment Model Artifact Store
//!
//! model-vault persists trained model values under a predictable directory
//! layout, one directory per experiment (notebook), and refuses to clobber
//! an existing artifact unless asked to.
//!
//! ```text
//! <root>/<experiment key>/<artifact name>.json
//! ```
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke**: Overwrites require explicit permission
//! - **Jidoka**: Saves are all-or-nothing (write to temp file, then rename)
//! - **Standardized work**: One layout for every experiment
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use model_vault::{ModelStore, OverwritePolicy};
//! use std::collections::HashMap;
//!
//! let store = ModelStore::builder()
//!     .root("/data/models")
//!     .experiment("5_classification/3_cifar10")
//!     .overwrite_policy(OverwritePolicy::Explicit)
//!     .build()?;
//!
//! let weights = HashMap::from([("w".to_string(), vec![1.0_f32, 2.0, 3.0])]);
//! store.save(&weights, "net", Some(true))?;
//!
//! let restored: HashMap<String, Vec<f32>> = store.load("net")?;
//! assert_eq!(restored, weights);
//! # Ok::<(), model_vault::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod codec;
pub mod compression;
pub mod error;
mod finite;
pub mod key;
pub mod record;
pub mod store;

pub use codec::{Codec, JsonCodec};
pub use compression::Compression;
pub use error::{Error, Result};
pub use key::ExperimentKey;
pub use record::ArtifactRecord;
pub use store::{
    KeyStrategy, ModelStore, ModelStoreBuilder, OverwritePolicy, DEFAULT_AUTO_ROOT,
    DEFAULT_STORAGE_ROOT,
};
