//! Experiment Model Store Example
//!
//! Saves and reloads a trained model under a per-experiment directory,
//! showing both ways of naming the experiment.
//!
//! Run with: `RUST_LOG=info cargo run --example experiment_models`

use std::collections::BTreeMap;

use anyhow::Context;
use model_vault::{Error, ModelStore};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Classifier {
    architecture: String,
    layers: BTreeMap<String, Vec<f32>>,
    accuracy: f64,
}

fn train(epochs: u32) -> Classifier {
    let mut layers = BTreeMap::new();
    layers.insert("dense_1".to_string(), vec![0.12, -0.4, 0.33, 0.9]);
    layers.insert("output".to_string(), vec![1.5, -2.25]);
    Classifier {
        architecture: "mlp".to_string(),
        layers,
        accuracy: 0.5 + 0.04 * f64::from(epochs),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== model-vault Experiment Models ===\n");

    let root = std::env::temp_dir().join("model-vault-demo");

    // -------------------------------------------------------------------------
    // 1. Explicit experiment key
    // -------------------------------------------------------------------------
    println!("1. Explicit experiment key...");

    let store = ModelStore::builder()
        .root(&root)
        .experiment("5_classification/3_cifar10")
        .create_root(true)
        .build()
        .context("building explicit store")?;

    let model = train(10);
    let record = store.save(&model, "classifier", Some(true))?;
    println!("   Saved: {} ({} bytes)", record.path().display(), record.size_bytes());

    match store.save(&train(20), "classifier", Some(false)) {
        Err(Error::AlreadyExists { path }) => {
            println!("   Refused to overwrite {}", path.display());
        }
        other => anyhow::bail!("expected overwrite refusal, got {other:?}"),
    }

    let restored: Classifier = store.load("classifier")?;
    println!("   Restored accuracy: {:.2}", restored.accuracy);
    assert_eq!(restored, model);

    // -------------------------------------------------------------------------
    // 2. Key derived from this source file (demos/experiment_models)
    // -------------------------------------------------------------------------
    println!("\n2. Caller-derived experiment key...");

    let auto = ModelStore::auto_detect(Some(root.clone()))?;
    println!("   Experiment: {}", auto.experiment_key()?);
    println!("   Directory: {}", auto.resolve_experiment_dir()?.display());

    auto.save(&train(5), "baseline", Some(true))?;
    for record in auto.list()? {
        println!(
            "   - {} ({} bytes, modified {})",
            record.name(),
            record.size_bytes(),
            record.modified_at()
        );
    }

    // -------------------------------------------------------------------------
    // 3. Missing artifacts
    // -------------------------------------------------------------------------
    println!("\n3. Loading a missing artifact...");

    if let Err(err) = auto.load::<Classifier>("does_not_exist") {
        println!("   {err}");
    }

    println!("\n=== Done ===");
    Ok(())
}
