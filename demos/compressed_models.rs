//! Compressed Model Store Demo
//!
//! Run with: `cargo run --example compressed_models --features compression`
//!
//! Compares on-disk size of the same model stored plain, LZ4 and ZSTD.

use model_vault::{Compression, ModelStore};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("=== model-vault Compressed Models Demo ===\n");

    let root = std::env::temp_dir().join("model-vault-demo");
    // Sparse embedding table: mostly zeros, compresses well
    let embeddings: Vec<f32> = (0..50_000)
        .map(|i| if i % 97 == 0 { 0.125 } else { 0.0 })
        .collect();

    for compression in [Compression::None, Compression::Lz4, Compression::Zstd] {
        let store = ModelStore::builder()
            .root(&root)
            .experiment("compression/embeddings")
            .create_root(true)
            .compression(compression)
            .build()?;

        let record = store.save(&embeddings, "table", Some(true))?;
        let restored: Vec<f32> = store.load("table")?;
        assert_eq!(restored, embeddings);

        println!(
            "   {:<5} {:>8} bytes  {}",
            compression.as_str(),
            record.size_bytes(),
            record.path().display()
        );
    }

    println!("\nAll demos completed successfully!");
    Ok(())
}
