//! Generate the JSON API catalog for the documentation site
//!
//! Usage: cargo run --bin generate_docs
//!
//! Writes docs/src/docs.json, or the path in NEXURA_DOCS_OUTPUT.

use anyhow::{Context, Result};
use tracing::info;

use nexura::docs::{write_catalog, CatalogGenerator};
use nexura::{build_registry, Config};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nexura=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let registry = build_registry(&config);

    let catalog = CatalogGenerator::new(&config.public_api_url, &config.examples_dir)
        .generate(&registry)
        .context("Failed to generate catalog")?;

    write_catalog(&catalog, &config.docs_output)?;

    info!(
        providers = catalog.len(),
        output = %config.docs_output.display(),
        "Catalog written"
    );
    Ok(())
}
