//! apidoc - Swagger UI documentation server entry point

use anyhow::Result;
use apidoc_common::config::{Config, LoggingConfig};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging);

    info!("Starting apidoc documentation server...");

    let swagger = config.swagger;
    info!(
        doc_dir = %swagger.doc_dir.display(),
        definitions = swagger.urls.len(),
        doc_expansion = %swagger.doc_expansion,
        "Swagger UI configured"
    );

    apidoc_web::run(swagger, &config.server.bind).await?;

    info!("apidoc shutdown complete");

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(fmt::layer().json().with_target(true).with_level(true))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_level(true))
            .init();
    }
}
