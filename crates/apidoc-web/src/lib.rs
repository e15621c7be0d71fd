//! apidoc Web
//!
//! Renders the Swagger UI bootstrap page for a configuration record and
//! serves it together with the definition files of the documentation
//! directory.

mod error;
mod handlers;
pub mod page;
mod routes;
mod templates;

pub use error::WebError;
pub use page::{PageContext, PageRenderer};

use apidoc_common::{Result, SwaggerUiConfig};
use apidoc_storage::{DocStorage, LocalDocStorage};
use axum::Router;
use rust_embed::RustEmbed;
use std::sync::Arc;

/// Static files served next to the rendered page
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct StaticAssets;

/// Application state for the documentation server
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SwaggerUiConfig>,
    pub storage: Arc<dyn DocStorage>,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    /// Create app state backed by the configured documentation directory
    pub async fn new(config: SwaggerUiConfig) -> Result<Self> {
        let storage = Arc::new(LocalDocStorage::new(config.doc_dir.clone()));
        Self::with_storage(config, storage).await
    }

    /// Create app state on top of an existing storage.
    ///
    /// Unnamed definitions are named after their URL. When no definition is
    /// configured, the ones found in the storage are listed instead.
    pub async fn with_storage(
        mut config: SwaggerUiConfig,
        storage: Arc<dyn DocStorage>,
    ) -> Result<Self> {
        config.fill_missing_names();

        if config.urls.is_empty() {
            config.urls = storage.list_definitions().await?;
        }

        if config.urls.is_empty() {
            tracing::warn!("No API definitions configured or discovered, the viewer will be empty");
        } else {
            tracing::info!(count = config.urls.len(), "API definitions ready");
        }

        let renderer = PageRenderer::for_config(&config)?;

        Ok(Self {
            config: Arc::new(config),
            storage,
            renderer: Arc::new(renderer),
        })
    }
}

/// Create the documentation router
pub fn create_router(state: AppState) -> Router {
    routes::create_router(state)
}

/// Run the documentation server until Ctrl-C
pub async fn run(config: SwaggerUiConfig, bind: &str) -> anyhow::Result<()> {
    let state = AppState::new(config).await?;
    let mount = state
        .config
        .mount_prefix()
        .unwrap_or_else(|| "/".to_string());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%mount, "Swagger UI listening on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
