//! finisher-api - The Finisher songwriting assistant backend
//!
//! Serves lyric generation, the subscription plan catalog, and
//! checkout-session delegation for the browser UI.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use finisher_api::payments::CheckoutClient;
use finisher_api::provider::{DeterministicProvider, ExternalModelProvider, LyricProvider};
use finisher_api::{build_router, AppState};
use finisher_common::config::{load_config, resolve_config_path, ProviderKind};
use finisher_common::plans::PlanRegistry;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "finisher-api", about = "The Finisher songwriting assistant backend")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port from configuration
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting The Finisher API (finisher-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_config(config_path.as_deref())?;

    // Plan catalog: built once, immutable for the process lifetime
    let registry = Arc::new(match config.plans.clone() {
        Some(catalog) => PlanRegistry::from_catalog(catalog)?,
        None => PlanRegistry::default(),
    });
    info!("Plan catalog loaded ({} tiers)", registry.list().len());

    let provider: Arc<dyn LyricProvider> = match config.provider.kind {
        ProviderKind::Deterministic => Arc::new(DeterministicProvider::new()),
        ProviderKind::External => {
            let api_key = config.provider.api_key.clone().ok_or_else(|| {
                anyhow::anyhow!("provider.api_key is required when provider.kind = \"external\"")
            })?;
            Arc::new(ExternalModelProvider::new(
                config.provider.endpoint.clone(),
                api_key,
                config.provider.model.clone(),
                Duration::from_secs(config.provider.timeout_secs),
            )?)
        }
    };
    info!("Lyric provider: {}", provider.name());

    if config.checkout.endpoint.is_none() {
        warn!("Payment collaborator not configured; checkout sessions will be refused");
    }
    let checkout = Arc::new(CheckoutClient::new(config.checkout.endpoint.clone())?);

    let state = AppState::new(registry, provider, checkout);
    let app = build_router(state);

    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("finisher-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
