//! finisher-api library - lyric generation and plan-gating service
//!
//! Hosts the HTTP surface consumed by the browser UI: lyric generation,
//! the subscription plan catalog, and checkout-session delegation.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use finisher_common::plans::PlanRegistry;

use crate::payments::CheckoutClient;
use crate::provider::LyricProvider;
use crate::service::GenerationService;

pub mod api;
pub mod error;
pub mod payments;
pub mod provider;
pub mod service;

/// Application state shared across HTTP handlers
///
/// Everything here is read-only after startup, so handlers share it
/// freely across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    /// Generation orchestration (validation, entitlement, provider)
    pub service: GenerationService,
    /// Immutable plan catalog
    pub registry: Arc<PlanRegistry>,
    /// Payment collaborator client
    pub checkout: Arc<CheckoutClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        registry: Arc<PlanRegistry>,
        provider: Arc<dyn LyricProvider>,
        checkout: Arc<CheckoutClient>,
    ) -> Self {
        Self {
            service: GenerationService::new(registry.clone(), provider),
            registry,
            checkout,
        }
    }
}

/// Build application router
///
/// The UI is served from a separate origin during development, so CORS is
/// permissive like the original deployment.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/lyrics/generate", post(api::generate_lyrics))
        .route("/api/plans", get(api::list_plans))
        .route("/api/subscriptions", get(api::list_plans))
        .route("/api/create-checkout-session", post(api::create_checkout_session))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
