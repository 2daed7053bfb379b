//! Subscription plan catalog endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use finisher_common::plans::{PlanDefinition, PlanId};

use crate::AppState;

/// Entry in the GET /api/plans response
///
/// Canonical flat shape: `{id, price_cents, duration_days, features}`.
/// The catalog is served as an ordered array so every consumer sees the
/// same fixed ascending-duration tier order.
#[derive(Debug, Serialize)]
pub struct PlanEntry {
    pub id: PlanId,
    pub price_cents: u32,
    pub duration_days: u32,
    pub features: Vec<String>,
}

impl From<&PlanDefinition> for PlanEntry {
    fn from(plan: &PlanDefinition) -> Self {
        Self {
            id: plan.id,
            price_cents: plan.price_cents,
            duration_days: plan.duration_days,
            features: plan.features.iter().cloned().collect(),
        }
    }
}

/// GET /api/plans (also served at /api/subscriptions)
pub async fn list_plans(State(state): State<AppState>) -> Json<Vec<PlanEntry>> {
    Json(state.registry.list().iter().map(PlanEntry::from).collect())
}
