//! Lyric generation endpoint

use axum::{extract::State, Json};
use serde::Deserialize;

use finisher_common::params::RawGenerationRequest;

use crate::error::ApiResult;
use crate::service::GenerationResult;
use crate::AppState;

/// POST /api/lyrics/generate request body
///
/// `plan_id` is optional: when present, the request is gated on the
/// advanced-generation entitlement of that plan. Unknown extra fields
/// are ignored.
#[derive(Debug, Deserialize)]
pub struct GenerateLyricsRequest {
    #[serde(flatten)]
    pub params: RawGenerationRequest,
    pub plan_id: Option<String>,
}

/// POST /api/lyrics/generate
///
/// Returns `{lyrics, timestamp, provider}` on success; 400 with the
/// offending `field` on validation failure; 403 when the named plan lacks
/// the gated feature; 502/504 on provider failure or timeout.
pub async fn generate_lyrics(
    State(state): State<AppState>,
    Json(body): Json<GenerateLyricsRequest>,
) -> ApiResult<Json<GenerationResult>> {
    let result = state
        .service
        .handle_generate(&body.params, body.plan_id.as_deref())
        .await?;

    Ok(Json(result))
}
