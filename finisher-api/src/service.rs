//! Generation orchestration
//!
//! The only place where validation, entitlement, and provider invocation
//! meet. Each call is stateless and independent; the service holds only
//! shared read-only handles, so unbounded concurrent invocations are safe.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use finisher_common::params::{self, RawGenerationRequest};
use finisher_common::plans::{PlanRegistry, FEATURE_ADVANCED_GENERATION};
use finisher_common::{Error, Result};

use crate::provider::LyricProvider;

/// Result of one generation call: produced once, returned, discarded
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub lyrics: String,
    /// UTC, RFC 3339, second precision
    pub timestamp: String,
    /// Which provider produced the text
    pub provider: String,
}

/// Orchestrates validation, entitlement checks, and provider invocation
#[derive(Clone)]
pub struct GenerationService {
    registry: Arc<PlanRegistry>,
    provider: Arc<dyn LyricProvider>,
}

impl GenerationService {
    pub fn new(registry: Arc<PlanRegistry>, provider: Arc<dyn LyricProvider>) -> Self {
        Self { registry, provider }
    }

    /// Handle one generation request
    ///
    /// 1. Validate parameters (fail fast, offending field named)
    /// 2. When a plan id accompanies the request, require the
    ///    advanced-generation entitlement; a missing feature is reported
    ///    explicitly, never silently degraded
    /// 3. Invoke the configured provider (no retries at this layer)
    /// 4. Stamp the result with the current UTC time
    pub async fn handle_generate(
        &self,
        raw: &RawGenerationRequest,
        plan_id: Option<&str>,
    ) -> Result<GenerationResult> {
        let request = params::validate(raw)?;

        if let Some(plan_id) = plan_id {
            if !self.registry.grants(plan_id, FEATURE_ADVANCED_GENERATION) {
                return Err(Error::Entitlement {
                    plan_id: plan_id.to_string(),
                    feature: FEATURE_ADVANCED_GENERATION.to_string(),
                });
            }
        }

        tracing::debug!(
            genre = %request.genre,
            bpm = request.bpm,
            provider = self.provider.name(),
            "Generating lyrics"
        );

        let lyrics = self.provider.generate(&request).await?;

        Ok(GenerationResult {
            lyrics,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            provider: self.provider.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::DeterministicProvider;
    use serde_json::json;

    fn service() -> GenerationService {
        GenerationService::new(
            Arc::new(PlanRegistry::default()),
            Arc::new(DeterministicProvider::new()),
        )
    }

    fn raw_request() -> RawGenerationRequest {
        RawGenerationRequest {
            genre: Some("hip-hop".to_string()),
            bpm: Some(json!(90)),
            mood: Some("energetic".to_string()),
            theme: Some("love".to_string()),
        }
    }

    #[tokio::test]
    async fn ungated_request_succeeds() {
        let result = service().handle_generate(&raw_request(), None).await.unwrap();
        assert!(!result.lyrics.is_empty());
        assert_eq!(result.provider, "deterministic");
        assert!(chrono::DateTime::parse_from_rfc3339(&result.timestamp).is_ok());
    }

    #[tokio::test]
    async fn validation_failure_names_field() {
        let mut raw = raw_request();
        raw.bpm = Some(json!(500));
        match service().handle_generate(&raw, None).await {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "bpm"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn entitled_plan_passes_gate() {
        let result = service()
            .handle_generate(&raw_request(), Some("quarterly"))
            .await
            .unwrap();
        assert!(!result.lyrics.is_empty());
    }

    #[tokio::test]
    async fn unentitled_plan_is_rejected() {
        match service().handle_generate(&raw_request(), Some("bi_weekly")).await {
            Err(Error::Entitlement { plan_id, feature }) => {
                assert_eq!(plan_id, "bi_weekly");
                assert_eq!(feature, FEATURE_ADVANCED_GENERATION);
            }
            other => panic!("expected entitlement error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_plan_fails_closed() {
        let result = service()
            .handle_generate(&raw_request(), Some("lifetime"))
            .await;
        assert!(matches!(result, Err(Error::Entitlement { .. })));
    }

    #[tokio::test]
    async fn validation_runs_before_entitlement() {
        let mut raw = raw_request();
        raw.genre = Some(String::new());
        match service().handle_generate(&raw, Some("lifetime")).await {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "genre"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
