//! Lyric provider capability
//!
//! A provider turns a validated `GenerationRequest` into lyric text.
//! Implementations must be stateless across calls (or guard any cache
//! behind explicit concurrency control) and must map failures to typed
//! errors, never panic.

use async_trait::async_trait;

use finisher_common::params::GenerationRequest;
use finisher_common::Result;

pub mod deterministic;
pub mod external;

pub use deterministic::DeterministicProvider;
pub use external::ExternalModelProvider;

/// Lyric generation capability - all providers implement this
#[async_trait]
pub trait LyricProvider: Send + Sync {
    /// Provider identifier (e.g. "deterministic", "external"), echoed in
    /// generation responses
    fn name(&self) -> &'static str;

    /// Produce lyric text for a validated request
    ///
    /// Generation is treated as a pure function of the request, so callers
    /// may retry idempotently. Failures surface as `Error::Provider`;
    /// exceeding the provider's time budget as `Error::ProviderTimeout`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
