//! Common error types for The Finisher

use thiserror::Error;

/// Common result type for Finisher operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared across the backend
///
/// Every error is typed and carried to the HTTP boundary; nothing is
/// swallowed into a generic success response. The boundary layer maps
/// each variant to a status code (validation 400, entitlement 403,
/// unknown plan 404, provider failure 502, provider timeout 504).
#[derive(Error, Debug)]
pub enum Error {
    /// Client sent an invalid or missing request parameter
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Plan does not include the required feature
    #[error("Plan '{plan_id}' does not include feature '{feature}'")]
    Entitlement { plan_id: String, feature: String },

    /// Unknown plan id referenced
    #[error("Unknown plan: {0}")]
    PlanNotFound(String),

    /// Lyric generation backend failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Lyric generation backend exceeded its time budget
    #[error("Provider timed out: {0}")]
    ProviderTimeout(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
