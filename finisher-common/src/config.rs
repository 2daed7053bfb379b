//! Configuration loading
//!
//! Resolution priority for the config file path:
//! 1. Command-line argument (highest priority)
//! 2. `FINISHER_CONFIG` environment variable
//! 3. Platform config directory (`<config dir>/finisher/config.toml`)
//!
//! A missing config file never aborts startup: a warning is logged and the
//! compiled defaults are used. An unreadable or unparseable file is an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::plans::PlanDefinition;
use crate::{Error, Result};

/// Which lyric provider to wire into the generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Deterministic reference generator (no external dependency)
    #[default]
    Deterministic,
    /// External generative-model endpoint
    External,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// `[provider]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    /// Chat-completions endpoint for the external provider
    pub endpoint: Option<String>,
    /// API key for the external provider (required when kind = "external")
    pub api_key: Option<String>,
    /// Model name for the external provider
    pub model: Option<String>,
    /// Request time budget for the external provider
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Deterministic,
            endpoint: None,
            api_key: None,
            model: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// `[checkout]` section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutConfig {
    /// Payment collaborator endpoint creating checkout sessions.
    /// When absent, /api/create-checkout-session reports the collaborator
    /// as unavailable.
    pub endpoint: Option<String>,
}

/// TOML configuration file schema
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub checkout: CheckoutConfig,
    /// Optional plan catalog override. Must define all six tiers; replaces
    /// the compiled-in catalog as a whole.
    pub plans: Option<Vec<PlanDefinition>>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    10
}

/// Resolve the config file path
///
/// Returns `None` when no candidate exists, in which case compiled
/// defaults apply.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("FINISHER_CONFIG") {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|d| d.join("finisher").join("config.toml"))
        .filter(|p| p.exists())
}

/// Load configuration, degrading gracefully when the file is absent
pub fn load_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!(
            "Config file not found: {} (using compiled defaults)",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))
}
