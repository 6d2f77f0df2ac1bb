//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the console.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the admin console.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Admin API endpoint settings.
    pub api: ApiConfig,

    /// Retry configuration for read-only API calls.
    pub retries: RetryConfig,

    /// Persisted session state.
    pub session: SessionConfig,

    /// Report views.
    pub reports: ReportsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Admin API endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API; method names are appended (e.g., ".../api/Domains").
    pub base_url: String,

    /// Header carrying the session token.
    pub csrf_header: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/admin/api/".to_string(),
            csrf_header: "x-mox-csrf".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Enable retries.
    pub enabled: bool,

    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 3,
            base_delay_ms: 200,
            max_delay_ms: 2000,
        }
    }
}

/// Session state configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the session token. No file means no persisted session.
    pub token_path: Option<String>,
}

/// Report view configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportsConfig {
    /// Number of days back that report listings cover.
    pub period_days: i64,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self { period_days: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error), overridden by RUST_LOG.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}
