//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, period > 0)
//! - Check the API base URL is usable

use std::fmt;

use url::Url;

use crate::config::schema::ConsoleConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the configuration, collecting every problem rather than the first.
pub fn validate_config(config: &ConsoleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut fail = |field: &'static str, message: String| {
        errors.push(ValidationError { field, message });
    };

    match Url::parse(&config.api.base_url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => fail("api.base_url", format!("unsupported scheme {:?}", url.scheme())),
        Err(e) => fail("api.base_url", e.to_string()),
    }

    if config.api.csrf_header.trim().is_empty() {
        fail("api.csrf_header", "must not be empty".to_string());
    }

    if config.api.timeout_secs == 0 {
        fail("api.timeout_secs", "must be greater than 0".to_string());
    }

    if config.retries.enabled && config.retries.max_attempts == 0 {
        fail("retries.max_attempts", "must be at least 1".to_string());
    }

    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        fail(
            "retries.base_delay_ms",
            "must not exceed retries.max_delay_ms".to_string(),
        );
    }

    if config.reports.period_days <= 0 {
        fail("reports.period_days", "must be greater than 0".to_string());
    }

    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        fail(
            "observability.log_level",
            format!("unknown level {:?}", config.observability.log_level),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
