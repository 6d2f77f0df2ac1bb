//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for the binaries
//! - Pick the filter from RUST_LOG, falling back to the configured level
//!
//! # Design Decisions
//! - Logs go to stderr; stdout is reserved for rendered views
//! - Only this crate logs at the configured level, dependencies stay at warn

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when RUST_LOG is not set.
pub fn default_directive(level: &str) -> String {
    format!("mail_admin_console={level},admin_cli={level},warn")
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
