//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, RPC client, views produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG)
//!     → any metrics recorder the embedding program installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (location, method, outcome) instead of formatted strings
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
