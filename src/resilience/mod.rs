//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Read-only admin API call:
//!     → client.rs (per-call timeout)
//!     → On failure: retries.rs (check if retryable)
//!     → backoff.rs (jittered exponential delay) → next attempt
//! ```
//!
//! # Design Decisions
//! - Every call has a deadline
//! - Mutations are never retried
//! - Retries happen below the router; a navigation sees one outcome

pub mod backoff;
pub mod retries;
