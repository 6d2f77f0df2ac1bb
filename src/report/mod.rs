//! Report tables.
//!
//! # Data Flow
//! ```text
//! RPC schema (DomainFeedback, TlsReportRecord, TlsResult, Evaluation, summaries)
//!     → adapters (dmarc.rs, tlsrpt.rs, evaluations.rs, summary.rs, mtasts.rs)
//!     → table.rs: three-level Report tree flattened with row spans
//!       or merge.rs: flat rows with repeated values blanked
//!     → display::Table
//! ```
//!
//! # Design Decisions
//! - Rendering is generic over the three levels; adapters only build cells
//! - Every rendered row expands to the full table width
//! - The merge fold takes and returns its last-seen state explicitly

pub mod dmarc;
pub mod evaluations;
pub mod merge;
pub mod mtasts;
pub mod summary;
pub mod table;
pub mod tlsrpt;

pub use merge::{merge_unchanged, LastSeen};
pub use table::{render, Layout, PolicyResult, Report};
