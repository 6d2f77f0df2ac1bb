//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location ("#domains/example.org/dmarc")
//!     → navigator.rs (single-flight, current marker)
//!     → router.rs (strip '#', split on '/', ordered lookup)
//!     → matcher.rs (evaluate segment matchers, capture values)
//!     → Page, or no match ("not found" page)
//!
//! Route Table Construction (at startup):
//!     Route[] in declaration order
//!     → pairwise ambiguity check
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes are built once, immutable at runtime
//! - No regex: literal, integer and wildcard matchers only
//! - Deterministic: same location always resolves to the same page
//! - First match wins, and no two routes may match the same location

pub mod matcher;
pub mod navigator;
pub mod page;
pub mod router;

pub use navigator::{NavigationOutcome, Navigator, PageHandler, Surface};
pub use page::Page;
pub use router::{console_routes, RouteConflict, RouteTable};
