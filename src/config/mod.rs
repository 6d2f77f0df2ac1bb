//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ConsoleConfig (validated, immutable)
//!     → CLI flags override selected fields in the binaries
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the console runs without a file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ApiConfig;
pub use schema::ConsoleConfig;
pub use schema::ObservabilityConfig;
pub use schema::ReportsConfig;
pub use schema::RetryConfig;
pub use schema::SessionConfig;
