//! Mail server admin console library

pub mod config;
pub mod display;
pub mod format;
pub mod observability;
pub mod report;
pub mod resilience;
pub mod routing;
pub mod rpc;
pub mod session;
pub mod views;

pub use config::schema::ConsoleConfig;
pub use routing::Navigator;
pub use rpc::HttpAdminClient;
pub use views::ConsoleViews;
