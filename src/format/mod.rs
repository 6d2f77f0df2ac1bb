//! Formatting of raw API values for display.
//!
//! # Responsibilities
//! - Canonical address rendering from the transport encoding
//! - Relative ages and UTC reporting periods
//! - Byte sizes, and quota sizes that survive a decode/encode round trip
//!
//! All functions are pure. Callers pass the reference time explicitly.

pub mod address;
pub mod age;
pub mod domain;
pub mod period;
pub mod size;

pub use address::{decode_address, format_address, Address, DecodeError};
pub use age::{format_age, format_delta};
pub use domain::{domain_name, domain_string, ip_domain_string};
pub use period::{format_period, format_period_title};
pub use size::{decode_quota_size, encode_quota_size, format_byte_size, InvalidSizeError};
