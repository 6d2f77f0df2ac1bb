//! Client session state kept between runs.

pub mod token;

pub use token::TokenStore;
