//! Configuration types
//!
//! Startup configuration and the TOML-subset parser that reads it.

pub mod parse;
pub mod types;

pub use parse::parse_config;
pub use types::*;
