//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to load configuration from disk.

mod error;
mod load;
mod schema;

pub use error::ConfigError;
pub use load::{default_config_path, resolve_config_path};
pub use schema::*;
