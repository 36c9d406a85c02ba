//! Parsing and validation of `vdrive.toml` harness configuration files.
//!
//! This crate reads the optional configuration file from the working
//! directory and produces a strongly-typed [`HarnessConfig`]. Every section
//! and field has a default, so a missing file or an empty one is valid.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_config_or_default, CONFIG_FILE_NAME};
pub use types::*;
