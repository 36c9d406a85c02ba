//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `vdrive.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A configuration value failed validation.
    #[error("invalid value for {field}: {reason}")]
    ValidationError {
        /// Dotted path of the offending key, e.g. `testbench.tile_dim`.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
