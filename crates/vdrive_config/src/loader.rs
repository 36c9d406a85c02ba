//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::HarnessConfig;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "vdrive.toml";

/// Loads and validates `vdrive.toml` from a directory.
///
/// Reads `<dir>/vdrive.toml`, parses it, and validates the values.
pub fn load_config(dir: &Path) -> Result<HarnessConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Loads `vdrive.toml` from a directory, or returns the defaults when the
/// file does not exist.
///
/// A file that exists but cannot be read or parsed is still an error.
pub fn load_config_or_default(dir: &Path) -> Result<HarnessConfig, ConfigError> {
    if dir.join(CONFIG_FILE_NAME).is_file() {
        load_config(dir)
    } else {
        Ok(HarnessConfig::default())
    }
}

/// Parses and validates a `vdrive.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<HarnessConfig, ConfigError> {
    let config: HarnessConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are in range and mutually consistent.
fn validate_config(config: &HarnessConfig) -> Result<(), ConfigError> {
    if config.run.max_cycles == Some(0) {
        return Err(invalid("run.max_cycles", "must be greater than zero"));
    }

    let tb = &config.testbench;
    if tb.matrix_dim == 0 {
        return Err(invalid("testbench.matrix_dim", "must be greater than zero"));
    }
    if tb.tile_dim == 0 {
        return Err(invalid("testbench.tile_dim", "must be greater than zero"));
    }
    if tb.matrix_dim % tb.tile_dim != 0 {
        return Err(invalid(
            "testbench.tile_dim",
            format!(
                "{} does not divide matrix_dim {}",
                tb.tile_dim, tb.matrix_dim
            ),
        ));
    }
    if (tb.tile_dim * tb.tile_dim) % 8 != 0 {
        return Err(invalid(
            "testbench.tile_dim",
            "a tile must hold a whole number of 8-element input words",
        ));
    }
    if tb.matrix_dim % 4 != 0 {
        return Err(invalid(
            "testbench.matrix_dim",
            "a row must hold a whole number of 4-element result words",
        ));
    }

    let st = &config.stimulus;
    if !(0.0..=1.0).contains(&st.non_zero_ratio) {
        return Err(invalid("stimulus.non_zero_ratio", "must lie in [0, 1]"));
    }
    if st.min_value >= st.max_value {
        return Err(invalid(
            "stimulus.min_value",
            format!("{} is not below max_value {}", st.min_value, st.max_value),
        ));
    }

    let ck = &config.check;
    if !(ck.rtol >= 0.0) {
        return Err(invalid("check.rtol", "must be non-negative"));
    }
    if !(ck.atol >= 0.0) {
        return Err(invalid("check.atol", "must be non-negative"));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogLevel;
    use std::path::PathBuf;

    #[test]
    fn parse_empty_config() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, HarnessConfig::default());
        assert_eq!(config.run.max_cycles, None);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[run]
max_cycles = 5000

[log]
level = "trace"

[testbench]
matrix_dim = 32
tile_dim = 16
input = "build/in.hex"
output = "build/out.hex"

[stimulus]
seed = 7
non_zero_ratio = 0.5
min_value = -4
max_value = 4

[check]
rtol = 1e-3
atol = 0.0
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.run.max_cycles, Some(5000));
        assert_eq!(config.log.level, LogLevel::Trace);
        assert_eq!(config.testbench.matrix_dim, 32);
        assert_eq!(config.testbench.tile_dim, 16);
        assert_eq!(config.testbench.input, PathBuf::from("build/in.hex"));
        assert_eq!(config.stimulus.seed, 7);
        assert_eq!(config.stimulus.min_value, -4);
        assert_eq!(config.check.atol, 0.0);
    }

    #[test]
    fn partial_section_keeps_defaults() {
        let config = load_config_from_str("[testbench]\nmatrix_dim = 32\ntile_dim = 32\n").unwrap();
        assert_eq!(config.testbench.matrix_dim, 32);
        assert_eq!(config.testbench.output, PathBuf::from("result_mem.csv"));
        assert_eq!(config.stimulus.seed, 42);
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn unknown_log_level_errors() {
        let err = load_config_from_str("[log]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn zero_cycle_limit_rejected() {
        let err = load_config_from_str("[run]\nmax_cycles = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError {
                field: "run.max_cycles",
                ..
            }
        ));
    }

    #[test]
    fn tile_must_divide_matrix() {
        let err = load_config_from_str("[testbench]\nmatrix_dim = 24\ntile_dim = 16\n").unwrap_err();
        assert!(err.to_string().contains("does not divide"));
    }

    #[test]
    fn tile_must_pack_into_words() {
        let err = load_config_from_str("[testbench]\nmatrix_dim = 12\ntile_dim = 6\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError {
                field: "testbench.tile_dim",
                ..
            }
        ));
    }

    #[test]
    fn stimulus_range_checked() {
        let err = load_config_from_str("[stimulus]\nmin_value = 3\nmax_value = 3\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError {
                field: "stimulus.min_value",
                ..
            }
        ));
        let err = load_config_from_str("[stimulus]\nnon_zero_ratio = 1.5\n").unwrap_err();
        assert!(err.to_string().contains("non_zero_ratio"));
    }

    #[test]
    fn negative_tolerance_rejected() {
        let err = load_config_from_str("[check]\nrtol = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("check.rtol"));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[run]\nmax_cycles = 10\n").unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.run.max_cycles, Some(10));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_or_default(dir.path()).unwrap();
        assert_eq!(config, HarnessConfig::default());
    }

    #[test]
    fn broken_file_is_not_replaced_by_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[run\n").unwrap();
        assert!(load_config_or_default(dir.path()).is_err());
    }
}
