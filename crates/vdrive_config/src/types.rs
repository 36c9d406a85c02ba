//! Configuration types deserialized from `vdrive.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level harness configuration parsed from `vdrive.toml`.
///
/// Every section is optional and falls back to its [`Default`].
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Driver loop policy.
    pub run: RunConfig,
    /// Log filter defaults.
    pub log: LogConfig,
    /// Matrix-multiply testbench geometry and memory image paths.
    pub testbench: TestbenchConfig,
    /// Input stimulus generation settings.
    pub stimulus: StimulusConfig,
    /// Result checking tolerances.
    pub check: CheckConfig,
}

/// Driver loop policy.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    /// Maximum number of evaluations before the run is aborted.
    /// `None` lets a design run until it finishes, however long that takes.
    pub max_cycles: Option<u64>,
}

/// Default logging settings, overridden by `RUST_LOG` when set.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// The most verbose level emitted.
    pub level: LogLevel,
}

/// Log verbosity level.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Failures only.
    Error,
    /// Failures and warnings.
    Warn,
    /// Run start and finish (default).
    #[default]
    Info,
    /// Lifecycle details such as teardown.
    Debug,
    /// Every loop iteration.
    Trace,
}

impl LogLevel {
    /// Returns the level as an `env_logger` filter string.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Geometry and file locations for the matrix-multiply testbench.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestbenchConfig {
    /// Edge length N of the square N×N operand matrices.
    pub matrix_dim: usize,
    /// Edge length of the square tiles the input image is laid out in.
    pub tile_dim: usize,
    /// Input memory image: Aᵀ tiles followed by B tiles.
    pub input: PathBuf,
    /// Result memory image written when the run completes.
    pub output: PathBuf,
}

impl Default for TestbenchConfig {
    fn default() -> Self {
        Self {
            matrix_dim: 16,
            tile_dim: 16,
            input: PathBuf::from("input_mem.csv"),
            output: PathBuf::from("result_mem.csv"),
        }
    }
}

/// Settings for generating random sparse int8 operands.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StimulusConfig {
    /// Seed for the deterministic random generator.
    pub seed: u64,
    /// Fraction of elements that are non-zero, in `[0, 1]`.
    pub non_zero_ratio: f64,
    /// Smallest generated value (inclusive).
    pub min_value: i8,
    /// Largest generated value (exclusive).
    pub max_value: i8,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            non_zero_ratio: 0.35,
            min_value: -10,
            max_value: 10,
        }
    }
}

/// Tolerances used when comparing the design's result to the golden model.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CheckConfig {
    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-4,
            atol: 1e-5,
        }
    }
}
