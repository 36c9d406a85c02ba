//! vdrive CLI — entry points for the vdrive simulation harness.
//!
//! Three binaries share this library: `vdrive` runs `testbench_top` under the
//! driver loop, `vdrive-gen` writes the input memory image, and
//! `vdrive-check` compares the result image with the golden product. None of
//! them takes arguments; settings come from `vdrive.toml` in the working
//! directory, and `RUST_LOG` overrides the configured log level.

#![warn(missing_docs)]

pub mod check;
pub mod generate;
pub mod sim;

use std::error::Error;
use std::path::Path;
use std::process;

use vdrive_config::{ConfigError, HarnessConfig, LogLevel};

/// Result type shared by the commands: an exit code or a reportable error.
pub type CommandResult = Result<i32, Box<dyn Error>>;

/// Loads the configuration for `dir` and resolves its relative memory-image
/// paths against `dir`.
pub fn load_config(dir: &Path) -> Result<HarnessConfig, ConfigError> {
    let mut config = vdrive_config::load_config_or_default(dir)?;
    config.testbench.input = dir.join(&config.testbench.input);
    config.testbench.output = dir.join(&config.testbench.output);
    Ok(config)
}

/// Installs the `env_logger` backend. `RUST_LOG` wins over `level`.
pub fn init_logging(level: LogLevel) {
    let env = env_logger::Env::default().default_filter_or(level.as_filter());
    // A logger may already be installed (e.g. by a test harness).
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Runs a command against the working directory and exits the process with
/// its code. Errors are printed to stderr and exit with 1.
pub fn main_with(command: fn(&HarnessConfig) -> CommandResult) -> ! {
    let result = std::env::current_dir()
        .map_err(Box::<dyn Error>::from)
        .and_then(|dir| load_config(&dir).map_err(Box::<dyn Error>::from))
        .and_then(|config| {
            init_logging(config.log.level);
            command(&config)
        });

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
