//! `vdrive-gen` — write the input memory image.

use vdrive_config::HarnessConfig;
use vdrive_designs::{memfile, stimulus, Geometry};

use crate::CommandResult;

/// Generates the operands from the configured seed and writes the image.
pub fn run(config: &HarnessConfig) -> CommandResult {
    let geometry = Geometry::from_config(&config.testbench)?;
    let stim = stimulus::generate(&geometry, &config.stimulus)?;
    let words = stim.input_words();
    memfile::write_words(&config.testbench.input, &words)?;
    log::info!(
        "wrote {} words ({}x{} operands, seed {}) to {}",
        words.len(),
        geometry.matrix_dim(),
        geometry.matrix_dim(),
        config.stimulus.seed,
        config.testbench.input.display()
    );
    Ok(0)
}
