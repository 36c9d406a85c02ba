//! `vdrive` — run `testbench_top` under the driver loop.
//!
//! Builds the design from the configured input image, evaluates it until it
//! raises finish (or the optional cycle limit is hit), and reports the final
//! simulation time.

use vdrive_config::HarnessConfig;
use vdrive_designs::TestbenchTop;
use vdrive_sim::Driver;

use crate::CommandResult;

/// Runs the simulation. Returns exit code 0 once the design has finished;
/// every failure is propagated as an error.
pub fn run(config: &HarnessConfig) -> CommandResult {
    let driver = Driver::new().with_cycle_limit(config.run.max_cycles);
    match driver.max_cycles() {
        Some(limit) => log::info!("cycle limit: {limit} evaluations"),
        None => log::debug!("no cycle limit"),
    }
    let summary = driver
        .run(|ctx| TestbenchTop::boxed(ctx, &config.testbench))
        .map_err(|e| {
            if let Some(time) = e.time() {
                log::error!("simulation stopped at {time}");
            }
            e
        })?;
    log::info!(
        "{} finished at {} after {} evaluations; results in {}",
        summary.design,
        summary.final_time,
        summary.evaluations,
        config.testbench.output.display()
    );
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdrive_designs::{memfile, stimulus, Geometry};

    fn config_in(dir: &std::path::Path) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        config.testbench.input = dir.join("input_mem.csv");
        config.testbench.output = dir.join("result_mem.csv");
        config
    }

    #[test]
    fn simulates_generated_image() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let geometry = Geometry::from_config(&config.testbench).unwrap();
        let stim = stimulus::generate(&geometry, &config.stimulus).unwrap();
        memfile::write_words(&config.testbench.input, &stim.input_words()).unwrap();

        assert_eq!(run(&config).unwrap(), 0);
        let words = memfile::read_words(&config.testbench.output).unwrap();
        assert_eq!(words.len(), geometry.result_words());
    }

    #[test]
    fn missing_image_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&config_in(dir.path())).unwrap_err();
        assert!(err.to_string().contains("failed to construct design"));
    }

    #[test]
    fn cycle_limit_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        let geometry = Geometry::from_config(&config.testbench).unwrap();
        let stim = stimulus::generate(&geometry, &config.stimulus).unwrap();
        memfile::write_words(&config.testbench.input, &stim.input_words()).unwrap();
        config.run.max_cycles = Some(4);

        let err = run(&config).unwrap_err();
        assert!(err.to_string().contains("cycle limit of 4"));
    }
}
