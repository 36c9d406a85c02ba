//! `testbench_top`: the matrix-multiply engine wrapped in its testbench.
//!
//! The testbench loads the input memory image at construction, derives its
//! clock from simulation time, and on each rising edge clocks the engine.
//! When the engine drains, the testbench dumps the result memory image and
//! raises the finish flag.

use std::path::PathBuf;

use vdrive_config::TestbenchConfig;
use vdrive_sim::{Dut, EvalError, SimContext};

use crate::error::DesignError;
use crate::layout::Geometry;
use crate::matmul::{MatmulCore, Phase};
use crate::memfile;

/// Native model of the `testbench_top` design.
#[derive(Debug)]
pub struct TestbenchTop<'ctx> {
    ctx: &'ctx SimContext,
    core: MatmulCore,
    output: PathBuf,
    clk: bool,
}

impl<'ctx> TestbenchTop<'ctx> {
    /// Design name reported to the driver.
    pub const NAME: &'static str = "testbench_top";

    /// Builds the testbench, reading the input image named in `config`.
    pub fn new(ctx: &'ctx SimContext, config: &TestbenchConfig) -> Result<Self, DesignError> {
        let geometry = Geometry::from_config(config)?;
        let words = memfile::read_words(&config.input)?;
        log::info!(
            "loaded {} input words from {}",
            words.len(),
            config.input.display()
        );
        let core = MatmulCore::new(geometry, &words)?;
        Ok(Self::with_core(ctx, core, config.output.clone()))
    }

    /// Builds the testbench as a boxed design, the form
    /// [`Driver::run`](vdrive_sim::Driver::run) expects from its factory.
    pub fn boxed(
        ctx: &'ctx SimContext,
        config: &TestbenchConfig,
    ) -> Result<Box<dyn Dut + 'ctx>, DesignError> {
        Ok(Box::new(Self::new(ctx, config)?))
    }

    /// Builds the testbench around an already-loaded engine.
    pub fn with_core(ctx: &'ctx SimContext, core: MatmulCore, output: PathBuf) -> Self {
        Self {
            ctx,
            core,
            output,
            clk: ctx.time().is_clock_high(),
        }
    }

    /// The wrapped engine.
    pub fn core(&self) -> &MatmulCore {
        &self.core
    }

    fn dump_results(&self) -> Result<(), EvalError> {
        memfile::write_words(&self.output, self.core.result_words()).map_err(|e| {
            EvalError::with_source(
                format!("cannot dump result memory to {}", self.output.display()),
                e,
            )
        })?;
        log::info!(
            "wrote {} result words to {}",
            self.core.result_words().len(),
            self.output.display()
        );
        Ok(())
    }
}

impl Dut for TestbenchTop<'_> {
    fn eval(&mut self) -> Result<(), EvalError> {
        let clk = self.ctx.time().is_clock_high();
        let rising = clk && !self.clk;
        self.clk = clk;
        if !rising {
            return Ok(());
        }

        match self.core.phase() {
            Phase::Done => Err(EvalError::new("clocked after $finish")),
            Phase::Drain => {
                self.dump_results()?;
                self.core.clock();
                self.ctx.set_finish();
                Ok(())
            }
            Phase::Reset | Phase::Compute => {
                self.core.clock();
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
