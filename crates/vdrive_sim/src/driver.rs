//! The cycle driver: evaluate, advance, check, repeat.
//!
//! [`Driver::run`] owns a [`SimContext`] and the design built against it for
//! the whole run. Each iteration evaluates the design, advances time by one
//! unit, then re-checks the finish flag, so a finish raised during an
//! evaluation is seen before another evaluation can start. When the loop
//! ends (normally or on error) the design is dropped before the context.

use serde::Serialize;

use crate::context::SimContext;
use crate::dut::Dut;
use crate::error::{BoxError, SimError};
use crate::time::SimTime;

/// Control state of the driver loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// More iterations will run.
    Running,
    /// The finish flag was observed; no further evaluations happen.
    Done,
}

/// Outcome of a run that reached the finish signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Name reported by the design.
    pub design: String,
    /// Simulation time when the loop stopped.
    pub final_time: SimTime,
    /// Number of completed evaluations.
    pub evaluations: u64,
}

/// Drives a design model until it signals completion.
///
/// A driver is cheap to build and holds only run policy; every call to
/// [`run`](Self::run) creates a fresh context.
#[derive(Clone, Copy, Debug, Default)]
pub struct Driver {
    max_cycles: Option<u64>,
}

impl Driver {
    /// Creates a driver with no cycle bound. A design that never finishes
    /// keeps the loop running forever.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the run to at most `limit` evaluations. Reaching the bound
    /// without a finish signal yields [`SimError::CycleLimitExceeded`].
    pub fn with_max_cycles(mut self, limit: u64) -> Self {
        self.max_cycles = Some(limit);
        self
    }

    /// Applies an optional bound, as read from configuration.
    pub fn with_cycle_limit(mut self, limit: Option<u64>) -> Self {
        self.max_cycles = limit;
        self
    }

    /// Returns the configured cycle bound, if any.
    pub fn max_cycles(&self) -> Option<u64> {
        self.max_cycles
    }

    /// Runs one simulation from a fresh context.
    ///
    /// `build` constructs the design against the context; the design may keep
    /// the reference for its whole life. After the loop ends the design is
    /// dropped first and the context second.
    pub fn run<F, E>(&self, build: F) -> Result<RunSummary, SimError>
    where
        F: for<'ctx> FnOnce(&'ctx SimContext) -> Result<Box<dyn Dut + 'ctx>, E>,
        E: Into<BoxError>,
    {
        let ctx = SimContext::new();
        let mut dut = build(&ctx).map_err(|e| {
            let source = e.into();
            log::error!("design construction failed: {source}");
            SimError::Construction { source }
        })?;

        let outcome = self.drive(&ctx, &mut *dut);

        let name = dut.name().to_string();
        drop(dut);
        log::debug!("released design '{name}'");
        drop(ctx);
        log::debug!("released simulation context");

        outcome
    }

    /// Runs the loop on a design that the caller owns together with its
    /// context.
    ///
    /// The caller is responsible for dropping `dut` before `ctx`; the borrow
    /// checker enforces this when `dut` holds a reference to `ctx`.
    pub fn drive<D>(&self, ctx: &SimContext, dut: &mut D) -> Result<RunSummary, SimError>
    where
        D: Dut + ?Sized,
    {
        log::info!("simulating '{}' from {}", dut.name(), ctx.time());

        let mut evaluations = 0u64;
        while step(ctx, dut, &mut evaluations, self.max_cycles)? == DriverState::Running {}

        log::info!(
            "'{}' finished at {} after {} evaluations",
            dut.name(),
            ctx.time(),
            evaluations
        );
        Ok(RunSummary {
            design: dut.name().to_string(),
            final_time: ctx.time(),
            evaluations,
        })
    }
}

/// Executes one loop iteration, or reports [`DriverState::Done`] if the
/// finish flag is already up.
fn step<D>(
    ctx: &SimContext,
    dut: &mut D,
    evaluations: &mut u64,
    max_cycles: Option<u64>,
) -> Result<DriverState, SimError>
where
    D: Dut + ?Sized,
{
    if ctx.got_finish() {
        return Ok(DriverState::Done);
    }

    if let Some(limit) = max_cycles {
        if *evaluations >= limit {
            log::error!("'{}' hit the cycle limit of {limit}", dut.name());
            return Err(SimError::CycleLimitExceeded {
                limit,
                time: ctx.time(),
            });
        }
    }

    let iteration = *evaluations + 1;
    if let Err(source) = dut.eval() {
        log::error!(
            "'{}' failed at {} (iteration {iteration}): {source}",
            dut.name(),
            ctx.time()
        );
        return Err(SimError::Evaluation {
            design: dut.name().to_string(),
            time: ctx.time(),
            iteration,
            source,
        });
    }
    *evaluations = iteration;

    ctx.time_inc(1);
    log::trace!("iteration {iteration} done, now {}", ctx.time());

    Ok(if ctx.got_finish() {
        DriverState::Done
    } else {
        DriverState::Running
    })
}
