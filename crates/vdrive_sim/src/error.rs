//! Simulation error types for the cycle driver.
//!
//! Every fault is fatal to the run: the driver never retries an evaluation.
//! [`EvalError`] is what a design model reports from a single evaluation;
//! [`SimError`] is what the driver hands back to its caller.

use crate::time::SimTime;

/// A boxed error from a design model or its collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure raised while re-settling a design's state.
///
/// Design models return this from [`Dut::eval`](crate::dut::Dut::eval) for
/// malformed model state, violated internal invariants, or failed I/O in a
/// testbench task.
#[derive(Debug, thiserror::Error)]
#[error("{reason}")]
pub struct EvalError {
    reason: String,
    #[source]
    source: Option<BoxError>,
}

impl EvalError {
    /// Creates an evaluation error with the given description.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            source: None,
        }
    }

    /// Creates an evaluation error that wraps an underlying cause.
    pub fn with_source(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the description of what went wrong.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Errors that end a simulation run.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The design model could not be constructed against the context.
    #[error("failed to construct design: {source}")]
    Construction {
        /// The underlying construction failure.
        #[source]
        source: BoxError,
    },

    /// An evaluation step failed. Time was not advanced for this iteration.
    #[error("evaluation of '{design}' failed at {time} (iteration {iteration}): {source}")]
    Evaluation {
        /// Name of the design being evaluated.
        design: String,
        /// Simulation time at which the failing evaluation ran.
        time: SimTime,
        /// One-based index of the failing iteration.
        iteration: u64,
        /// The failure reported by the design.
        #[source]
        source: EvalError,
    },

    /// The run reached its configured cycle bound without a finish signal.
    #[error("cycle limit of {limit} reached at {time} without finish")]
    CycleLimitExceeded {
        /// The configured maximum number of evaluations.
        limit: u64,
        /// Simulation time when the bound was hit.
        time: SimTime,
    },
}

impl SimError {
    /// Returns the simulation time at which the run stopped, if the error
    /// occurred after the loop started.
    pub fn time(&self) -> Option<SimTime> {
        match self {
            SimError::Construction { .. } => None,
            SimError::Evaluation { time, .. } | SimError::CycleLimitExceeded { time, .. } => {
                Some(*time)
            }
        }
    }
}
