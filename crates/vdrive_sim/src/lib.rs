//! Cycle-driven simulation driver for compiled hardware design models.
//!
//! This crate runs a design under test (DUT) against a simulation context:
//! the design is evaluated, time advances by one unit, and the loop repeats
//! until the design raises the finish flag.
//!
//! # Architecture
//!
//! The [`SimContext`] holds simulation time and the sticky finish flag. A
//! design implements [`Dut`] and borrows the context for its whole life,
//! which lets the compiler check that it is released before the context.
//! [`Driver`] owns both for the duration of a run and enforces the
//! evaluate → advance → check ordering.
//!
//! # Usage
//!
//! ```ignore
//! use vdrive_sim::Driver;
//!
//! let summary = Driver::new().run(|ctx| MyDesign::new(ctx).map(|d| Box::new(d) as _))?;
//! println!("finished at {}", summary.final_time);
//! ```
//!
//! # Modules
//!
//! - `time` — Discrete tick-count simulation time
//! - `context` — Time and finish-flag state shared with the design
//! - `dut` — The design-under-test trait
//! - `driver` — The evaluate/advance loop and its teardown ordering
//! - `error` — Evaluation and run error types

#![warn(missing_docs)]

pub mod context;
pub mod driver;
pub mod dut;
pub mod error;
pub mod time;

pub use context::SimContext;
pub use driver::{Driver, DriverState, RunSummary};
pub use dut::Dut;
pub use error::{BoxError, EvalError, SimError};
pub use time::SimTime;
