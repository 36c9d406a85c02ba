//! Native design models run by the `vdrive_sim` driver, plus the stimulus
//! generator and result checker that surround them.
//!
//! The main design is [`TestbenchTop`], a cycle model of a tiled int8 matrix
//! multiply engine with bfloat16 results, wrapped in its testbench. It reads
//! its operands from a hex memory image, computes on the rising clock edges
//! derived from simulation time, dumps a result image and raises finish.
//!
//! # Modules
//!
//! - `testbench` — The `testbench_top` design
//! - `matmul` — The engine's cycle model
//! - `layout` — Geometry and word packing of the memory images
//! - `memfile` — Hex memory image reading and writing
//! - `stimulus` — Seeded sparse operand generation
//! - `check` — Golden-model comparison of a result image
//! - `matrix` — Square matrices and the `f32` reference product
//! - `bf16` — bfloat16 conversion
//! - `error` — Design error type

#![warn(missing_docs)]

pub mod bf16;
pub mod check;
pub mod error;
pub mod layout;
pub mod matmul;
pub mod matrix;
pub mod memfile;
pub mod stimulus;
pub mod testbench;

pub use check::{CheckReport, Mismatch};
pub use error::DesignError;
pub use layout::Geometry;
pub use matmul::{MatmulCore, Phase};
pub use matrix::Matrix;
pub use stimulus::Stimulus;
pub use testbench::TestbenchTop;
