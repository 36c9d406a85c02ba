//! Cycle model of the tiled int8 × int8 → bfloat16 matrix-multiply engine.
//!
//! [`MatmulCore`] is a pure state machine with no I/O. Each call to
//! [`MatmulCore::clock`] is one rising clock edge. After a one-cycle reset it
//! produces one result word (four adjacent elements of a row of C) per edge,
//! accumulating the int8 products in `f32` and rounding once to bfloat16.
//! Once every word is computed it sits in [`Phase::Drain`] until the
//! testbench has dumped the result memory, and the next edge moves it to
//! [`Phase::Done`].

use crate::bf16;
use crate::error::DesignError;
use crate::layout::{self, Geometry, BF16_PER_WORD};
use crate::matrix::{self, Matrix};

/// Control state of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Held in reset; the next edge starts computing.
    Reset,
    /// Producing one result word per edge.
    Compute,
    /// All results are in the result memory; waiting for the dump.
    Drain,
    /// Finished. Further edges are ignored.
    Done,
}

/// The engine: operand memories, result memory, and the word counter.
#[derive(Clone, Debug)]
pub struct MatmulCore {
    geometry: Geometry,
    a: Matrix<i8>,
    b: Matrix<i8>,
    result: Vec<u64>,
    phase: Phase,
    cycles: u64,
}

impl MatmulCore {
    /// Loads the engine's operand memories from an input image.
    pub fn new(geometry: Geometry, input_words: &[u64]) -> Result<Self, DesignError> {
        let (a, b) = layout::unpack_operands(&geometry, input_words)?;
        Ok(Self::from_operands(geometry, a, b))
    }

    /// Creates an engine from operand matrices directly.
    pub fn from_operands(geometry: Geometry, a: Matrix<i8>, b: Matrix<i8>) -> Self {
        debug_assert_eq!(a.dim(), geometry.matrix_dim());
        debug_assert_eq!(b.dim(), geometry.matrix_dim());
        Self {
            geometry,
            a,
            b,
            result: Vec::with_capacity(geometry.result_words()),
            phase: Phase::Reset,
            cycles: 0,
        }
    }

    /// Current control state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rising edges seen so far, including those ignored after `Done`.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// The result memory written so far, in image order.
    pub fn result_words(&self) -> &[u64] {
        &self.result
    }

    /// Geometry the engine was built for.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Applies one rising clock edge and returns the phase after it.
    pub fn clock(&mut self) -> Phase {
        self.cycles += 1;
        self.phase = match self.phase {
            Phase::Reset => {
                self.result.clear();
                Phase::Compute
            }
            Phase::Compute => {
                let word = self.compute_word(self.result.len());
                self.result.push(word);
                if self.result.len() == self.geometry.result_words() {
                    Phase::Drain
                } else {
                    Phase::Compute
                }
            }
            Phase::Drain | Phase::Done => Phase::Done,
        };
        self.phase
    }

    /// Computes result word `index`: four adjacent elements of one row.
    fn compute_word(&self, index: usize) -> u64 {
        let dim = self.geometry.matrix_dim();
        let words_per_row = dim / BF16_PER_WORD;
        let row = index / words_per_row;
        let col0 = (index % words_per_row) * BF16_PER_WORD;
        let mut lanes = [0u16; BF16_PER_WORD];
        for (lane, out) in lanes.iter_mut().enumerate() {
            *out = bf16::from_f32(matrix::dot_f32(&self.a, &self.b, row, col0 + lane));
        }
        layout::pack_result_word(&lanes)
    }
}
