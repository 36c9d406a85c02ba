//! Random sparse int8 operands for the matrix-multiply testbench.
//!
//! Generation is deterministic for a given seed. Each matrix receives
//! `floor(N² · non_zero_ratio)` drawn values at shuffled positions; when the
//! value range straddles zero, the first half of the drawn values is forced
//! strictly negative so both signs are exercised.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use vdrive_config::StimulusConfig;

use crate::error::DesignError;
use crate::layout::{self, Geometry};
use crate::matrix::Matrix;

/// A pair of operands and the geometry they were generated for.
#[derive(Clone, Debug, PartialEq)]
pub struct Stimulus {
    /// Left operand.
    pub a: Matrix<i8>,
    /// Right operand.
    pub b: Matrix<i8>,
    geometry: Geometry,
}

impl Stimulus {
    /// The input memory image for these operands.
    pub fn input_words(&self) -> Vec<u64> {
        layout::pack_operands(&self.geometry, &self.a, &self.b)
    }

    /// Geometry the operands were generated for.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

/// Generates A then B from one seeded generator.
///
/// Fails when the value range `min_value..max_value` is empty or the
/// non-zero ratio lies outside `[0, 1]`.
pub fn generate(geometry: &Geometry, config: &StimulusConfig) -> Result<Stimulus, DesignError> {
    if config.min_value >= config.max_value {
        return Err(DesignError::Stimulus(format!(
            "empty value range {}..{}",
            config.min_value, config.max_value
        )));
    }
    if !(0.0..=1.0).contains(&config.non_zero_ratio) {
        return Err(DesignError::Stimulus(format!(
            "non-zero ratio {} is outside [0, 1]",
            config.non_zero_ratio
        )));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let a = sparse_matrix(geometry.matrix_dim(), config, &mut rng);
    let b = sparse_matrix(geometry.matrix_dim(), config, &mut rng);
    log::debug!(
        "generated {}x{} operands (seed {}, ratio {})",
        geometry.matrix_dim(),
        geometry.matrix_dim(),
        config.seed,
        config.non_zero_ratio
    );
    Ok(Stimulus {
        a,
        b,
        geometry: *geometry,
    })
}

fn sparse_matrix<R: Rng>(dim: usize, config: &StimulusConfig, rng: &mut R) -> Matrix<i8> {
    let elements = dim * dim;
    let non_zeros = (elements as f64 * config.non_zero_ratio) as usize;

    let mut values: Vec<i8> = (0..non_zeros)
        .map(|_| rng.gen_range(config.min_value..config.max_value))
        .collect();
    if config.min_value < 0 && config.max_value > 0 {
        for v in values.iter_mut().take(non_zeros / 2) {
            if *v > 0 {
                *v = -*v;
            } else if *v == 0 {
                *v = rng.gen_range(config.min_value..0);
            }
        }
    }

    let mut positions: Vec<usize> = (0..elements).collect();
    positions.shuffle(rng);

    let mut m = Matrix::zeros(dim);
    for (&pos, &value) in positions.iter().zip(&values) {
        m.set(pos / dim, pos % dim, value);
    }
    m
}
