//! Comparison of a result image against the golden product.
//!
//! The golden model decodes A and B from the input image and multiplies
//! them in `f32`. The design's bfloat16 results are widened to `f32` and an
//! element matches when `|golden - hw| <= atol + rtol * |hw|`.

use std::path::Path;

use vdrive_config::CheckConfig;

use crate::bf16;
use crate::error::DesignError;
use crate::layout::{self, Geometry};
use crate::matrix::{self, Matrix};
use crate::memfile;

/// One element outside tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mismatch {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
    /// Expected value.
    pub golden: f32,
    /// Value produced by the design.
    pub hardware: f32,
}

/// Outcome of comparing a result image with the golden product.
#[derive(Clone, Debug)]
pub struct CheckReport {
    /// Left operand decoded from the input image.
    pub a: Matrix<i8>,
    /// Right operand decoded from the input image.
    pub b: Matrix<i8>,
    /// The golden product.
    pub golden: Matrix<f32>,
    /// The design's result, widened to `f32`.
    pub hardware: Matrix<f32>,
    /// Largest absolute difference over all elements.
    pub max_abs_diff: f32,
    /// Mean absolute difference over all elements.
    pub mean_abs_diff: f32,
    /// Elements outside tolerance, in row-major order.
    pub mismatches: Vec<Mismatch>,
}

impl CheckReport {
    /// Returns `true` when every element is within tolerance.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Number of compared elements.
    pub fn total(&self) -> usize {
        self.golden.as_slice().len()
    }
}

/// Returns `true` when `hardware` is within tolerance of `golden`.
pub fn is_close(golden: f32, hardware: f32, tolerance: &CheckConfig) -> bool {
    let diff = f64::from((golden - hardware).abs());
    diff <= tolerance.atol + tolerance.rtol * f64::from(hardware.abs())
}

/// Compares in-memory images.
pub fn compare(
    geometry: &Geometry,
    input_words: &[u64],
    result_words: &[u64],
    tolerance: &CheckConfig,
) -> Result<CheckReport, DesignError> {
    let (a, b) = layout::unpack_operands(geometry, input_words)?;
    let golden = matrix::matmul_f32(&a, &b);
    let hardware = layout::unpack_result(geometry, result_words)?.map(bf16::to_f32);

    let dim = geometry.matrix_dim();
    let mut mismatches = Vec::new();
    let mut max_abs_diff = 0.0f32;
    let mut sum_abs_diff = 0.0f64;
    for row in 0..dim {
        for col in 0..dim {
            let g = golden.get(row, col);
            let h = hardware.get(row, col);
            let diff = (g - h).abs();
            max_abs_diff = max_abs_diff.max(diff);
            sum_abs_diff += f64::from(diff);
            if !is_close(g, h, tolerance) {
                mismatches.push(Mismatch {
                    row,
                    col,
                    golden: g,
                    hardware: h,
                });
            }
        }
    }

    Ok(CheckReport {
        a,
        b,
        golden,
        hardware,
        max_abs_diff,
        mean_abs_diff: (sum_abs_diff / (dim * dim) as f64) as f32,
        mismatches,
    })
}

/// Reads both images from disk and compares them.
pub fn compare_files(
    geometry: &Geometry,
    input: &Path,
    result: &Path,
    tolerance: &CheckConfig,
) -> Result<CheckReport, DesignError> {
    let input_words = memfile::read_words(input)?;
    let result_words = memfile::read_words(result)?;
    compare(geometry, &input_words, &result_words, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matmul::{MatmulCore, Phase};

    fn case() -> (Geometry, Vec<u64>, Vec<u64>) {
        let g = Geometry::new(8, 8).unwrap();
        let a = Matrix::from_fn(8, |r, c| ((r + c) % 5) as i8 - 2);
        let b = Matrix::from_fn(8, |r, c| ((r * 3 + c) % 7) as i8 - 3);
        let input = layout::pack_operands(&g, &a, &b);
        let mut core = MatmulCore::new(g, &input).unwrap();
        while core.clock() != Phase::Drain {}
        (g, input, core.result_words().to_vec())
    }

    #[test]
    fn engine_output_passes() {
        let (g, input, result) = case();
        let report = compare(&g, &input, &result, &CheckConfig::default()).unwrap();
        assert!(report.passed());
        assert_eq!(report.total(), 64);
        assert_eq!(report.max_abs_diff, 0.0);
        assert_eq!(report.mean_abs_diff, 0.0);
        assert_eq!(report.golden, matrix::matmul_f32(&report.a, &report.b));
    }

    #[test]
    fn corrupted_element_is_reported() {
        let (g, input, mut result) = case();
        // Replace C[0][2] (word 0, lane 2) with 100.0.
        let lane = 2;
        result[0] &= !(0xFFFFu64 << (16 * lane));
        result[0] |= u64::from(bf16::from_f32(100.0)) << (16 * lane);

        let report = compare(&g, &input, &result, &CheckConfig::default()).unwrap();
        assert!(!report.passed());
        assert_eq!(report.mismatches.len(), 1);
        let m = report.mismatches[0];
        assert_eq!((m.row, m.col), (0, 2));
        assert_eq!(m.hardware, 100.0);
        assert_eq!(report.max_abs_diff, (m.golden - 100.0).abs());
    }

    #[test]
    fn tolerance_rules() {
        let tol = CheckConfig {
            rtol: 0.01,
            atol: 0.5,
        };
        assert!(is_close(100.0, 100.0, &tol));
        assert!(is_close(101.4, 100.0, &tol));
        assert!(!is_close(101.6, 100.0, &tol));
        assert!(!is_close(f32::NAN, 1.0, &tol));
    }

    #[test]
    fn wrong_result_size_errors() {
        let (g, input, result) = case();
        let err = compare(&g, &input, &result[..10], &CheckConfig::default()).unwrap_err();
        assert!(matches!(err, DesignError::Geometry(_)));
    }

    #[test]
    fn compare_from_files() {
        let (g, input, result) = case();
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("input_mem.csv");
        let result_path = dir.path().join("result_mem.csv");
        memfile::write_words(&input_path, &input).unwrap();
        memfile::write_words(&result_path, &result).unwrap();
        let report =
            compare_files(&g, &input_path, &result_path, &CheckConfig::default()).unwrap();
        assert!(report.passed());
    }
}
