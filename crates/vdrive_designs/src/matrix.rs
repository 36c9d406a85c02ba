//! Square row-major matrices.

/// A dense square matrix stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    dim: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Creates a `dim × dim` matrix filled with `T::default()`.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![T::default(); dim * dim],
        }
    }

    /// Creates a matrix whose element `(row, col)` is `f(row, col)`.
    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(dim * dim);
        for row in 0..dim {
            for col in 0..dim {
                data.push(f(row, col));
            }
        }
        Self { dim, data }
    }

    /// Edge length.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns element `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> T {
        assert!(row < self.dim && col < self.dim, "index ({row}, {col}) out of range");
        self.data[row * self.dim + col]
    }

    /// Overwrites element `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(row < self.dim && col < self.dim, "index ({row}, {col}) out of range");
        self.data[row * self.dim + col] = value;
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.dim, |row, col| self.get(col, row))
    }

    /// Elements in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns a matrix of the same shape with `f` applied to each element.
    pub fn map<U: Copy + Default>(&self, f: impl Fn(T) -> U) -> Matrix<U> {
        Matrix {
            dim: self.dim,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

/// Computes `a · b` in `f32`, widening each int8 operand.
pub fn matmul_f32(a: &Matrix<i8>, b: &Matrix<i8>) -> Matrix<f32> {
    assert_eq!(a.dim(), b.dim(), "operand dimensions differ");
    Matrix::from_fn(a.dim(), |row, col| dot_f32(a, b, row, col))
}

/// Dot product of row `row` of `a` with column `col` of `b`, accumulated in `f32`.
pub fn dot_f32(a: &Matrix<i8>, b: &Matrix<i8>, row: usize, col: usize) -> f32 {
    (0..a.dim()).fold(0.0f32, |acc, k| {
        acc + f32::from(a.get(row, k)) * f32::from(b.get(k, col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_and_set() {
        let mut m = Matrix::<i8>::zeros(3);
        assert!(m.as_slice().iter().all(|&v| v == 0));
        m.set(1, 2, -5);
        assert_eq!(m.get(1, 2), -5);
        assert_eq!(m.as_slice()[5], -5);
    }

    #[test]
    fn transpose_swaps_indices() {
        let m = Matrix::from_fn(4, |r, c| (r * 4 + c) as i8);
        let t = m.transpose();
        assert_eq!(t.get(0, 3), m.get(3, 0));
        assert_eq!(t.get(2, 1), 6);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn identity_product() {
        let eye = Matrix::from_fn(4, |r, c| i8::from(r == c));
        let b = Matrix::from_fn(4, |r, c| (r + c) as i8);
        let c = matmul_f32(&eye, &b);
        assert_eq!(c, b.map(f32::from));
    }

    #[test]
    fn negative_products() {
        let a = Matrix::from_fn(2, |_, _| -3i8);
        let b = Matrix::from_fn(2, |r, _| if r == 0 { 2 } else { -1 });
        // Each element: -3*2 + -3*-1 = -3.
        assert_eq!(matmul_f32(&a, &b).get(1, 0), -3.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_out_of_range_panics() {
        Matrix::<u16>::zeros(2).get(2, 0);
    }
}
