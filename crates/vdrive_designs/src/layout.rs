//! Memory-image layout of the matrix-multiply testbench.
//!
//! Input image: the tiles of Aᵀ followed by the tiles of B. Tiles are visited
//! tile-row-major and each tile is flattened row-major into 64-bit words of
//! eight int8 elements, element 0 in the least-significant byte.
//!
//! Result image: C flattened row-major into 64-bit words of four bfloat16
//! elements, so `C[r][c]` is in the low 16 bits and `C[r][c + 3]` in the high
//! 16 bits.

use vdrive_config::TestbenchConfig;

use crate::error::DesignError;
use crate::matrix::Matrix;

/// int8 elements packed into one input word.
pub const INT8_PER_WORD: usize = 8;
/// bfloat16 elements packed into one result word.
pub const BF16_PER_WORD: usize = 4;

/// Matrix and tile dimensions of one testbench instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    matrix_dim: usize,
    tile_dim: usize,
}

impl Geometry {
    /// Validates and creates a geometry.
    pub fn new(matrix_dim: usize, tile_dim: usize) -> Result<Self, DesignError> {
        if matrix_dim == 0 || tile_dim == 0 {
            return Err(DesignError::Geometry(format!(
                "dimensions must be positive (matrix {matrix_dim}, tile {tile_dim})"
            )));
        }
        if matrix_dim % tile_dim != 0 {
            return Err(DesignError::Geometry(format!(
                "tile {tile_dim} does not divide matrix {matrix_dim}"
            )));
        }
        if (tile_dim * tile_dim) % INT8_PER_WORD != 0 {
            return Err(DesignError::Geometry(format!(
                "a {tile_dim}x{tile_dim} tile does not pack into {INT8_PER_WORD}-element words"
            )));
        }
        if matrix_dim % BF16_PER_WORD != 0 {
            return Err(DesignError::Geometry(format!(
                "a row of {matrix_dim} does not pack into {BF16_PER_WORD}-element words"
            )));
        }
        Ok(Self {
            matrix_dim,
            tile_dim,
        })
    }

    /// Creates the geometry described by a `[testbench]` section.
    pub fn from_config(config: &TestbenchConfig) -> Result<Self, DesignError> {
        Self::new(config.matrix_dim, config.tile_dim)
    }

    /// Edge length of the operand and result matrices.
    pub fn matrix_dim(&self) -> usize {
        self.matrix_dim
    }

    /// Edge length of a tile.
    pub fn tile_dim(&self) -> usize {
        self.tile_dim
    }

    /// Tiles along one side of a matrix.
    pub fn tiles_per_side(&self) -> usize {
        self.matrix_dim / self.tile_dim
    }

    /// Words occupied by one operand matrix.
    pub fn operand_words(&self) -> usize {
        self.matrix_dim * self.matrix_dim / INT8_PER_WORD
    }

    /// Words in a complete input image (both operands).
    pub fn input_words(&self) -> usize {
        2 * self.operand_words()
    }

    /// Words in a complete result image.
    pub fn result_words(&self) -> usize {
        self.matrix_dim * self.matrix_dim / BF16_PER_WORD
    }

    /// Visits `(row, col)` in tile order.
    fn tiled_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let t = self.tile_dim;
        let tiles = self.tiles_per_side();
        (0..tiles).flat_map(move |ti| {
            (0..tiles).flat_map(move |tj| {
                (0..t).flat_map(move |r| (0..t).map(move |c| (ti * t + r, tj * t + c)))
            })
        })
    }
}

/// Packs one operand in tile order.
pub fn pack_operand(geometry: &Geometry, m: &Matrix<i8>) -> Vec<u64> {
    let flat: Vec<i8> = geometry
        .tiled_positions()
        .map(|(row, col)| m.get(row, col))
        .collect();
    flat.chunks(INT8_PER_WORD)
        .map(|chunk| {
            chunk.iter().enumerate().fold(0u64, |word, (i, &v)| {
                word | (u64::from(v as u8) << (8 * i))
            })
        })
        .collect()
}

/// Unpacks one operand from tile order.
pub fn unpack_operand(geometry: &Geometry, words: &[u64]) -> Result<Matrix<i8>, DesignError> {
    expect_len("operand", words.len(), geometry.operand_words())?;
    let mut m = Matrix::zeros(geometry.matrix_dim());
    for (k, (row, col)) in geometry.tiled_positions().enumerate() {
        let byte = (words[k / INT8_PER_WORD] >> (8 * (k % INT8_PER_WORD))) as u8;
        m.set(row, col, byte as i8);
    }
    Ok(m)
}

/// Builds the full input image for `a · b`: Aᵀ tiles, then B tiles.
pub fn pack_operands(geometry: &Geometry, a: &Matrix<i8>, b: &Matrix<i8>) -> Vec<u64> {
    let mut words = pack_operand(geometry, &a.transpose());
    words.extend(pack_operand(geometry, b));
    words
}

/// Splits an input image back into `(a, b)`.
pub fn unpack_operands(
    geometry: &Geometry,
    words: &[u64],
) -> Result<(Matrix<i8>, Matrix<i8>), DesignError> {
    expect_len("input image", words.len(), geometry.input_words())?;
    let (a_t, b) = words.split_at(geometry.operand_words());
    let a = unpack_operand(geometry, a_t)?.transpose();
    let b = unpack_operand(geometry, b)?;
    Ok((a, b))
}

/// Packs up to four bfloat16 values into one word, element 0 lowest.
pub fn pack_result_word(values: &[u16]) -> u64 {
    values
        .iter()
        .enumerate()
        .fold(0u64, |word, (i, &v)| word | (u64::from(v) << (16 * i)))
}

/// Unpacks a result image into a matrix of bfloat16 bit patterns.
pub fn unpack_result(geometry: &Geometry, words: &[u64]) -> Result<Matrix<u16>, DesignError> {
    expect_len("result image", words.len(), geometry.result_words())?;
    let dim = geometry.matrix_dim();
    Ok(Matrix::from_fn(dim, |row, col| {
        let k = row * dim + col;
        (words[k / BF16_PER_WORD] >> (16 * (k % BF16_PER_WORD))) as u16
    }))
}

fn expect_len(what: &str, found: usize, expected: usize) -> Result<(), DesignError> {
    if found == expected {
        Ok(())
    } else {
        Err(DesignError::Geometry(format!(
            "{what} has {found} words, expected {expected}"
        )))
    }
}
