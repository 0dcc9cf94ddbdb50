//! Square feature-map helpers: flat vector <-> grid, block-average
//! downsampling and zero padding.

use crate::error::{NetError, Result};
use crate::math::matrix::Matrix;

/// Side length of the square grid a vector of `len` values describes.
pub fn square_side(len: usize) -> Result<usize> {
    let side = (len as f64).sqrt() as usize;
    // Correct for float rounding on large lengths.
    let side = (side.saturating_sub(1)..=side + 1)
        .find(|s| s * s == len)
        .ok_or_else(|| NetError::configuration(format!(
            "vector of length {len} is not a square feature map"
        )))?;
    Ok(side)
}

/// Reshapes a flat vector of length `n²` into an `n x n` grid, row-major.
pub fn matrix_from_vector(values: &[f64]) -> Result<Matrix> {
    let side = square_side(values.len())?;
    let data = values.chunks(side.max(1))
        .take(side)
        .map(|row| row.to_vec())
        .collect();
    Ok(Matrix { rows: side, cols: side, data })
}

/// Flattens a grid row-major: cell `(r, c)` lands at `r * cols + c`.
pub fn vector_from_matrix(matrix: &Matrix) -> Vec<f64> {
    let mut out = Vec::with_capacity(matrix.rows * matrix.cols);
    for row in &matrix.data {
        out.extend_from_slice(row);
    }
    out
}

/// Replaces each non-overlapping `factor x factor` block with its mean.
///
/// Rows and columns that do not fill a whole block are dropped, so a 30x30
/// grid downsampled by 8 becomes 3x3.
pub fn downsample(matrix: &Matrix, factor: usize) -> Result<Matrix> {
    if factor == 0 {
        return Err(NetError::configuration("downsample factor must be at least 1"));
    }
    let rows = matrix.rows / factor;
    let cols = matrix.cols / factor;
    let area = (factor * factor) as f64;

    let mut res = Matrix::zeros(rows, cols);
    for r in 0..rows {
        for c in 0..cols {
            let mut sum = 0.0;
            for i in r * factor..(r + 1) * factor {
                for j in c * factor..(c + 1) * factor {
                    sum += matrix.data[i][j];
                }
            }
            res.data[r][c] = sum / area;
        }
    }
    Ok(res)
}

/// Surrounds the grid with one ring of zeros: `n x m` becomes `(n+2) x (m+2)`.
pub fn pad_with_zeros(matrix: &Matrix) -> Matrix {
    let mut res = Matrix::zeros(matrix.rows + 2, matrix.cols + 2);
    for (r, row) in matrix.data.iter().enumerate() {
        res.data[r + 1][1..=row.len()].copy_from_slice(row);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_side() {
        assert_eq!(square_side(0).unwrap(), 0);
        assert_eq!(square_side(1).unwrap(), 1);
        assert_eq!(square_side(1024).unwrap(), 32);
        assert!(matches!(square_side(10), Err(NetError::Configuration { .. })));
    }

    #[test]
    fn test_reshape_is_row_major() {
        let m = matrix_from_vector(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(m.data, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(vector_from_matrix(&m), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_non_square_length_rejected() {
        assert!(matrix_from_vector(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_downsample_constant_grid() {
        let m = Matrix::filled(4, 4, 0.7);
        let d = downsample(&m, 2).unwrap();
        assert_eq!((d.rows, d.cols), (2, 2));
        for &x in d.data.iter().flatten() {
            assert!((x - 0.7).abs() < 1e-12);
        }
    }

    #[test]
    fn test_downsample_truncates_remainder() {
        let values: Vec<f64> = (0..25).map(|x| x as f64).collect();
        let m = matrix_from_vector(&values).unwrap();
        let d = downsample(&m, 2).unwrap();
        assert_eq!((d.rows, d.cols), (2, 2));
        // Top-left block: 0, 1, 5, 6
        assert_eq!(d.data[0][0], 3.0);
        // Bottom-right block: 12, 13, 17, 18
        assert_eq!(d.data[1][1], 15.0);
    }

    #[test]
    fn test_downsample_zero_factor() {
        assert!(downsample(&Matrix::zeros(2, 2), 0).is_err());
    }

    #[test]
    fn test_pad_with_zeros() {
        let m = Matrix::filled(2, 2, 1.0);
        let p = pad_with_zeros(&m);
        assert_eq!((p.rows, p.cols), (4, 4));
        assert_eq!(p.data[0], vec![0.0; 4]);
        assert_eq!(p.data[1], vec![0.0, 1.0, 1.0, 0.0]);
        assert_eq!(p.data[3], vec![0.0; 4]);
    }
}
