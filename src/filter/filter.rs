use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::math::feature_map::{matrix_from_vector, vector_from_matrix};
use crate::math::matrix::Matrix;

/// A fixed square kernel slid over square feature maps with stride 1 and no
/// padding ("valid" correlation, the kernel is not flipped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    kernel: Matrix,
}

impl Filter {
    pub fn new(kernel: Vec<Vec<f64>>) -> Result<Filter> {
        Filter::named("custom", kernel)
    }

    pub fn named<S: Into<String>>(name: S, kernel: Vec<Vec<f64>>) -> Result<Filter> {
        let kernel = Matrix::from_data(kernel)?;
        if kernel.rows == 0 || !kernel.is_square() {
            return Err(NetError::configuration(format!(
                "filter kernel must be a non-empty square, got {}x{}",
                kernel.rows, kernel.cols
            )));
        }
        Ok(Filter { name: name.into(), kernel })
    }

    pub(crate) fn from_3x3(name: &str, kernel: &[[f64; 3]; 3]) -> Filter {
        Filter {
            name: name.to_string(),
            kernel: Matrix {
                rows: 3,
                cols: 3,
                data: kernel.iter().map(|row| row.to_vec()).collect(),
            },
        }
    }

    /// Side length of the kernel.
    pub fn size(&self) -> usize {
        self.kernel.rows
    }

    pub fn kernel(&self) -> &Matrix {
        &self.kernel
    }

    /// Side of the map one application produces from an `input_side` map.
    pub fn output_side(&self, input_side: usize) -> Result<usize> {
        if input_side < self.size() {
            return Err(NetError::configuration(format!(
                "{} filter ({}x{}) does not fit a {}x{} feature map",
                self.name, self.size(), self.size(), input_side, input_side
            )));
        }
        Ok(input_side - (self.size() - 1))
    }

    /// `out[r][c] = Σ_{i,j} map[r+i][c+j] * kernel[i][j]`
    pub fn apply_to_matrix(&self, map: &Matrix) -> Result<Matrix> {
        if !map.is_square() {
            return Err(NetError::configuration(format!(
                "feature map must be square, got {}x{}", map.rows, map.cols
            )));
        }
        let side = self.output_side(map.rows)?;
        let k = self.size();

        let mut res = Matrix::zeros(side, side);
        for r in 0..side {
            for c in 0..side {
                let mut sum = 0.0;
                for i in 0..k {
                    for j in 0..k {
                        sum += map.data[r + i][c + j] * self.kernel.data[i][j];
                    }
                }
                res.data[r][c] = sum;
            }
        }
        Ok(res)
    }

    /// Applies the filter to a flattened square map and flattens the result.
    pub fn apply(&self, input: &[f64]) -> Result<Vec<f64>> {
        let map = matrix_from_vector(input)?;
        Ok(vector_from_matrix(&self.apply_to_matrix(&map)?))
    }

    /// Applies the filter `times` times, each pass consuming the previous
    /// pass's output. `times == 0` returns the input unchanged.
    pub fn apply_repeated(&self, input: &[f64], times: usize) -> Result<Vec<f64>> {
        let mut map = matrix_from_vector(input)?;
        for _ in 0..times {
            map = self.apply_to_matrix(&map)?;
        }
        Ok(vector_from_matrix(&map))
    }
}
