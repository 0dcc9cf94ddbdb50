use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::filter::filter::Filter;
use crate::math::feature_map::{downsample, matrix_from_vector, square_side, vector_from_matrix};

fn default_applications() -> usize { 1 }
fn default_downsample() -> usize { 1 }

/// Preprocessing every filter in an ensemble runs: `applications` repeated
/// valid correlations followed by block-average downsampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPipeline {
    #[serde(default = "default_applications")]
    pub applications: usize,
    /// Block size for averaging; `1` keeps the filtered map as is.
    #[serde(default = "default_downsample")]
    pub downsample: usize,
}

impl Default for FilterPipeline {
    fn default() -> Self {
        FilterPipeline {
            applications: default_applications(),
            downsample: default_downsample(),
        }
    }
}

impl FilterPipeline {
    pub fn new(applications: usize, downsample: usize) -> Self {
        FilterPipeline { applications, downsample }
    }

    /// Side of the map this pipeline turns an `input_side` map into.
    pub fn output_side(&self, filter: &Filter, input_side: usize) -> Result<usize> {
        if self.downsample == 0 {
            return Err(NetError::configuration("downsample factor must be at least 1"));
        }
        let mut side = input_side;
        for _ in 0..self.applications {
            side = filter.output_side(side)?;
        }
        Ok(side / self.downsample)
    }

    /// Flattened length produced from a flattened input of `input_len` values.
    pub fn output_len(&self, filter: &Filter, input_len: usize) -> Result<usize> {
        let side = self.output_side(filter, square_side(input_len)?)?;
        Ok(side * side)
    }

    pub fn run(&self, filter: &Filter, input: &[f64]) -> Result<Vec<f64>> {
        let filtered = filter.apply_repeated(input, self.applications)?;
        if self.downsample == 1 {
            return Ok(filtered);
        }
        let map = matrix_from_vector(&filtered)?;
        Ok(vector_from_matrix(&downsample(&map, self.downsample)?))
    }
}

/// The eight 3x3 edge detectors: four sides and four diagonals.
pub fn edge_filters() -> Vec<Filter> {
    let kernels: [(&str, [[f64; 3]; 3]); 8] = [
        ("top edge",         [[-1.0, -1.0, -1.0], [ 1.0,  1.0,  1.0], [ 0.0,  0.0,  0.0]]),
        ("bottom edge",      [[ 0.0,  0.0,  0.0], [ 1.0,  1.0,  1.0], [-1.0, -1.0, -1.0]]),
        ("left edge",        [[-1.0,  1.0,  0.0], [-1.0,  1.0,  0.0], [-1.0,  1.0,  0.0]]),
        ("right edge",       [[ 0.0,  1.0, -1.0], [ 0.0,  1.0, -1.0], [ 0.0,  1.0, -1.0]]),
        ("upper-left edge",  [[-1.0, -1.0,  1.0], [-1.0,  1.0,  0.0], [ 1.0,  0.0,  0.0]]),
        ("lower-right edge", [[ 0.0,  0.0,  1.0], [ 0.0,  1.0, -1.0], [ 1.0, -1.0, -1.0]]),
        ("lower-left edge",  [[ 1.0,  0.0,  0.0], [-1.0,  1.0,  0.0], [-1.0, -1.0,  1.0]]),
        ("upper-right edge", [[ 1.0, -1.0, -1.0], [ 0.0,  1.0, -1.0], [ 0.0,  0.0,  1.0]]),
    ];
    kernels.iter()
        .map(|(name, k)| Filter::from_3x3(name, k))
        .collect()
}
