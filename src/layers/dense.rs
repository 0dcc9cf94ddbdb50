use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::sigmoid};

/// Half-width of the uniform range new weights are drawn from.
pub const INIT_RANGE: f64 = 0.05;

/// Fully connected sigmoid layer between a sending layer (plus its bias unit)
/// and a receiving layer.
///
/// `weights[i][j]` connects sending unit `i` to receiving unit `j`; row 0 is
/// the bias row. `deltas` has the same shape and holds the change applied to
/// each weight by the most recent update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,
    pub deltas: Matrix,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let weights = Matrix::uniform(input_size + 1, size, -INIT_RANGE, INIT_RANGE, rng);
        let deltas = Matrix::zeros(input_size + 1, size);

        Layer {
            size,
            input_size,
            weights,
            deltas,
        }
    }

    /// Computes the receiving activations from an already biased sending
    /// layer (`biased_input[0]` is the bias activation).
    pub fn feed_from(&self, biased_input: &[f64]) -> Vec<f64> {
        debug_assert_eq!(biased_input.len(), self.weights.rows);
        (0..self.size)
            .map(|j| {
                let total: f64 = biased_input.iter()
                    .zip(self.weights.data.iter())
                    .map(|(a, row)| a * row[j])
                    .sum();
                sigmoid(total)
            })
            .collect()
    }

    /// Error signal sent back to the (unbiased) sending units:
    /// `Σ_j weights[i + 1][j] * errors[j]` for each sending unit `i`.
    ///
    /// Reads the current weights, so it must run before `apply_update`.
    pub fn back_signal(&self, errors: &[f64]) -> Vec<f64> {
        self.weights.data.iter()
            .skip(1)
            .map(|row| row.iter().zip(errors.iter()).map(|(w, e)| w * e).sum())
            .collect()
    }

    /// Applies the delta rule to every weight, bias row included.
    ///
    /// `Δw[i][j] = learning_rate * errors[j] * biased_input[i]`, plus
    /// `momentum * previous Δw[i][j]` when `momentum` is given.
    pub fn apply_update(
        &mut self,
        errors: &[f64],
        biased_input: &[f64],
        learning_rate: f64,
        momentum: Option<f64>,
    ) {
        for (i, &activation) in biased_input.iter().enumerate() {
            for (j, &error) in errors.iter().enumerate() {
                let mut change = learning_rate * error * activation;
                if let Some(alpha) = momentum {
                    change += alpha * self.deltas.data[i][j];
                }
                self.weights.data[i][j] += change;
                self.deltas.data[i][j] = change;
            }
        }
    }
}

/// Copies `layer` with a bias activation prepended at index 0.
pub fn with_bias(bias: f64, layer: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(layer.len() + 1);
    out.push(bias);
    out.extend_from_slice(layer);
    out
}
