use serde::{Serialize, Deserialize};

use crate::layers::dense::Layer;

/// Online gradient-descent update rule with optional momentum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    pub learning_rate: f64,
    /// Fraction of the previous change carried into the next one; `None`
    /// disables momentum.
    pub momentum: Option<f64>,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate, momentum: None }
    }

    pub fn with_momentum(learning_rate: f64, momentum: f64) -> Sgd {
        Sgd { learning_rate, momentum: Some(momentum) }
    }

    /// Applies one per-example update to a layer given its error terms and
    /// the biased activations that fed it.
    pub fn step(&self, layer: &mut Layer, errors: &[f64], biased_input: &[f64]) {
        layer.apply_update(errors, biased_input, self.learning_rate, self.momentum);
    }
}
