use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::sigmoid_slope;
use crate::error::{NetError, Result};
use crate::layers::dense::{Layer, with_bias};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::network::spec::MlpConfig;

/// Activations of one forward pass, kept until the matching backward pass.
/// `input` and `hidden` carry the bias unit at index 0.
#[derive(Debug, Clone)]
struct Activations {
    input: Vec<f64>,
    hidden: Vec<f64>,
    output: Vec<f64>,
}

/// Single-hidden-layer sigmoid perceptron trained one example at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mlp {
    config: MlpConfig,
    hidden: Layer,
    output: Layer,
    #[serde(skip)]
    pending: Option<Activations>,
}

impl Mlp {
    /// Builds a network with every weight drawn from `[-0.05, 0.05)`.
    pub fn new<R: Rng + ?Sized>(config: MlpConfig, rng: &mut R) -> Result<Mlp> {
        config.validate()?;
        let hidden = Layer::new(config.hidden_size, config.input_size, rng);
        let output = Layer::new(config.output_size, config.hidden_size, rng);
        debug!(
            "built {}-{}-{} perceptron (lr {}, momentum {})",
            config.input_size,
            config.hidden_size,
            config.output_size,
            config.learning_rate,
            if config.momentum_enabled { config.momentum } else { 0.0 },
        );
        Ok(Mlp { config, hidden, output, pending: None })
    }

    pub fn config(&self) -> &MlpConfig {
        &self.config
    }

    pub fn input_size(&self) -> usize {
        self.config.input_size
    }

    /// Input→hidden weights and momentum state.
    pub fn hidden_layer(&self) -> &Layer {
        &self.hidden
    }

    /// Hidden→output weights and momentum state.
    pub fn output_layer(&self) -> &Layer {
        &self.output
    }

    pub fn hidden_layer_mut(&mut self) -> &mut Layer {
        &mut self.hidden
    }

    pub fn output_layer_mut(&mut self) -> &mut Layer {
        &mut self.output
    }

    /// Whether a forward pass is waiting for its backward pass.
    pub fn has_pending_pass(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any forward pass still waiting for its backward pass.
    pub(crate) fn discard_pending(&mut self) {
        self.pending = None;
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network from a JSON file previously written by
    /// `save_json`, checking the weight shapes against the stored config.
    pub fn load_json(path: &str) -> Result<Mlp> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let mlp: Mlp = serde_json::from_reader(reader)?;
        mlp.check_shapes()?;
        Ok(mlp)
    }

    fn check_shapes(&self) -> Result<()> {
        self.config.validate()?;
        let expected = [
            (self.config.input_size + 1, self.config.hidden_size),
            (self.config.hidden_size + 1, self.config.output_size),
        ];
        for (layer, (rows, cols)) in [&self.hidden, &self.output].into_iter().zip(expected) {
            for m in [&layer.weights, &layer.deltas] {
                if m.rows != rows || m.data.len() != rows {
                    return Err(NetError::dimension_mismatch(rows, m.data.len()));
                }
                if let Some(bad) = m.data.iter().find(|row| row.len() != cols) {
                    return Err(NetError::dimension_mismatch(cols, bad.len()));
                }
            }
        }
        Ok(())
    }
}

impl Network for Mlp {
    fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        // A rejected input must not leave the previous pass available to backward.
        self.pending = None;
        if input.len() != self.config.input_size {
            return Err(NetError::dimension_mismatch(self.config.input_size, input.len()));
        }
        let biased_input = with_bias(self.config.bias_value, input);
        let hidden = self.hidden.feed_from(&biased_input);
        let biased_hidden = with_bias(self.config.bias_value, &hidden);
        let output = self.output.feed_from(&biased_hidden);

        self.pending = Some(Activations {
            input: biased_input,
            hidden: biased_hidden,
            output: output.clone(),
        });
        Ok(output)
    }

    fn backward(&mut self, target: &[f64]) -> Result<()> {
        if target.len() != self.config.output_size {
            return Err(NetError::dimension_mismatch(self.config.output_size, target.len()));
        }
        let acts = self.pending.take().ok_or_else(|| {
            NetError::invalid_state("backward called without a pending forward pass")
        })?;

        // Error terms first, all against the pre-update weights.
        let output_errors: Vec<f64> = acts.output.iter()
            .zip(MseLoss::residual(&acts.output, target))
            .map(|(&out, residual)| sigmoid_slope(out) * residual)
            .collect();
        let hidden_errors: Vec<f64> = acts.hidden[1..].iter()
            .zip(self.output.back_signal(&output_errors))
            .map(|(&hid, signal)| sigmoid_slope(hid) * signal)
            .collect();

        let optimizer = self.config.optimizer();
        optimizer.step(&mut self.output, &output_errors, &acts.hidden);
        optimizer.step(&mut self.hidden, &hidden_errors, &acts.input);
        Ok(())
    }

    fn output_size(&self) -> usize {
        self.config.output_size
    }
}
