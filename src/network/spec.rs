use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::optim::sgd::Sgd;

fn default_learning_rate() -> f64 { 0.1 }
fn default_momentum_enabled() -> bool { true }
fn default_momentum() -> f64 { 0.9 }
fn default_bias_value() -> f64 { 1.0 }

/// Construction-time description of a single-hidden-layer perceptron.
///
/// Fields:
/// - `input_size`:       length of the feature vectors fed in (bias excluded)
/// - `hidden_size`:      number of hidden sigmoid units (bias excluded)
/// - `output_size`:      number of output sigmoid units
/// - `learning_rate`:    step size of the delta rule
/// - `momentum_enabled`: whether the previous change is carried forward
/// - `momentum`:         fraction of the previous change carried forward
/// - `bias_value`:       constant activation of every bias unit (1 or -1 are usual)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_momentum_enabled")]
    pub momentum_enabled: bool,
    #[serde(default = "default_momentum")]
    pub momentum: f64,
    #[serde(default = "default_bias_value")]
    pub bias_value: f64,
}

impl MlpConfig {
    /// Layer sizes with the default hyperparameters: learning rate 0.1,
    /// momentum 0.9 enabled, bias activation 1.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        MlpConfig {
            input_size,
            hidden_size,
            output_size,
            learning_rate: default_learning_rate(),
            momentum_enabled: default_momentum_enabled(),
            momentum: default_momentum(),
            bias_value: default_bias_value(),
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum_enabled = true;
        self.momentum = momentum;
        self
    }

    pub fn without_momentum(mut self) -> Self {
        self.momentum_enabled = false;
        self
    }

    pub fn with_bias_value(mut self, bias_value: f64) -> Self {
        self.bias_value = bias_value;
        self
    }

    /// Same hyperparameters, different input width.
    pub fn with_input_size(&self, input_size: usize) -> Self {
        MlpConfig { input_size, ..self.clone() }
    }

    /// The update rule these settings describe.
    pub fn optimizer(&self) -> Sgd {
        if self.momentum_enabled {
            Sgd::with_momentum(self.learning_rate, self.momentum)
        } else {
            Sgd::new(self.learning_rate)
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("input_size", self.input_size),
            ("hidden_size", self.hidden_size),
            ("output_size", self.output_size),
        ] {
            if size == 0 {
                return Err(NetError::configuration(format!("{name} must be at least 1")));
            }
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(NetError::configuration(format!(
                "learning_rate must be positive and finite, got {}", self.learning_rate
            )));
        }
        if self.momentum_enabled && !(0.0..1.0).contains(&self.momentum) {
            return Err(NetError::configuration(format!(
                "momentum must lie in [0, 1), got {}", self.momentum
            )));
        }
        if !self.bias_value.is_finite() {
            return Err(NetError::configuration("bias_value must be finite"));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes and validates a config from a JSON file.
    pub fn load_json(path: &str) -> Result<MlpConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: MlpConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
