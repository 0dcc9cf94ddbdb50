//! Settings for one experiment run of the `signnet` binary.

use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::filter::bank::FilterPipeline;
use crate::network::spec::MlpConfig;
use crate::train::target::TargetEncoding;

/// Everything the experiment runner needs, loadable from JSON.
///
/// Missing fields fall back to the defaults below, so a config file only has
/// to name what it changes:
///
/// ```json
/// { "images_dir": "data/signs", "hidden_size": 50, "epochs": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Root folder holding one sub-folder per class label.
    pub images_dir: String,
    pub classes: usize,
    /// Block size used to shrink each decoded image.
    pub downsize: usize,
    pub hidden_size: usize,
    pub epochs: usize,
    /// When set, train and test on a class-balanced subset of
    /// `len / subset_divisor` examples instead of the whole image set.
    pub subset_divisor: Option<usize>,
    /// Share of the shuffled examples held out for testing.
    pub test_fraction: f64,
    /// Seeds the split and every weight initialization of the run.
    pub seed: u64,
    pub learning_rate: f64,
    /// `None` disables momentum.
    pub momentum: Option<f64>,
    pub bias_value: f64,
    pub encoding: TargetEncoding,
    pub error_driven: bool,
    /// Filter preprocessing for the ensemble modes.
    pub pipeline: FilterPipeline,
    /// Where to write the JSON training reports, if anywhere.
    pub report_path: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            images_dir: "archive/signs".to_string(),
            classes: 26,
            downsize: 8,
            hidden_size: 100,
            epochs: 25,
            subset_divisor: None,
            test_fraction: 0.4,
            seed: 42,
            learning_rate: 0.1,
            momentum: Some(0.9),
            bias_value: 1.0,
            encoding: TargetEncoding::OneHot,
            error_driven: false,
            pipeline: FilterPipeline::default(),
            report_path: None,
        }
    }
}

impl RunConfig {
    /// Deserializes a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: RunConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes == 0 || self.downsize == 0 || self.epochs == 0 {
            return Err(NetError::configuration(
                "classes, downsize and epochs must all be at least 1",
            ));
        }
        if self.subset_divisor == Some(0) {
            return Err(NetError::configuration("subset divisor must be at least 1"));
        }
        self.mlp_config(1).validate()
    }

    /// Perceptron settings for inputs of `input_size` values.
    pub fn mlp_config(&self, input_size: usize) -> MlpConfig {
        let output_size = match self.encoding {
            TargetEncoding::Binary => 1,
            _ => self.classes,
        };
        let config = MlpConfig::new(input_size, self.hidden_size, output_size)
            .with_learning_rate(self.learning_rate)
            .with_bias_value(self.bias_value);
        match self.momentum {
            Some(momentum) => config.with_momentum(momentum),
            None => config.without_momentum(),
        }
    }
}
