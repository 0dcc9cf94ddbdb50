use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};
use crate::filter::bank::FilterPipeline;
use crate::filter::filter::Filter;
use crate::network::mlp::Mlp;
use crate::network::network::Network;
use crate::network::spec::MlpConfig;

/// How per-filter results are combined. Fixed for the lifetime of a [`Cnn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combination {
    /// One perceptron per filter; the ensemble output is the element-wise
    /// mean of their outputs.
    Average,
    /// All filtered maps are concatenated (in filter order) into one vector
    /// feeding a single shared perceptron.
    Concatenate,
}

/// Ensemble settings.
///
/// `mlp` is the template for the perceptron(s): its hidden/output sizes and
/// hyperparameters are used as is. Its `input_size` is the length of the raw
/// (unfiltered, flattened square) input map; member input sizes are derived
/// from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CnnConfig {
    pub mlp: MlpConfig,
    pub combination: Combination,
    #[serde(default)]
    pub pipeline: FilterPipeline,
}

#[derive(Debug)]
enum Members {
    Average(Vec<Mlp>),
    Concatenate {
        shared: Option<Mlp>,
        rng: StdRng,
    },
}

/// A bank of fixed filters in front of one or more perceptrons.
#[derive(Debug)]
pub struct Cnn {
    filters: Vec<Filter>,
    pipeline: FilterPipeline,
    template: MlpConfig,
    members: Members,
}

impl Cnn {
    /// Builds the ensemble. With `Combination::Average` every member network
    /// is created immediately; with `Combination::Concatenate` the shared
    /// network waits for the first input, drawing its weights from a
    /// generator seeded off `rng` now.
    pub fn new<R: Rng + ?Sized>(config: CnnConfig, filters: Vec<Filter>, rng: &mut R) -> Result<Cnn> {
        if filters.is_empty() {
            return Err(NetError::configuration("an ensemble needs at least one filter"));
        }
        config.mlp.validate()?;
        let CnnConfig { mlp: template, combination, pipeline } = config;

        let members = match combination {
            Combination::Average => {
                let mut nets = Vec::with_capacity(filters.len());
                for filter in &filters {
                    let input_size = pipeline.output_len(filter, template.input_size)?;
                    nets.push(Mlp::new(template.with_input_size(input_size), rng)?);
                }
                Members::Average(nets)
            }
            Combination::Concatenate => Members::Concatenate {
                shared: None,
                rng: StdRng::seed_from_u64(rng.gen()),
            },
        };

        Ok(Cnn { filters, pipeline, template, members })
    }

    pub fn combination(&self) -> Combination {
        match self.members {
            Members::Average(_) => Combination::Average,
            Members::Concatenate { .. } => Combination::Concatenate,
        }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// The perceptrons currently owned by the ensemble: one per filter when
    /// averaging, zero or one when concatenating.
    pub fn members(&self) -> Vec<&Mlp> {
        match &self.members {
            Members::Average(nets) => nets.iter().collect(),
            Members::Concatenate { shared, .. } => shared.iter().collect(),
        }
    }

    fn check_target(&self, target: &[f64]) -> Result<()> {
        if target.len() != self.template.output_size {
            return Err(NetError::dimension_mismatch(self.template.output_size, target.len()));
        }
        Ok(())
    }
}

impl Network for Cnn {
    fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        match &mut self.members {
            Members::Average(nets) => {
                // A pass that fails partway must not leave members on different inputs.
                nets.iter_mut().for_each(Mlp::discard_pending);
                let mut sum = vec![0.0; self.template.output_size];
                for (filter, net) in self.filters.iter().zip(nets.iter_mut()) {
                    let filtered = self.pipeline.run(filter, input)?;
                    let out = net.forward(&filtered)?;
                    for (acc, x) in sum.iter_mut().zip(out) {
                        *acc += x;
                    }
                }
                let count = nets.len() as f64;
                Ok(sum.into_iter().map(|x| x / count).collect())
            }
            Members::Concatenate { shared, rng } => {
                if let Some(net) = shared.as_mut() {
                    net.discard_pending();
                }
                let mut features = Vec::new();
                for filter in &self.filters {
                    features.extend(self.pipeline.run(filter, input)?);
                }
                let net = match shared {
                    Some(net) => net,
                    slot @ None => {
                        debug!(
                            "sizing shared network from first input: {} filters, {} features",
                            self.filters.len(),
                            features.len()
                        );
                        let config = self.template.with_input_size(features.len());
                        slot.insert(Mlp::new(config, rng)?)
                    }
                };
                net.forward(&features)
            }
        }
    }

    fn backward(&mut self, target: &[f64]) -> Result<()> {
        self.check_target(target)?;
        match &mut self.members {
            Members::Average(nets) => {
                // All members share one forward pass, so check before touching any.
                if !nets.iter().all(Mlp::has_pending_pass) {
                    return Err(NetError::invalid_state(
                        "backward called without a pending forward pass",
                    ));
                }
                for net in nets.iter_mut() {
                    net.backward(target)?;
                }
                Ok(())
            }
            Members::Concatenate { shared, .. } => match shared {
                Some(net) => net.backward(target),
                None => Err(NetError::invalid_state(
                    "backward called before the shared network saw any input",
                )),
            },
        }
    }

    fn output_size(&self) -> usize {
        self.template.output_size
    }
}
