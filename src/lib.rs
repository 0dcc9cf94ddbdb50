pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod optim;
pub mod loss;
pub mod network;
pub mod filter;
pub mod metrics;
pub mod train;
pub mod data;
pub mod config;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use layers::dense::Layer;
pub use optim::sgd::Sgd;
pub use network::{Network, Mlp, MlpConfig, Cnn, CnnConfig, Combination};
pub use filter::{Filter, FilterPipeline, edge_filters};
pub use metrics::confusion::ConfusionMatrix;
pub use data::example::Example;
pub use train::{train_network, train_loop, TargetEncoding, TrainConfig};
