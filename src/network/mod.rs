pub mod network;
pub mod spec;
pub mod mlp;
pub mod cnn;

pub use network::Network;
pub use spec::MlpConfig;
pub use mlp::Mlp;
pub use cnn::{Cnn, CnnConfig, Combination};
