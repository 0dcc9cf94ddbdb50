pub mod target;
pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use target::TargetEncoding;
pub use trainer::{train_network, train_epoch, test_epoch, EpochOutcome};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use loop_fn::{train_loop, TrainReport};
