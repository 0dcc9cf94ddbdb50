use std::sync::mpsc;
use crate::train::epoch_stats::EpochStats;
use crate::train::target::TargetEncoding;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`:       total number of full passes over the training data
/// - `encoding`:     how labels become target vectors and outputs become labels
/// - `error_driven`: when `true`, only misclassified examples trigger a
///                    weight update
/// - `progress_tx`:  optional channel sender; one `EpochStats` is sent per
///                    completed epoch.  If the receiver is dropped the loop
///                    terminates early (clean shutdown).
pub struct TrainConfig {
    pub epochs: usize,
    pub encoding: TargetEncoding,
    pub error_driven: bool,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` that updates on every example and has
    /// no progress channel.
    pub fn new(epochs: usize, encoding: TargetEncoding) -> Self {
        TrainConfig {
            epochs,
            encoding,
            error_driven: false,
            progress_tx: None,
        }
    }

    pub fn error_driven(mut self) -> Self {
        self.error_driven = true;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }
}
