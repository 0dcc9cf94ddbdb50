use std::time::Instant;

use log::info;
use serde::{Serialize, Deserialize};

use crate::data::example::Example;
use crate::error::{NetError, Result};
use crate::metrics::confusion::ConfusionMatrix;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::{test_epoch, train_epoch};

/// Everything a `train_loop` run measured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    /// Test accuracy of the untrained network, if a test set was provided.
    pub initial_test_accuracy: Option<f64>,
    /// One entry per completed epoch.
    pub history: Vec<EpochStats>,
    /// Sum of every epoch's training confusion matrix.
    pub total_train: ConfusionMatrix,
    /// Sum of every epoch's test confusion matrix.
    pub total_test: ConfusionMatrix,
}

impl TrainReport {
    pub fn last(&self) -> Option<&EpochStats> {
        self.history.last()
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of online backpropagation.
///
/// # Arguments
/// - `network`: any `Network`; modified in place
/// - `train`:   training examples, visited in order every epoch
/// - `test`:    optional held-out examples, evaluated once before training
///               and after every epoch
/// - `config`:  epochs, target encoding, error-driven flag, progress channel
///
/// # Early termination
/// The loop stops after the current epoch if the `progress_tx` receiver has
/// been dropped.
///
/// # Errors
/// Fails on an empty training set and propagates any error raised by the
/// network or the target encoding.
pub fn train_loop<N: Network + ?Sized>(
    network: &mut N,
    train: &[Example],
    test: Option<&[Example]>,
    config: &TrainConfig,
) -> Result<TrainReport> {
    if train.is_empty() {
        return Err(NetError::dataset("training set is empty"));
    }

    let classes = config.encoding.num_classes(network.output_size());
    let mut total_train = ConfusionMatrix::new(classes);
    let mut total_test = ConfusionMatrix::new(classes);
    let mut history = Vec::with_capacity(config.epochs);

    // ── Baseline before any update ────────────────────────────────────────
    let initial_test_accuracy = match test {
        Some(examples) => {
            let accuracy = test_epoch(network, examples, config.encoding)?.matrix.accuracy();
            info!("epoch 0: test accuracy {:.4}", accuracy);
            Some(accuracy)
        }
        None => None,
    };

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        // ── One full pass over the training data ───────────────────────────
        let trained = train_epoch(network, train, config.encoding, config.error_driven)?;
        total_train.merge(&trained.matrix)?;

        // ── Evaluation ────────────────────────────────────────────────────
        let test_accuracy = match test {
            Some(examples) => {
                let tested = test_epoch(network, examples, config.encoding)?;
                total_test.merge(&tested.matrix)?;
                Some(tested.matrix.accuracy())
            }
            None => None,
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: trained.mean_loss,
            train_accuracy: trained.matrix.accuracy(),
            test_accuracy,
            updates: trained.updates,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}/{}: loss {:.6}, train accuracy {:.4}, test accuracy {}",
            stats.epoch,
            stats.total_epochs,
            stats.train_loss,
            stats.train_accuracy,
            stats.test_accuracy.map_or_else(|| "-".to_string(), |a| format!("{a:.4}")),
        );
        history.push(stats.clone());

        // ── Emit progress ─────────────────────────────────────────────────
        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(TrainReport {
        initial_test_accuracy,
        history,
        total_train,
        total_test,
    })
}
