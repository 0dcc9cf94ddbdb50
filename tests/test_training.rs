// Epoch passes, the training loop and its confusion-matrix bookkeeping.

use std::sync::mpsc;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use signnet::train::{test_epoch, train_epoch, EpochStats};
use signnet::{
    train_loop, ConfusionMatrix, Example, Mlp, MlpConfig, NetError, Network, TargetEncoding,
    TrainConfig,
};

/// Two well separated classes: "bright left half" vs "bright right half".
fn halves() -> Vec<Example> {
    let mut examples = Vec::new();
    for i in 0..6 {
        let jitter = i as f64 * 0.02;
        examples.push(Example::new(vec![0.9 - jitter, 0.8 + jitter, 0.1, 0.0 + jitter], 0));
        examples.push(Example::new(vec![0.1, 0.0 + jitter, 0.9 - jitter, 0.8 + jitter], 1));
    }
    examples
}

fn network(seed: u64) -> Mlp {
    Mlp::new(MlpConfig::new(4, 4, 2), &mut StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn test_confusion_matrix_accuracy() {
    let mut m = ConfusionMatrix::new(3);
    for (p, a) in [(0, 0), (0, 0), (1, 1), (2, 2), (2, 2), (1, 0), (2, 1)] {
        m.add(p, a).unwrap();
    }
    assert_eq!(m.total(), 7);
    assert_eq!(m.correct(), 5);
    assert_relative_eq!(m.accuracy(), 5.0 / 7.0);
    assert_eq!(m.get(1, 0), 1);
    assert_eq!(m.get(0, 1), 0);
    assert_eq!(ConfusionMatrix::new(3).accuracy(), 0.0);
}

#[test]
fn test_test_epoch_leaves_weights_alone() {
    let mut mlp = network(3);
    let before = mlp.hidden_layer().weights.clone();
    let outcome = test_epoch(&mut mlp, &halves(), TargetEncoding::OneHot).unwrap();
    assert_eq!(outcome.updates, 0);
    assert_eq!(outcome.matrix.total(), 12);
    assert_eq!(mlp.hidden_layer().weights, before);
}

#[test]
fn test_train_epoch_updates_every_example() {
    let mut mlp = network(3);
    let outcome = train_epoch(&mut mlp, &halves(), TargetEncoding::OneHot, false).unwrap();
    assert_eq!(outcome.updates, 12);
    assert_eq!(outcome.matrix.total(), 12);
    assert!(outcome.mean_loss > 0.0);
}

#[test]
fn test_error_driven_skips_correct_examples() {
    let mut mlp = network(5);
    let warm_up = TrainConfig::new(30, TargetEncoding::OneHot);
    train_loop(&mut mlp, &halves(), None, &warm_up).unwrap();

    let outcome = train_epoch(&mut mlp, &halves(), TargetEncoding::OneHot, true).unwrap();
    let wrong = outcome.matrix.total() - outcome.matrix.correct();
    assert_eq!(outcome.updates as u64, wrong);
}

#[test]
fn test_loop_learns_separable_classes() {
    let mut mlp = network(7);
    let config = TrainConfig::new(200, TargetEncoding::OneHot);
    let report = train_loop(&mut mlp, &halves(), Some(halves().as_slice()), &config).unwrap();

    assert_eq!(report.history.len(), 200);
    assert!(report.initial_test_accuracy.is_some());
    let last = report.last().unwrap();
    assert_eq!(last.epoch, 200);
    assert_eq!(last.test_accuracy, Some(1.0));
    assert!(last.train_loss < report.history[0].train_loss);
    assert_eq!(report.total_train.total(), 200 * 12);
    assert_eq!(report.total_test.total(), 200 * 12);
}

#[test]
fn test_soft_targets_train_too() {
    let mut mlp = network(7);
    let config = TrainConfig::new(200, TargetEncoding::soft());
    let report = train_loop(&mut mlp, &halves(), Some(halves().as_slice()), &config).unwrap();
    assert_eq!(report.last().unwrap().test_accuracy, Some(1.0));

    let output = mlp.forward(&halves()[0].features).unwrap();
    assert!(output[0] < 0.95, "soft targets should keep outputs off the rail");
}

#[test]
fn test_binary_encoding_uses_single_output() {
    let mut mlp = Mlp::new(MlpConfig::new(4, 3, 1), &mut StdRng::seed_from_u64(2)).unwrap();
    let config = TrainConfig::new(200, TargetEncoding::Binary);
    let report = train_loop(&mut mlp, &halves(), Some(halves().as_slice()), &config).unwrap();
    assert_eq!(report.total_test.size(), 2);
    assert_eq!(report.last().unwrap().test_accuracy, Some(1.0));
}

#[test]
fn test_progress_channel_receives_each_epoch() {
    let (tx, rx) = mpsc::channel::<EpochStats>();
    let mut mlp = network(1);
    let config = TrainConfig::new(4, TargetEncoding::OneHot).with_progress(tx);
    let report = train_loop(&mut mlp, &halves(), None, &config).unwrap();
    drop(config);

    let received: Vec<EpochStats> = rx.iter().collect();
    assert_eq!(received, report.history);
    assert_eq!(received.iter().map(|s| s.epoch).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert!(received.iter().all(|s| s.test_accuracy.is_none()));
}

#[test]
fn test_dropped_receiver_stops_loop() {
    let (tx, rx) = mpsc::channel::<EpochStats>();
    drop(rx);
    let mut mlp = network(1);
    let config = TrainConfig::new(50, TargetEncoding::OneHot).with_progress(tx);
    let report = train_loop(&mut mlp, &halves(), None, &config).unwrap();
    assert_eq!(report.history.len(), 1);
}

#[test]
fn test_empty_training_set() {
    let mut mlp = network(1);
    let config = TrainConfig::new(3, TargetEncoding::OneHot);
    let err = train_loop(&mut mlp, &[], None, &config).unwrap_err();
    assert!(matches!(err, NetError::Dataset { .. }));
}

#[test]
fn test_label_out_of_range() {
    let mut mlp = network(1);
    let bad = [Example::new(vec![0.0; 4], 2)];
    let err = train_epoch(&mut mlp, &bad, TargetEncoding::OneHot, false).unwrap_err();
    assert!(matches!(err, NetError::DimensionMismatch { expected: 2, actual: 3 }));
}
