// Forward/backward behaviour of the single-hidden-layer perceptron.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use signnet::{Mlp, MlpConfig, NetError, Network, TargetEncoding, train_network};
use signnet::loss::mse::MseLoss;

fn xor_set() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    (inputs, targets)
}

#[test]
fn test_initial_weights_within_range() {
    let mut rng = StdRng::seed_from_u64(11);
    let mlp = Mlp::new(MlpConfig::new(64, 20, 10), &mut rng).unwrap();
    for layer in [mlp.hidden_layer(), mlp.output_layer()] {
        for &w in layer.weights.data.iter().flatten() {
            assert!((-0.05..0.05).contains(&w), "weight {w} out of range");
        }
        assert!(layer.deltas.data.iter().flatten().all(|&d| d == 0.0));
    }
    assert_eq!(mlp.hidden_layer().weights.rows, 65);
    assert_eq!(mlp.output_layer().weights.rows, 21);
}

#[test]
fn test_same_seed_same_weights() {
    let a = Mlp::new(MlpConfig::new(3, 4, 2), &mut StdRng::seed_from_u64(5)).unwrap();
    let b = Mlp::new(MlpConfig::new(3, 4, 2), &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a.hidden_layer().weights, b.hidden_layer().weights);
    assert_eq!(a.output_layer().weights, b.output_layer().weights);
}

#[test]
fn test_forward_output_in_open_unit_interval() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut mlp = Mlp::new(MlpConfig::new(5, 3, 4), &mut rng).unwrap();
    for _ in 0..50 {
        let input: Vec<f64> = (0..5).map(|_| rng.gen_range(-100.0..100.0)).collect();
        let output = mlp.forward(&input).unwrap();
        assert_eq!(output.len(), 4);
        assert!(output.iter().all(|&y| y > 0.0 && y < 1.0));
    }
}

#[test]
fn test_forward_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut mlp = Mlp::new(MlpConfig::new(4, 3, 2), &mut rng).unwrap();
    let input = [0.3, -1.2, 4.0, 0.0];
    let first = mlp.forward(&input).unwrap();
    let second = mlp.forward(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_step_reduces_error() {
    let mut rng = StdRng::seed_from_u64(8);
    let config = MlpConfig::new(2, 2, 1).without_momentum().with_learning_rate(0.05);
    let mut mlp = Mlp::new(config, &mut rng).unwrap();

    let input = [0.0, 0.0];
    let target = [0.0];
    let before = mlp.forward(&input).unwrap();
    mlp.backward(&target).unwrap();
    let after = mlp.forward(&input).unwrap();

    assert!(MseLoss::loss(&after, &target) < MseLoss::loss(&before, &target));
    assert!(after[0] < before[0]);
}

#[test]
fn test_momentum_state_tracks_last_change() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut mlp = Mlp::new(MlpConfig::new(2, 2, 1), &mut rng).unwrap();
    let before = mlp.output_layer().weights.clone();
    mlp.forward(&[1.0, 0.5]).unwrap();
    mlp.backward(&[1.0]).unwrap();

    let layer = mlp.output_layer();
    for i in 0..layer.weights.rows {
        let applied = layer.weights.data[i][0] - before.data[i][0];
        assert_relative_eq!(applied, layer.deltas.data[i][0], epsilon = 1e-15);
    }
}

#[test]
fn test_backward_without_forward() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut mlp = Mlp::new(MlpConfig::new(2, 2, 1), &mut rng).unwrap();
    let err = mlp.backward(&[1.0]).unwrap_err();
    assert!(matches!(err, NetError::InvalidState { .. }));
}

#[test]
fn test_construction_rejects_empty_layers() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = Mlp::new(MlpConfig::new(0, 2, 1), &mut rng).unwrap_err();
    assert!(matches!(err, NetError::Configuration { .. }));
}

#[test]
fn test_xor_convergence() {
    let (inputs, targets) = xor_set();
    for seed in [1, 2, 3] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut mlp = Mlp::new(MlpConfig::new(2, 2, 1), &mut rng).unwrap();
        for _ in 0..10_000 {
            train_network(&mut mlp, &inputs, &targets).unwrap();
        }

        let correct = inputs.iter().zip(&targets)
            .filter(|(input, target)| {
                let output = mlp.forward(input).unwrap();
                TargetEncoding::Binary.predict(&output) == target[0] as usize
            })
            .count();
        assert!(correct >= 3, "seed {seed}: only {correct}/4 XOR patterns correct");
    }
}

#[test]
fn test_save_and_load_json() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut mlp = Mlp::new(MlpConfig::new(3, 2, 2).with_bias_value(-1.0), &mut rng).unwrap();
    let path = std::env::temp_dir().join("signnet-test-mlp.json");
    let path = path.to_str().unwrap();

    mlp.save_json(path).unwrap();
    let mut restored = Mlp::load_json(path).unwrap();
    std::fs::remove_file(path).ok();

    assert_eq!(restored.config(), mlp.config());
    let input = [0.2, 0.4, 0.6];
    let a = mlp.forward(&input).unwrap();
    let b = restored.forward(&input).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert_relative_eq!(*x, *y, epsilon = 1e-12);
    }
}

#[test]
fn test_rejected_forward_clears_pending_pass() {
    let mut rng = StdRng::seed_from_u64(19);
    let mut mlp = Mlp::new(MlpConfig::new(2, 2, 1), &mut rng).unwrap();
    mlp.forward(&[1.0, 0.0]).unwrap();

    let err = mlp.forward(&[1.0]).unwrap_err();
    assert!(matches!(err, NetError::DimensionMismatch { expected: 2, actual: 1 }));
    assert!(!mlp.has_pending_pass());

    let err = mlp.backward(&[1.0]).unwrap_err();
    assert!(matches!(err, NetError::InvalidState { .. }));
}
