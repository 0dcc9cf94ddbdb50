use rand::rngs::StdRng;
use rand::SeedableRng;
use signnet::{Mlp, MlpConfig, Network, train_network};

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2024);
    let config = MlpConfig::new(2, 2, 1).with_bias_value(-1.0);
    let mut network = Mlp::new(config, &mut rng).expect("valid 2-2-1 config");

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_network(&mut network, &inputs, &expected_outputs).expect("training step");
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        let output = network.forward(input).expect("forward pass")[0];
        println!("Input: {:?} -> Output: {:.4} -> Class: {}", input, output, u8::from(output > 0.5));
    }
}
