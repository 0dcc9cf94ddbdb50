use crate::{
    data::example::Example,
    error::{NetError, Result},
    loss::mse::MseLoss,
    metrics::confusion::ConfusionMatrix,
    network::network::Network,
    train::target::TargetEncoding,
};

/// What one pass over a set of examples produced.
#[derive(Debug, Clone)]
pub struct EpochOutcome {
    /// Predicted-vs-actual counts for every example seen.
    pub matrix: ConfusionMatrix,
    /// Mean squared error of the forward outputs against their targets.
    pub mean_loss: f64,
    /// Backward calls made (always zero for a testing pass).
    pub updates: usize,
}

/// One online training pass over `inputs` with raw target vectors.
/// Returns the mean squared error measured before each update.
pub fn train_network<N: Network + ?Sized>(
    network: &mut N,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(NetError::dimension_mismatch(inputs.len(), expected_outputs.len()));
    }
    if inputs.is_empty() {
        return Ok(0.0);
    }
    let mut total_loss = 0.0;

    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        let output = network.forward(input)?;
        total_loss += MseLoss::loss(&output, expected);
        network.backward(expected)?;
    }

    Ok(total_loss / inputs.len() as f64)
}

/// One online training pass: forward, record the predicted label, then
/// backpropagate the encoded target.
///
/// With `error_driven` set, correctly classified examples are recorded but
/// not trained on.
pub fn train_epoch<N: Network + ?Sized>(
    network: &mut N,
    examples: &[Example],
    encoding: TargetEncoding,
    error_driven: bool,
) -> Result<EpochOutcome> {
    run_pass(network, examples, encoding, Some(error_driven))
}

/// One evaluation pass: forward only, no weight changes.
pub fn test_epoch<N: Network + ?Sized>(
    network: &mut N,
    examples: &[Example],
    encoding: TargetEncoding,
) -> Result<EpochOutcome> {
    run_pass(network, examples, encoding, None)
}

/// `training` is `None` for evaluation, otherwise carries the error-driven flag.
fn run_pass<N: Network + ?Sized>(
    network: &mut N,
    examples: &[Example],
    encoding: TargetEncoding,
    training: Option<bool>,
) -> Result<EpochOutcome> {
    let output_size = network.output_size();
    let mut matrix = ConfusionMatrix::new(encoding.num_classes(output_size));
    let mut total_loss = 0.0;
    let mut updates = 0;

    for example in examples {
        let target = encoding.target(example.label, output_size)?;
        let output = network.forward(&example.features)?;
        let predicted = encoding.predict(&output);
        matrix.add(predicted, example.label)?;
        total_loss += MseLoss::loss(&output, &target);

        if let Some(error_driven) = training {
            if !error_driven || predicted != example.label {
                network.backward(&target)?;
                updates += 1;
            }
        }
    }

    let mean_loss = if examples.is_empty() {
        0.0
    } else {
        total_loss / examples.len() as f64
    };
    Ok(EpochOutcome { matrix, mean_loss, updates })
}
