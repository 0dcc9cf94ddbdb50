use crate::error::Result;

/// The two operations every trainable classifier exposes to the training
/// loop. Implemented by the plain [`Mlp`](crate::network::mlp::Mlp) and by
/// the filter ensemble [`Cnn`](crate::network::cnn::Cnn).
pub trait Network {
    /// Runs one example through the network and returns the output
    /// activations. Retains whatever state the next `backward` call needs,
    /// discarding any state left by an earlier forward pass.
    fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>>;

    /// Updates weights towards `target` using the state retained by the last
    /// `forward` call, then drops that state.
    fn backward(&mut self, target: &[f64]) -> Result<()>;

    /// Length of the vectors `forward` returns and `backward` expects.
    fn output_size(&self) -> usize;
}

impl<N: Network + ?Sized> Network for Box<N> {
    fn forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        (**self).forward(input)
    }

    fn backward(&mut self, target: &[f64]) -> Result<()> {
        (**self).backward(target)
    }

    fn output_size(&self) -> usize {
        (**self).output_size()
    }
}
