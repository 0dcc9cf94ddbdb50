use serde::{Serialize, Deserialize};

/// One labelled feature vector, as handed to the training loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub features: Vec<f64>,
    pub label: usize,
}

impl Example {
    pub fn new(features: Vec<f64>, label: usize) -> Self {
        Example { features, label }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
