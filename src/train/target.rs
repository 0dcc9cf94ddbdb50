use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// How integer labels become target vectors, and how output vectors become
/// predicted labels.
///
/// - `OneHot`:  `1.0` at the label, `0.0` elsewhere; prediction is argmax.
/// - `Soft`:    `high` at the label, `low` elsewhere (0.9 / 0.1 keeps the
///   targets away from the sigmoid's asymptotes); prediction is argmax.
/// - `Binary`:  a single output unit, target `[label]` for labels 0 and 1;
///   prediction is `output > 0.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetEncoding {
    #[default]
    OneHot,
    Soft { low: f64, high: f64 },
    Binary,
}

impl TargetEncoding {
    /// The 0.1 / 0.9 encoding.
    pub fn soft() -> Self {
        TargetEncoding::Soft { low: 0.1, high: 0.9 }
    }

    /// Number of distinct labels a network with `output_size` outputs
    /// distinguishes under this encoding.
    pub fn num_classes(&self, output_size: usize) -> usize {
        match self {
            TargetEncoding::Binary => 2,
            _ => output_size,
        }
    }

    /// Target vector for `label` on a network with `output_size` outputs.
    pub fn target(&self, label: usize, output_size: usize) -> Result<Vec<f64>> {
        let classes = self.num_classes(output_size);
        if label >= classes {
            return Err(NetError::dimension_mismatch(classes, label + 1));
        }
        let (low, high) = match *self {
            TargetEncoding::OneHot => (0.0, 1.0),
            TargetEncoding::Soft { low, high } => (low, high),
            TargetEncoding::Binary => {
                if output_size != 1 {
                    return Err(NetError::dimension_mismatch(1, output_size));
                }
                return Ok(vec![label as f64]);
            }
        };
        let mut target = vec![low; output_size];
        target[label] = high;
        Ok(target)
    }

    /// Label the network's `output` votes for.
    pub fn predict(&self, output: &[f64]) -> usize {
        match self {
            TargetEncoding::Binary => usize::from(output.first().map_or(false, |&y| y > 0.5)),
            _ => argmax(output),
        }
    }
}

/// Index of the maximum element in a slice; the first one wins ties.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > v[best] {
            best = i;
        }
    }
    best
}
