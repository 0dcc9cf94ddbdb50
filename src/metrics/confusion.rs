use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Square table of classification counts.
///
/// Rows are predicted labels, columns are actual labels: `get(p, a)` is the
/// number of examples of class `a` that were classified as `p`. The diagonal
/// holds the correct classifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    size: usize,
    cells: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    pub fn new(size: usize) -> Self {
        ConfusionMatrix {
            size,
            cells: vec![vec![0; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Records one classification.
    pub fn add(&mut self, predicted: usize, actual: usize) -> Result<()> {
        let worst = predicted.max(actual);
        if worst >= self.size {
            return Err(NetError::dimension_mismatch(self.size, worst + 1));
        }
        self.cells[predicted][actual] += 1;
        Ok(())
    }

    pub fn get(&self, predicted: usize, actual: usize) -> u64 {
        self.cells[predicted][actual]
    }

    /// Sum of the diagonal.
    pub fn correct(&self) -> u64 {
        (0..self.size).map(|i| self.cells[i][i]).sum()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }

    /// Fraction of recorded examples on the diagonal; `0.0` when nothing has
    /// been recorded.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    /// Adds `other` cell by cell.
    pub fn merge(&mut self, other: &ConfusionMatrix) -> Result<()> {
        if other.size != self.size {
            return Err(NetError::dimension_mismatch(self.size, other.size));
        }
        for (row, other_row) in self.cells.iter_mut().zip(&other.cells) {
            for (cell, x) in row.iter_mut().zip(other_row) {
                *cell += x;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "\t {}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
