//! Class labels, isolated-row detection and split masks

use crate::{PlanetoidError, Result};
use ndarray::{Array1, Array2};
use std::ops::Range;

/// Column of the largest value per row, ties to the lowest column.
///
/// An all-zero row maps to class `0`, the same as a genuine class-0 label; use
/// [`isolated_rows`] to tell them apart.
pub fn class_indices(labels: &Array2<f64>) -> Array1<usize> {
    labels
        .outer_iter()
        .map(|row| {
            let mut best = 0;
            for (j, &value) in row.iter().enumerate() {
                if value > row[best] {
                    best = j;
                }
            }
            best
        })
        .collect()
}

/// Rows with no label signal at all
pub fn isolated_rows(labels: &Array2<f64>) -> Vec<usize> {
    labels
        .outer_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().all(|&v| v == 0.0))
        .map(|(i, _)| i)
        .collect()
}

/// Find the isolated rows and emit one warning carrying their count
pub fn report_isolated(dataset: &str, labels: &Array2<f64>) -> Vec<usize> {
    let isolated = isolated_rows(labels);
    if !isolated.is_empty() {
        tracing::warn!(
            dataset,
            count = isolated.len(),
            "dataset contains isolated nodes"
        );
    }
    isolated
}

/// Boolean mask of length `len` that is true at `indices`; out-of-range indices are ignored
pub fn sample_mask(indices: impl IntoIterator<Item = usize>, len: usize) -> Array1<bool> {
    let mut mask = Array1::from_elem(len, false);
    for idx in indices {
        if idx < len {
            mask[idx] = true;
        }
    }
    mask
}

/// Labels of the rows selected by `mask`, in node order
pub fn masked_labels(labels: &Array1<usize>, mask: &Array1<bool>) -> Array1<usize> {
    labels
        .iter()
        .zip(mask.iter())
        .filter(|&(_, &selected)| selected)
        .map(|(&label, _)| label)
        .collect()
}

/// Train, validation and test masks over the full node set
#[derive(Clone, Debug, PartialEq)]
pub struct SplitMasks {
    /// Labeled training nodes
    pub train: Array1<bool>,
    /// Validation nodes
    pub val: Array1<bool>,
    /// Test nodes
    pub test: Array1<bool>,
}

impl SplitMasks {
    /// Train covers `[0, num_labeled)`, validation the next `val_size` nodes,
    /// test exactly `test_index`
    pub fn new(num_nodes: usize, num_labeled: usize, val_size: usize, test_index: &[usize]) -> Self {
        SplitMasks {
            train: sample_mask(0..num_labeled, num_nodes),
            val: sample_mask(Self::val_range(num_labeled, val_size), num_nodes),
            test: sample_mask(test_index.iter().copied(), num_nodes),
        }
    }

    fn val_range(num_labeled: usize, val_size: usize) -> Range<usize> {
        num_labeled..num_labeled.saturating_add(val_size)
    }

    /// Reject any node that belongs to more than one split
    pub fn check_disjoint(&self) -> Result<()> {
        let overlap = self
            .train
            .iter()
            .zip(self.val.iter())
            .zip(self.test.iter())
            .position(|((&t, &v), &s)| (t as u8 + v as u8 + s as u8) > 1);

        match overlap {
            Some(node) => Err(PlanetoidError::Index(format!(
                "node {} belongs to more than one split",
                node
            ))),
            None => Ok(()),
        }
    }

    /// Number of nodes in each split
    pub fn counts(&self) -> (usize, usize, usize) {
        let count = |mask: &Array1<bool>| mask.iter().filter(|&&m| m).count();
        (count(&self.train), count(&self.val), count(&self.test))
    }
}
