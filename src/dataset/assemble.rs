//! Stacking the training and test blocks into node-indexed matrices

use crate::sparse::{gather_rows, vstack_rows};
use crate::{PlanetoidError, Result};
use ndarray::{concatenate, Array2, Axis};
use sprs::CsMat;

/// Row source map that moves stacked row `sorted[p]` to row `raw[p]`.
///
/// Rows not named by `raw` keep their position. The map is computed entirely
/// from the stacked order, so applying it never reads a row it has already
/// overwritten.
pub fn reorder_sources(num_rows: usize, raw_index: &[usize], sorted_index: &[usize]) -> Result<Vec<usize>> {
    if raw_index.len() != sorted_index.len() {
        return Err(PlanetoidError::Index(format!(
            "{} raw test indices but {} sorted",
            raw_index.len(),
            sorted_index.len()
        )));
    }

    let mut sources: Vec<usize> = (0..num_rows).collect();
    for (&dst, &src) in raw_index.iter().zip(sorted_index) {
        if dst >= num_rows || src >= num_rows {
            return Err(PlanetoidError::Index(format!(
                "test index {} out of range for {} stacked rows",
                dst.max(src),
                num_rows
            )));
        }
        sources[dst] = src;
    }

    Ok(sources)
}

/// Stack `allx` over `tx` and `ally` over `ty`, then align row `i` with node `i`
pub fn assemble(
    allx: &CsMat<f64>,
    ally: &Array2<f64>,
    tx: &CsMat<f64>,
    ty: &Array2<f64>,
    raw_index: &[usize],
    sorted_index: &[usize],
) -> Result<(CsMat<f64>, Array2<f64>)> {
    let stacked_features = vstack_rows(allx, tx)?;
    let stacked_labels = concatenate(Axis(0), &[ally.view(), ty.view()])
        .map_err(|e| PlanetoidError::ShapeMismatch(format!("cannot stack ally and ty: {}", e)))?;

    if stacked_features.rows() != stacked_labels.nrows() {
        return Err(PlanetoidError::ShapeMismatch(format!(
            "{} feature rows but {} label rows",
            stacked_features.rows(),
            stacked_labels.nrows()
        )));
    }

    let sources = reorder_sources(stacked_features.rows(), raw_index, sorted_index)?;
    let feature_sources: Vec<Option<usize>> = sources.iter().copied().map(Some).collect();

    let features = gather_rows(&stacked_features, &feature_sources)?;
    let labels = stacked_labels.select(Axis(0), &sources);

    Ok((features, labels))
}
