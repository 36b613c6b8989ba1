//! Test block reconciliation: sort order and citeseer gap repair

use crate::sparse::gather_rows;
use crate::{PlanetoidError, Result};
use ndarray::{Array2, Axis};
use sprs::CsMat;
use std::collections::HashSet;

/// Test block after reconciliation
#[derive(Clone, Debug)]
pub struct TestBlock {
    /// Test node indices in ascending order
    pub sorted_index: Vec<usize>,
    /// Test features, expanded over the full span when gap repair ran
    pub tx: CsMat<f64>,
    /// Test labels, expanded alongside `tx`
    pub ty: Array2<f64>,
}

/// Sort the raw test indices and, with `gap_repair`, expand the test block.
///
/// Gap repair covers `[min, max]` of the test indices. Physical test row `p`
/// lands at offset `sorted[p] - min`; span positions no test row claims stay
/// zero in both features and labels.
///
/// Every test index must be below `node_bound`, checked before anything is
/// allocated for the span.
pub fn reconcile_test_block(
    raw_index: &[usize],
    tx: CsMat<f64>,
    ty: Array2<f64>,
    gap_repair: bool,
    node_bound: usize,
) -> Result<TestBlock> {
    if raw_index.is_empty() {
        return Err(PlanetoidError::Index("test index list is empty".to_string()));
    }

    if let Some(&idx) = raw_index.iter().find(|&&idx| idx >= node_bound) {
        return Err(PlanetoidError::Index(format!(
            "test index {} is beyond the {} known nodes",
            idx, node_bound
        )));
    }

    let mut seen = HashSet::with_capacity(raw_index.len());
    if let Some(dup) = raw_index.iter().find(|&&idx| !seen.insert(idx)) {
        return Err(PlanetoidError::Index(format!(
            "test index {} appears more than once",
            dup
        )));
    }

    if tx.rows() != raw_index.len() || ty.nrows() != raw_index.len() {
        return Err(PlanetoidError::ShapeMismatch(format!(
            "{} test indices but tx has {} rows and ty has {}",
            raw_index.len(),
            tx.rows(),
            ty.nrows()
        )));
    }

    let mut sorted_index = raw_index.to_vec();
    sorted_index.sort_unstable();

    if !gap_repair {
        return Ok(TestBlock { sorted_index, tx, ty });
    }

    let min = sorted_index[0];
    let max = sorted_index[sorted_index.len() - 1];
    let span = max
        .checked_sub(min)
        .and_then(|width| width.checked_add(1))
        .ok_or_else(|| {
            PlanetoidError::Index(format!("test index span [{}, {}] is not representable", min, max))
        })?;

    let mut feature_sources = vec![None; span];
    let mut ty_extended = Array2::zeros((span, ty.ncols()));
    for (row, &idx) in sorted_index.iter().enumerate() {
        feature_sources[idx - min] = Some(row);
        ty_extended
            .index_axis_mut(Axis(0), idx - min)
            .assign(&ty.index_axis(Axis(0), row));
    }
    let tx_extended = gather_rows(&tx, &feature_sources)?;

    tracing::debug!(
        min,
        span,
        missing = span - raw_index.len(),
        "expanded test block over its index span"
    );

    Ok(TestBlock {
        sorted_index,
        tx: tx_extended,
        ty: ty_extended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use sprs::TriMat;

    fn tx_rows(rows: &[[f64; 2]]) -> CsMat<f64> {
        let mut tri = TriMat::new((rows.len(), 2));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                if v != 0.0 {
                    tri.add_triplet(i, j, v);
                }
            }
        }
        tri.to_csr()
    }

    #[test]
    fn test_gap_repair_zero_fills_missing_index() {
        let tx = tx_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let ty = array![[1.0, 0.0], [0.0, 1.0]];

        let block = reconcile_test_block(&[5, 7], tx, ty, true, 8).unwrap();

        assert_eq!(block.sorted_index, vec![5, 7]);
        assert_eq!(
            block.tx.to_dense(),
            array![[1.0, 0.0], [0.0, 0.0], [0.0, 1.0]]
        );
        assert_eq!(block.ty, array![[1.0, 0.0], [0.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_without_gap_repair_passes_through() {
        let tx = tx_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let ty = array![[1.0, 0.0], [0.0, 1.0]];

        let block = reconcile_test_block(&[9, 4], tx.clone(), ty.clone(), false, 10).unwrap();

        assert_eq!(block.sorted_index, vec![4, 9]);
        assert_eq!(block.tx.to_dense(), tx.to_dense());
        assert_eq!(block.ty, ty);
    }

    #[test]
    fn test_gap_repair_places_rows_by_sorted_rank() {
        // raw order [8, 6]: physical row 0 goes to offset of 6, row 1 to offset of 8
        let tx = tx_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let ty = array![[1.0, 0.0], [0.0, 1.0]];

        let block = reconcile_test_block(&[8, 6], tx, ty, true, 9).unwrap();

        assert_eq!(block.ty, array![[1.0, 0.0], [0.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn test_empty_index_fails() {
        let err = reconcile_test_block(&[], tx_rows(&[]), Array2::zeros((0, 2)), true, 10).unwrap_err();
        assert!(matches!(err, PlanetoidError::Index(_)));
    }

    #[test]
    fn test_duplicate_index_fails() {
        let tx = tx_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let err = reconcile_test_block(&[3, 3], tx, Array2::zeros((2, 2)), false, 10).unwrap_err();
        assert!(matches!(err, PlanetoidError::Index(_)));
    }

    #[test]
    fn test_row_count_mismatch() {
        let tx = tx_rows(&[[1.0, 0.0]]);
        let err = reconcile_test_block(&[1, 2], tx, Array2::zeros((2, 2)), false, 10).unwrap_err();
        assert!(matches!(err, PlanetoidError::ShapeMismatch(_)));
    }

    #[test]
    fn test_extreme_index_is_rejected_before_allocation() {
        let tx = tx_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let err = reconcile_test_block(&[0, usize::MAX], tx, Array2::zeros((2, 2)), true, 3327)
            .unwrap_err();
        assert!(matches!(err, PlanetoidError::Index(_)));

        let tx = tx_rows(&[[1.0, 0.0], [0.0, 1.0]]);
        let err = reconcile_test_block(&[12, 10_000_000_000_000], tx, Array2::zeros((2, 2)), true, 3327)
            .unwrap_err();
        assert!(matches!(err, PlanetoidError::Index(msg) if msg.contains("10000000000000")));
    }
}
