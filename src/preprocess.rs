//! Row normalization of feature matrices

use ndarray::{Array2, Axis};
use num_traits::Float;
use sprs::CsMat;

/// Matrices whose rows can be scaled to unit sum
pub trait RowNormalize {
    /// Divide every row by its sum; a row summing to zero stays all zero
    fn row_normalize(&self) -> Self;
}

/// Inverse row sum, with the infinite inverse of a zero row replaced by zero
fn inverse_sum<T: Float>(sum: T) -> T {
    let inv = sum.recip();
    if inv.is_infinite() {
        T::zero()
    } else {
        inv
    }
}

impl<T: Float + Default> RowNormalize for CsMat<T> {
    fn row_normalize(&self) -> Self {
        let csr = if self.is_csr() { self.clone() } else { self.to_csr() };
        let scales: Vec<T> = csr
            .outer_iterator()
            .map(|row| inverse_sum(row.data().iter().fold(T::zero(), |acc, &v| acc + v)))
            .collect();

        let mut out = csr;
        for (row, mut values) in out.outer_iterator_mut().enumerate() {
            let scale = scales[row];
            values.map_inplace(|&v| v * scale);
        }
        out
    }
}

impl<T: Float> RowNormalize for Array2<T> {
    fn row_normalize(&self) -> Self {
        let mut out = self.clone();
        for mut row in out.axis_iter_mut(Axis(0)) {
            let scale = inverse_sum(row.iter().fold(T::zero(), |acc, &v| acc + v));
            row.mapv_inplace(|v| v * scale);
        }
        out
    }
}

/// Row-normalize a feature matrix
pub fn preprocess_features<M: RowNormalize>(features: &M) -> M {
    features.row_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;
    use sprs::TriMat;

    fn sparse_from_dense(dense: &Array2<f64>) -> CsMat<f64> {
        let mut tri = TriMat::new(dense.dim());
        for ((i, j), &v) in dense.indexed_iter() {
            if v != 0.0 {
                tri.add_triplet(i, j, v);
            }
        }
        tri.to_csr()
    }

    #[test]
    fn test_dense_rows_sum_to_one() {
        let features = array![[1.0, 3.0], [2.0, 2.0], [0.0, 5.0]];
        let normalized = preprocess_features(&features);
        assert_eq!(normalized, array![[0.25, 0.75], [0.5, 0.5], [0.0, 1.0]]);
    }

    #[test]
    fn test_zero_row_stays_zero() {
        let features = array![[0.0, 0.0, 0.0], [1.0, 0.0, 1.0]];
        let normalized = preprocess_features(&sparse_from_dense(&features));
        let dense = normalized.to_dense();

        assert_eq!(dense, array![[0.0, 0.0, 0.0], [0.5, 0.0, 0.5]]);
        assert!(dense.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_sparsity_pattern_preserved() {
        let mut tri = TriMat::new((2, 4));
        tri.add_triplet(0, 1, 2.0);
        tri.add_triplet(0, 3, 6.0);
        tri.add_triplet(1, 2, 0.0);
        let features: CsMat<f64> = tri.to_csr();

        let normalized = preprocess_features(&features);

        assert_eq!(
            normalized.indptr().raw_storage(),
            features.indptr().raw_storage()
        );
        assert_eq!(normalized.indices(), features.indices());
        assert_eq!(normalized.data(), &[0.25, 0.75, 0.0]);
    }

    #[test]
    fn test_csc_input() {
        let features = sparse_from_dense(&array![[1.0, 1.0], [0.0, 4.0]]).to_csc();
        let normalized = preprocess_features(&features);
        assert!(normalized.is_csr());
        assert_eq!(normalized.to_dense(), array![[0.5, 0.5], [0.0, 1.0]]);
    }

    proptest! {
        #[test]
        fn prop_row_sums_are_one_or_zero(
            rows in prop::collection::vec(prop::collection::vec(0u8..4, 6), 1..20)
        ) {
            let n = rows.len();
            let dense = Array2::from_shape_fn((n, 6), |(i, j)| rows[i][j] as f64);
            let normalized = preprocess_features(&sparse_from_dense(&dense)).to_dense();

            for (row_in, row_out) in dense.outer_iter().zip(normalized.outer_iter()) {
                let sum: f64 = row_out.sum();
                prop_assert!(row_out.iter().all(|v| v.is_finite()));
                if row_in.sum() == 0.0 {
                    prop_assert_eq!(sum, 0.0);
                } else {
                    prop_assert!((sum - 1.0).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn prop_sparse_and_dense_agree(
            rows in prop::collection::vec(prop::collection::vec(0u8..4, 3), 1..10)
        ) {
            let n = rows.len();
            let dense = Array2::from_shape_fn((n, 3), |(i, j)| rows[i][j] as f64);
            let from_sparse = preprocess_features(&sparse_from_dense(&dense)).to_dense();
            let from_dense = preprocess_features(&dense);
            prop_assert_eq!(from_sparse, from_dense);
        }
    }
}
