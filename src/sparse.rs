//! Row-level operations on CSR feature matrices

use crate::{PlanetoidError, Result};
use sprs::{CsMat, TriMat};

/// Build a new matrix whose row `i` is a copy of `mat` row `sources[i]`.
///
/// `None` yields an all-zero row. All sources are read from `mat` as it was
/// passed in, so sources and destinations may overlap freely.
pub fn gather_rows(mat: &CsMat<f64>, sources: &[Option<usize>]) -> Result<CsMat<f64>> {
    let mut triplets = TriMat::new((sources.len(), mat.cols()));

    for (dst, src) in sources.iter().enumerate() {
        let Some(src) = *src else { continue };
        let row = mat.outer_view(src).ok_or_else(|| {
            PlanetoidError::Index(format!(
                "row {} out of range for a matrix with {} rows",
                src,
                mat.rows()
            ))
        })?;
        for (col, &value) in row.iter() {
            triplets.add_triplet(dst, col, value);
        }
    }

    Ok(triplets.to_csr())
}

/// Stack two CSR matrices vertically
pub fn vstack_rows(top: &CsMat<f64>, bottom: &CsMat<f64>) -> Result<CsMat<f64>> {
    if top.cols() != bottom.cols() {
        return Err(PlanetoidError::ShapeMismatch(format!(
            "cannot stack a {}-column block on a {}-column block",
            bottom.cols(),
            top.cols()
        )));
    }

    Ok(sprs::vstack(&[top.view(), bottom.view()]))
}
