//! Decoding the seven artifacts and the test index of one dataset

use super::{parse_index_file, ArtifactName, ArtifactStore};
use crate::graph::AdjacencyList;
use crate::{PlanetoidError, Result};
use ndarray::Array2;
use serde::de::DeserializeOwned;
use sprs::CsMat;

/// Everything read from storage for one dataset, before reconciliation
#[derive(Clone, Debug)]
pub struct RawArtifacts {
    /// Labeled training features
    pub x: CsMat<f64>,
    /// Labeled training one-hot labels
    pub y: Array2<f64>,
    /// Test features, rows in test index file order
    pub tx: CsMat<f64>,
    /// Test one-hot labels, rows in test index file order
    pub ty: Array2<f64>,
    /// Labeled and unlabeled training features
    pub allx: CsMat<f64>,
    /// Labels for `allx`
    pub ally: Array2<f64>,
    /// Node to neighbor list mapping
    pub graph: AdjacencyList,
    /// Global node indices of the test rows, unsorted
    pub test_index: Vec<usize>,
}

fn decode<T: DeserializeOwned>(
    store: &impl ArtifactStore,
    dataset: &str,
    name: ArtifactName,
) -> Result<T> {
    let bytes = store.read_artifact(dataset, name)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        PlanetoidError::Deserialization(format!("ind.{}.{}: {}", dataset, name, e))
    })
}

fn decode_features(
    store: &impl ArtifactStore,
    dataset: &str,
    name: ArtifactName,
) -> Result<CsMat<f64>> {
    let mat: CsMat<f64> = decode(store, dataset, name)?;
    Ok(if mat.is_csr() { mat } else { mat.to_csr() })
}

fn shape_error(dataset: &str, what: String) -> PlanetoidError {
    PlanetoidError::Deserialization(format!("dataset {}: {}", dataset, what))
}

impl RawArtifacts {
    /// Load and decode all artifacts; fails unless every one is present and well-typed
    pub fn load(store: &impl ArtifactStore, dataset: &str) -> Result<Self> {
        let x = decode_features(store, dataset, ArtifactName::X)?;
        let y: Array2<f64> = decode(store, dataset, ArtifactName::Y)?;
        let tx = decode_features(store, dataset, ArtifactName::Tx)?;
        let ty: Array2<f64> = decode(store, dataset, ArtifactName::Ty)?;
        let allx = decode_features(store, dataset, ArtifactName::Allx)?;
        let ally: Array2<f64> = decode(store, dataset, ArtifactName::Ally)?;
        let graph: AdjacencyList = decode(store, dataset, ArtifactName::Graph)?;
        let test_index = parse_index_file(&store.read_test_index(dataset)?)?;

        let raw = RawArtifacts {
            x,
            y,
            tx,
            ty,
            allx,
            ally,
            graph,
            test_index,
        };
        raw.check_shapes(dataset)?;

        tracing::debug!(
            dataset,
            labeled = raw.y.nrows(),
            train = raw.allx.rows(),
            test = raw.tx.rows(),
            graph_nodes = raw.graph.len(),
            "decoded artifacts"
        );

        Ok(raw)
    }

    fn check_shapes(&self, dataset: &str) -> Result<()> {
        let feature_dim = self.x.cols();
        for (name, mat) in [("tx", &self.tx), ("allx", &self.allx)] {
            if mat.cols() != feature_dim {
                return Err(shape_error(
                    dataset,
                    format!("{} has {} feature columns, x has {}", name, mat.cols(), feature_dim),
                ));
            }
        }

        let num_classes = self.y.ncols();
        for (name, labels) in [("ty", &self.ty), ("ally", &self.ally)] {
            if labels.ncols() != num_classes {
                return Err(shape_error(
                    dataset,
                    format!("{} has {} classes, y has {}", name, labels.ncols(), num_classes),
                ));
            }
        }

        if self.allx.rows() != self.ally.nrows() {
            return Err(shape_error(
                dataset,
                format!(
                    "allx has {} rows but ally has {}",
                    self.allx.rows(),
                    self.ally.nrows()
                ),
            ));
        }

        Ok(())
    }

    /// Feature dimension
    pub fn feature_dim(&self) -> usize {
        self.x.cols()
    }

    /// Number of label classes
    pub fn num_classes(&self) -> usize {
        self.y.ncols()
    }
}
