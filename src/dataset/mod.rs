//! Loading a citation dataset into node-aligned matrices and split masks

mod assemble;
mod reconcile;
mod splits;

use crate::config::LoadConfig;
use crate::graph::{adjacency_matrix, node_bound};
use crate::io::{ArtifactStore, DirectoryStore, RawArtifacts};
use crate::Result;
use ndarray::Array1;
use sprs::CsMat;

pub use assemble::{assemble, reorder_sources};
pub use reconcile::{reconcile_test_block, TestBlock};
pub use splits::{
    class_indices, isolated_rows, masked_labels, report_isolated, sample_mask, SplitMasks,
};

/// Adjacency, features, per-split labels, class count and split masks
pub type DatasetParts = (
    CsMat<f64>,
    CsMat<f64>,
    Array1<usize>,
    Array1<usize>,
    Array1<usize>,
    usize,
    Array1<bool>,
    Array1<bool>,
    Array1<bool>,
);

/// A fully assembled dataset; row `i` of every matrix is graph node `i`
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Symmetric adjacency matrix
    pub adj: CsMat<f64>,
    /// Node features
    pub features: CsMat<f64>,
    /// Class labels of the training nodes
    pub y_train: Array1<usize>,
    /// Class labels of the validation nodes
    pub y_val: Array1<usize>,
    /// Class labels of the test nodes
    pub y_test: Array1<usize>,
    /// Number of classes
    pub num_classes: usize,
    /// Training mask
    pub train_mask: Array1<bool>,
    /// Validation mask
    pub val_mask: Array1<bool>,
    /// Test mask
    pub test_mask: Array1<bool>,
    /// Nodes whose label row was all zero; their class reads as 0
    pub isolated_nodes: Vec<usize>,
}

impl Dataset {
    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.features.rows()
    }

    /// Feature dimension
    pub fn feature_dim(&self) -> usize {
        self.features.cols()
    }

    /// Split into the plain output tuple
    pub fn into_parts(self) -> DatasetParts {
        (
            self.adj,
            self.features,
            self.y_train,
            self.y_val,
            self.y_test,
            self.num_classes,
            self.train_mask,
            self.val_mask,
            self.test_mask,
        )
    }
}

/// Load a dataset from the default `data` directory
pub fn load_data(dataset: &str) -> Result<Dataset> {
    load_data_with_config(dataset, &LoadConfig::default())
}

/// Load a dataset from the directory named in `config`
pub fn load_data_with_config(dataset: &str, config: &LoadConfig) -> Result<Dataset> {
    config.validate()?;
    let store = DirectoryStore::new(&config.data_dir);
    tracing::debug!(dataset, data_dir = %store.root().display(), "reading from directory");
    load_data_from_store(&store, dataset, config)
}

/// Load a dataset from any artifact store
pub fn load_data_from_store(
    store: &impl ArtifactStore,
    dataset: &str,
    config: &LoadConfig,
) -> Result<Dataset> {
    tracing::info!(dataset, "loading citation dataset");

    let raw = RawArtifacts::load(store, dataset)?;
    let num_labeled = raw.y.nrows();
    let num_classes = raw.num_classes();

    let gap_repair = config.gap_repair.applies_to(dataset);
    // test nodes live either in the graph or in the stacked blocks
    let known_nodes = node_bound(&raw.graph).max(raw.allx.rows() + raw.tx.rows());
    tracing::debug!(
        dataset,
        gap_repair,
        test_rows = raw.test_index.len(),
        known_nodes,
        feature_dim = raw.feature_dim(),
        "reconciling test block"
    );
    let block = reconcile_test_block(&raw.test_index, raw.tx, raw.ty, gap_repair, known_nodes)?;

    let (features, labels) = assemble(
        &raw.allx,
        &raw.ally,
        &block.tx,
        &block.ty,
        &raw.test_index,
        &block.sorted_index,
    )?;
    let num_nodes = features.rows();
    let adj = adjacency_matrix(&raw.graph, num_nodes)?;

    let isolated_nodes = report_isolated(dataset, &labels);
    let classes = class_indices(&labels);

    let masks = SplitMasks::new(num_nodes, num_labeled, config.val_size, &block.sorted_index);
    if config.check_splits {
        masks.check_disjoint()?;
    }
    let (train, val, test) = masks.counts();

    let dataset_out = Dataset {
        adj,
        features,
        y_train: masked_labels(&classes, &masks.train),
        y_val: masked_labels(&classes, &masks.val),
        y_test: masked_labels(&classes, &masks.test),
        num_classes,
        train_mask: masks.train,
        val_mask: masks.val,
        test_mask: masks.test,
        isolated_nodes,
    };

    tracing::info!(
        dataset,
        nodes = num_nodes,
        features = dataset_out.feature_dim(),
        classes = num_classes,
        edges = dataset_out.adj.nnz(),
        train,
        val,
        test,
        "dataset loaded"
    );

    Ok(dataset_out)
}
