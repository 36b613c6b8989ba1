//! # planetoid-data: citation network datasets for node classification
//!
//! Loads the Planetoid family of citation datasets (cora, citeseer, pubmed)
//! from their per-artifact files, reconciles the training and test blocks into
//! one node-indexed matrix, and builds the split masks a semi-supervised
//! classifier consumes.
//!
//! ## Features
//!
//! - **Artifact loading**: seven serialized objects plus the test index file
//! - **Index reconciliation**: sort-derived reordering and citeseer gap repair
//! - **Assembly**: node-aligned sparse features, dense labels, adjacency
//! - **Splits**: train / validation / test masks and per-split labels
//! - **Preprocessing**: row normalization of feature matrices

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Loader configuration
pub mod config;

/// Artifact stores and file parsing
pub mod io;

/// Sparse matrix helpers
pub mod sparse;

/// Adjacency matrix construction
pub mod graph;

/// Reconciliation, assembly and split construction
pub mod dataset;

/// Feature preprocessing
pub mod preprocess;

// Re-export commonly used types
pub use config::{GapRepair, LoadConfig};
pub use dataset::{load_data, load_data_from_store, load_data_with_config, Dataset};
pub use io::{ArtifactName, ArtifactStore, DirectoryStore, MemoryStore};
pub use preprocess::{preprocess_features, RowNormalize};

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum PlanetoidError {
    /// A required artifact or index file is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Artifact content does not match the type expected for its slot
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Test index list is empty, duplicated or out of range
    #[error("Index error: {0}")]
    Index(String),

    /// Matrix dimensions that must agree do not
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Invalid loader configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// IO error other than a missing file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for PlanetoidError {
    fn from(err: serde_json::Error) -> Self {
        PlanetoidError::Deserialization(err.to_string())
    }
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, PlanetoidError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        config::{GapRepair, LoadConfig},
        dataset::{load_data, load_data_with_config, Dataset},
        io::{ArtifactStore, DirectoryStore, MemoryStore},
        preprocess::{preprocess_features, RowNormalize},
        PlanetoidError, Result,
    };
}
