//! Artifact stores keyed by dataset and artifact name

use crate::{PlanetoidError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// The seven serialized objects every dataset provides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactName {
    /// Features of the labeled training nodes
    X,
    /// One-hot labels of the labeled training nodes
    Y,
    /// Features of the test nodes
    Tx,
    /// One-hot labels of the test nodes
    Ty,
    /// Features of all training nodes, labeled and unlabeled
    Allx,
    /// Labels of all training nodes
    Ally,
    /// Node to neighbor-list mapping
    Graph,
}

impl ArtifactName {
    /// All artifacts in load order
    pub const ALL: [ArtifactName; 7] = [
        ArtifactName::X,
        ArtifactName::Y,
        ArtifactName::Tx,
        ArtifactName::Ty,
        ArtifactName::Allx,
        ArtifactName::Ally,
        ArtifactName::Graph,
    ];

    /// File suffix of the artifact
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactName::X => "x",
            ArtifactName::Y => "y",
            ArtifactName::Tx => "tx",
            ArtifactName::Ty => "ty",
            ArtifactName::Allx => "allx",
            ArtifactName::Ally => "ally",
            ArtifactName::Graph => "graph",
        }
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of raw artifact bytes for a dataset
pub trait ArtifactStore {
    /// Serialized bytes of one artifact
    fn read_artifact(&self, dataset: &str, name: ArtifactName) -> Result<Vec<u8>>;

    /// Contents of the test index file
    fn read_test_index(&self, dataset: &str) -> Result<String>;
}

/// Store backed by the conventional `ind.<dataset>.<artifact>` file layout
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at a data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryStore { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an artifact file
    pub fn artifact_path(&self, dataset: &str, name: ArtifactName) -> PathBuf {
        self.root.join(format!("ind.{}.{}", dataset, name))
    }

    /// Path of the test index file
    pub fn test_index_path(&self, dataset: &str) -> PathBuf {
        self.root.join(format!("ind.{}.test.index", dataset))
    }
}

impl ArtifactStore for DirectoryStore {
    fn read_artifact(&self, dataset: &str, name: ArtifactName) -> Result<Vec<u8>> {
        super::read_file(&self.artifact_path(dataset, name))
    }

    fn read_test_index(&self, dataset: &str) -> Result<String> {
        let path = self.test_index_path(dataset);
        let bytes = super::read_file(&path)?;
        String::from_utf8(bytes).map_err(|e| {
            PlanetoidError::Deserialization(format!("{}: {}", path.display(), e))
        })
    }
}

/// In-memory store, keyed the same way as the directory layout
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    artifacts: HashMap<(String, ArtifactName), Vec<u8>>,
    test_indices: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert serialized artifact bytes
    pub fn insert_artifact(&mut self, dataset: &str, name: ArtifactName, bytes: Vec<u8>) -> &mut Self {
        self.artifacts.insert((dataset.to_string(), name), bytes);
        self
    }

    /// Insert test index file contents
    pub fn insert_test_index(&mut self, dataset: &str, contents: impl Into<String>) -> &mut Self {
        self.test_indices.insert(dataset.to_string(), contents.into());
        self
    }
}

impl ArtifactStore for MemoryStore {
    fn read_artifact(&self, dataset: &str, name: ArtifactName) -> Result<Vec<u8>> {
        self.artifacts
            .get(&(dataset.to_string(), name))
            .cloned()
            .ok_or_else(|| PlanetoidError::NotFound(format!("ind.{}.{}", dataset, name)))
    }

    fn read_test_index(&self, dataset: &str) -> Result<String> {
        self.test_indices
            .get(dataset)
            .cloned()
            .ok_or_else(|| PlanetoidError::NotFound(format!("ind.{}.test.index", dataset)))
    }
}
