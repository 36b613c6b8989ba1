//! Configuration for dataset loading

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// When to expand the test block over its full index span
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapRepair {
    /// Only for `citeseer`, whose test block omits isolated nodes
    Auto,
    /// Expand for every dataset
    Always,
    /// Never expand
    Never,
}

impl GapRepair {
    /// Resolve the mode for a concrete dataset name
    pub fn applies_to(&self, dataset: &str) -> bool {
        match self {
            GapRepair::Auto => dataset == "citeseer",
            GapRepair::Always => true,
            GapRepair::Never => false,
        }
    }
}

/// Loader configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Directory holding the `ind.<dataset>.<artifact>` files
    pub data_dir: PathBuf,
    /// Number of nodes in the validation range following the training range
    pub val_size: usize,
    /// Gap repair mode
    pub gap_repair: GapRepair,
    /// Reject overlapping train/validation/test masks
    pub check_splits: bool,
}

impl LoadConfig {
    /// Config rooted at a data directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        LoadConfig {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Read a config from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let config: LoadConfig = crate::io::load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(crate::PlanetoidError::InvalidConfig(
                "Data directory must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            data_dir: PathBuf::from("data"),
            val_size: 500,
            gap_repair: GapRepair::Auto,
            check_splits: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = LoadConfig::default();
        assert!(config.validate().is_ok());

        config.data_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gap_repair_modes() {
        assert!(GapRepair::Auto.applies_to("citeseer"));
        assert!(!GapRepair::Auto.applies_to("cora"));
        assert!(GapRepair::Always.applies_to("pubmed"));
        assert!(!GapRepair::Never.applies_to("citeseer"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LoadConfig = serde_json::from_str(r#"{"val_size": 20}"#).unwrap();
        assert_eq!(config.val_size, 20);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.gap_repair, GapRepair::Auto);
    }
}
