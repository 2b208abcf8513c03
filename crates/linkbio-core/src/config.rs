use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Where and how Linkbio persists its state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkbioConfig {
    /// Directory backing the file store.
    pub data_dir: PathBuf,
    /// Namespace prepended to the `users` and `current_user` keys.
    pub key_prefix: String,
}

impl Default for LinkbioConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".linkbio"),
            key_prefix: String::new(),
        }
    }
}

impl LinkbioConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(input: &str) -> CoreResult<Self> {
        toml::from_str(input).map_err(|e| CoreError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&input)
    }
}
