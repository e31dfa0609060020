//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KernelConfig {
    #[serde(default)]
    pub loader: LoaderConfig,
}

/// Where and how extension resources are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Resource prefix joined with each capability name.
    #[serde(default = "default_directory")]
    pub directory: String,

    /// Directories searched for resources, in order. `~` is expanded.
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<String>,

    /// Treat the first blank line of a resource as its end.
    #[serde(default)]
    pub legacy_blank_lines: bool,
}

impl LoaderConfig {
    /// Search paths with `~` expanded.
    pub fn resolved_search_paths(&self) -> Vec<PathBuf> {
        self.search_paths
            .iter()
            .map(|path| PathBuf::from(ConfigLoader::expand_path(path)))
            .collect()
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            search_paths: default_search_paths(),
            legacy_blank_lines: false,
        }
    }
}

fn default_directory() -> String {
    "META-INF/extensa/".to_string()
}

fn default_search_paths() -> Vec<String> {
    vec!["./resources".to_string()]
}
