//! Repository source discovery seam.

use crate::config::CompsConfig;
use crate::error::{GroupkitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A configured repository and the metadata files it has on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSource {
    pub id: String,
    /// Metadata kind (`"primary"`, `"group"`, ...) to local file path.
    #[serde(default)]
    pub metadata: BTreeMap<String, PathBuf>,
}

impl RepoSource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, kind: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.metadata.insert(kind.into(), path.into());
        self
    }

    pub fn metadata_path(&self, kind: &str) -> Option<&Path> {
        self.metadata.get(kind).map(PathBuf::as_path)
    }
}

/// Enumerates repository sources and reads their metadata.
pub trait RepoDiscovery: Send + Sync {
    /// All configured sources, in priority order.
    fn enumerate_repo_sources(&self) -> Result<Vec<RepoSource>>;

    /// The comps file of `source`, if it ships one.
    fn locate_catalog_file(&self, source: &RepoSource) -> Option<PathBuf> {
        source
            .metadata_path(CompsConfig::GROUP_METADATA_KIND)
            .map(Path::to_path_buf)
    }

    fn load_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| GroupkitError::io_with_path(e, path))
    }
}

/// A fixed list of sources.
#[derive(Debug, Clone, Default)]
pub struct StaticRepos {
    sources: Vec<RepoSource>,
}

impl StaticRepos {
    pub fn new(sources: Vec<RepoSource>) -> Self {
        Self { sources }
    }
}

impl RepoDiscovery for StaticRepos {
    fn enumerate_repo_sources(&self) -> Result<Vec<RepoSource>> {
        Ok(self.sources.clone())
    }
}
