//! In-memory package index loaded from a JSON package list.
//!
//! Stands in for a real package index engine in the CLI and in tests.

use super::{FilterKey, IndexBuilder, PackageIndex, PackageRecord};
use crate::error::{GroupkitError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Records grouped by package name.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    by_name: HashMap<String, Vec<PackageRecord>>,
    len: usize,
}

impl MemoryIndex {
    /// Build from records, keeping only those `key` admits.
    pub fn from_records(records: impl IntoIterator<Item = PackageRecord>, key: &FilterKey) -> Self {
        let mut index = Self::default();
        for record in records.into_iter().filter(|r| key.admits(r)) {
            index
                .by_name
                .entry(record.name.clone())
                .or_default()
                .push(record);
            index.len += 1;
        }
        index
    }
}

impl PackageIndex for MemoryIndex {
    /// Records come back in the order of `names`, then load order.
    fn query_by_names(&self, names: &[String]) -> Vec<PackageRecord> {
        names
            .iter()
            .filter_map(|name| self.by_name.get(name))
            .flatten()
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Builds a [`MemoryIndex`] from a JSON array of [`PackageRecord`]s.
#[derive(Debug, Clone)]
pub struct JsonIndexBuilder {
    path: PathBuf,
}

impl JsonIndexBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IndexBuilder for JsonIndexBuilder {
    type Index = MemoryIndex;

    fn build_package_index(&self, key: &FilterKey) -> Result<MemoryIndex> {
        let failed = |message: String| GroupkitError::IndexBuildFailed {
            filter: key.to_string(),
            message,
        };

        let bytes = std::fs::read(&self.path)
            .map_err(|e| failed(format!("{}: {}", self.path.display(), e)))?;
        let records: Vec<PackageRecord> = serde_json::from_slice(&bytes)
            .map_err(|e| failed(format!("{}: {}", self.path.display(), e)))?;

        let index = MemoryIndex::from_records(records, key);
        debug!(
            "Loaded {} packages from {} for {}",
            index.len(),
            self.path.display(),
            key
        );
        Ok(index)
    }
}
