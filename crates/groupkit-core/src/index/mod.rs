//! Package index seam.
//!
//! This module provides:
//! - Filter normalization into cache keys
//! - The `PackageIndex` / `IndexBuilder` collaborator traits
//! - A mutex-guarded cache of built indexes
//! - A small JSON-backed in-memory index

mod cache;
mod memory;

pub use cache::IndexCache;
pub use memory::{JsonIndexBuilder, MemoryIndex};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Whether a search looks at installed packages, available ones, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstalledFilter {
    #[default]
    Any,
    Installed,
    NotInstalled,
}

/// Query filters supplied with a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub installed: InstalledFilter,
}

impl SearchFilters {
    pub fn installed_only() -> Self {
        Self {
            installed: InstalledFilter::Installed,
        }
    }

    pub fn not_installed() -> Self {
        Self {
            installed: InstalledFilter::NotInstalled,
        }
    }

    /// Normalize into the key an index is built and cached under.
    pub fn filter_key(&self) -> FilterKey {
        match self.installed {
            InstalledFilter::Any => FilterKey {
                installed: true,
                available: true,
            },
            InstalledFilter::Installed => FilterKey {
                installed: true,
                available: false,
            },
            InstalledFilter::NotInstalled => FilterKey {
                installed: false,
                available: true,
            },
        }
    }
}

/// Which package sources an index covers.
///
/// Filters that load the same sources share a key and therefore an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub installed: bool,
    pub available: bool,
}

impl FilterKey {
    pub fn as_str(&self) -> &'static str {
        match (self.installed, self.available) {
            (true, true) => "installed+available",
            (true, false) => "installed",
            (false, true) => "available",
            (false, false) => "none",
        }
    }

    /// Whether a record belongs in an index built for this key.
    pub fn admits(&self, record: &PackageRecord) -> bool {
        if record.is_installed() {
            self.installed
        } else {
            self.available
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reported state of an emitted package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfoKind {
    Installed,
    Available,
}

impl InfoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoKind::Installed => "installed",
            InfoKind::Available => "available",
        }
    }
}

impl std::fmt::Display for InfoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One package as returned by an index query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PackageRecord {
    pub name: String,
    /// `epoch:version-release`, or a bare version.
    #[serde(alias = "version")]
    pub evr: String,
    pub arch: String,
    pub repo_id: String,
    /// Seconds since the epoch; zero when not installed.
    #[serde(default)]
    pub install_time: u64,
    #[serde(default)]
    pub summary: String,
}

impl PackageRecord {
    pub fn is_installed(&self) -> bool {
        self.install_time > 0
    }

    pub fn info_kind(&self) -> InfoKind {
        if self.is_installed() {
            InfoKind::Installed
        } else {
            InfoKind::Available
        }
    }

    /// `name;evr;arch;repo_id`, joined verbatim with no escaping.
    pub fn package_id(&self) -> String {
        format!("{};{};{};{}", self.name, self.evr, self.arch, self.repo_id)
    }
}

/// A built, queryable package index.
pub trait PackageIndex: Send + Sync {
    /// Every record whose name is in `names`.
    fn query_by_names(&self, names: &[String]) -> Vec<PackageRecord>;

    /// Number of records the index holds.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds package indexes; usually slow.
pub trait IndexBuilder: Send + Sync {
    type Index: PackageIndex;

    fn build_package_index(&self, key: &FilterKey) -> Result<Self::Index>;
}
