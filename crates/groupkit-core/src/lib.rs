//! groupkit - resolve comps package groups into installable packages.
//!
//! Distribution catalogs ("comps" files) describe groups of packages and
//! categories of groups. This crate parses those catalogs with a streaming
//! state machine, maps coarse legacy group names onto comps ids, and looks
//! the resulting package names up in a cached package index.
//!
//! # Example
//!
//! ```rust,ignore
//! use groupkit::{Backend, BackendConfig, JsonIndexBuilder, RepoSource, SearchFilters, StaticRepos};
//!
//! let repos = StaticRepos::new(vec![
//!     RepoSource::new("fedora").with_metadata("group", "/var/cache/fedora/comps.xml"),
//! ]);
//! let backend = Backend::new(repos, JsonIndexBuilder::new("packages.json"), &BackendConfig::default());
//!
//! // `sink` implements `JobSink`
//! backend.search_groups(&sink, SearchFilters::default(), &["desktop-gnome".to_string()])?;
//! ```

pub mod backend;
pub mod cancel;
pub mod comps;
pub mod config;
pub mod error;
pub mod index;

// Re-export commonly used types
pub use backend::{Backend, GroupCatalogs, JobSink, RepoDiscovery, RepoSource, StaticRepos};
pub use cancel::{CancelCheck, CancellationToken, CancelledError, NeverCancel};
pub use comps::{
    resolve_alias, resolve_group_to_packages, CatalogDocument, GroupResolver, ParseContext,
    QueryMode,
};
pub use config::{BackendConfig, CompsConfig};
pub use error::{ErrorKind, GroupkitError, Result};
pub use index::{
    FilterKey, IndexBuilder, IndexCache, InfoKind, InstalledFilter, JsonIndexBuilder, MemoryIndex,
    PackageIndex, PackageRecord, SearchFilters,
};
