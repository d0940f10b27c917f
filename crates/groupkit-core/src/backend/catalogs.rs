//! Comps catalogs gathered from repository sources.

use super::repos::RepoDiscovery;
use crate::cancel::CancelCheck;
use crate::comps::{CatalogDocument, GroupResolver};
use crate::error::{GroupkitError, Result};
use tracing::{debug, warn};

/// Loads every repository's comps file and resolves group names against
/// them. Holds no index, so it can be used without a package source.
pub struct GroupCatalogs<R: RepoDiscovery> {
    repos: R,
    locale: String,
}

impl<R: RepoDiscovery> GroupCatalogs<R> {
    pub fn new(repos: R, locale: impl Into<String>) -> Self {
        Self {
            repos,
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Load the comps file of every repository source, in source order.
    ///
    /// Sources without a comps file, and files that cannot be read, are
    /// skipped. Discovery failures and an empty source list abort.
    pub fn load_catalogs(&self, cancel: &dyn CancelCheck) -> Result<Vec<CatalogDocument>> {
        let sources = self
            .repos
            .enumerate_repo_sources()
            .map_err(|e| match e {
                GroupkitError::RepoDiscoveryFailed { .. } => e,
                other => GroupkitError::RepoDiscoveryFailed {
                    message: other.to_string(),
                },
            })?;
        if sources.is_empty() {
            return Err(GroupkitError::RepoNotFound);
        }

        let mut catalogs = Vec::new();
        for source in &sources {
            cancel.check()?;
            let Some(path) = self.repos.locate_catalog_file(source) else {
                debug!("Repo {} has no group metadata", source.id);
                continue;
            };
            match self.repos.load_bytes(&path) {
                Ok(bytes) => {
                    debug!("Comps file loaded: {}", path.display());
                    let name = path.display().to_string();
                    catalogs.push(CatalogDocument::from_bytes(name, bytes));
                }
                Err(e) if !e.is_request_fatal() => {
                    warn!("Couldn't load comps for repo {}: {}", source.id, e)
                }
                Err(e) => return Err(e),
            }
        }
        Ok(catalogs)
    }

    /// Resolve every requested group name, in order, into package names.
    pub fn resolve_groups(
        &self,
        values: &[String],
        cancel: &dyn CancelCheck,
    ) -> Result<Vec<String>> {
        let catalogs = self.load_catalogs(cancel)?;
        let resolver = GroupResolver::new(&catalogs, &self.locale, cancel);
        let mut packages = Vec::new();
        for value in values {
            packages.extend(resolver.resolve(value)?);
        }
        Ok(packages)
    }
}
