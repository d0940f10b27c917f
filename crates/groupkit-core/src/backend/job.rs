//! Group search jobs.

use super::catalogs::GroupCatalogs;
use super::repos::RepoDiscovery;
use crate::cancel::CancelCheck;
use crate::config::BackendConfig;
use crate::error::{ErrorKind, Result};
use crate::index::{IndexBuilder, IndexCache, InfoKind, PackageIndex, SearchFilters};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Where a job reports its results.
///
/// Sinks are shared with whatever runs the job, so every method takes
/// `&self`; cancellation is polled through [`CancelCheck`].
pub trait JobSink: CancelCheck {
    fn report_package(&self, info: InfoKind, package_id: &str, summary: &str);
    fn report_error(&self, kind: ErrorKind, message: &str);
    fn report_finished(&self);
}

/// Polls a sink's cancellation flag through a plain `CancelCheck` object.
struct SinkCancel<'a>(&'a dyn JobSink);

impl CancelCheck for SinkCancel<'_> {
    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

/// Process-wide backend state shared by concurrent jobs.
///
/// The index cache is the only state jobs share. Catalogs and parse state
/// are local to each call.
pub struct Backend<R: RepoDiscovery, B: IndexBuilder> {
    catalogs: GroupCatalogs<R>,
    cache: IndexCache<B>,
}

impl<R: RepoDiscovery, B: IndexBuilder> Backend<R, B> {
    pub fn new(repos: R, builder: B, config: &BackendConfig) -> Self {
        let cache = if config.use_cache {
            IndexCache::new(builder)
        } else {
            IndexCache::disabled(builder)
        };
        let catalogs = GroupCatalogs::new(repos, config.resolved_locale());
        info!("Backend initialized, locale {}", catalogs.locale());
        Self { catalogs, cache }
    }

    pub fn catalogs(&self) -> &GroupCatalogs<R> {
        &self.catalogs
    }

    pub fn cache(&self) -> &IndexCache<B> {
        &self.cache
    }

    /// Repository state changed; cached indexes must be rebuilt.
    pub fn repos_changed(&self) {
        self.cache.mark_stale();
    }

    /// Drop every cached index.
    pub fn shutdown(&self) {
        debug!("Backend shutting down");
        self.cache.invalidate_all();
    }

    /// Search packages belonging to the requested groups.
    ///
    /// Always ends with `report_finished`. A request-level failure is
    /// reported once through `report_error` and also returned.
    pub fn search_groups(
        &self,
        sink: &dyn JobSink,
        filters: SearchFilters,
        values: &[String],
    ) -> Result<()> {
        let result = self.run_search_groups(sink, filters, values);
        if let Err(e) = &result {
            warn!("Group search failed: {}", e);
            sink.report_error(e.kind(), &e.to_string());
        }
        sink.report_finished();
        result
    }

    fn run_search_groups(
        &self,
        sink: &dyn JobSink,
        filters: SearchFilters,
        values: &[String],
    ) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        let resolved = self.catalogs.resolve_groups(values, &SinkCancel(sink))?;
        let mut seen = HashSet::new();
        let names: Vec<String> = resolved
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect();
        if names.is_empty() {
            debug!("No packages found for groups {:?}", values);
            return Ok(());
        }

        sink.check()?;
        let index = self.cache.get_or_build_index(&filters.filter_key())?;
        for record in index.query_by_names(&names) {
            sink.check()?;
            sink.report_package(record.info_kind(), &record.package_id(), &record.summary);
        }
        Ok(())
    }
}
