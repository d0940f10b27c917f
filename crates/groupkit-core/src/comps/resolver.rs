//! Group-to-package resolution across a set of comps catalogs.

use super::alias::resolve_alias;
use super::parser::parse_markup;
use super::state::{ParseContext, QueryMode};
use crate::cancel::CancelCheck;
use crate::error::{GroupkitError, Result};
use tracing::{debug, info, warn};

/// Raw bytes of one catalog file plus the name it is reported under.
#[derive(Debug, Clone)]
pub struct CatalogDocument {
    name: String,
    bytes: Vec<u8>,
}

impl CatalogDocument {
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Walk this document once with a fresh context.
    ///
    /// A malformed document contributes nothing, even if some matches were
    /// seen before the error.
    pub fn collect(&self, mode: QueryMode, target_id: &str, locale: &str) -> Result<Vec<String>> {
        let mut ctx = ParseContext::new(mode, target_id, locale);
        ctx.begin_walk();
        parse_markup(&self.bytes, &mut ctx).map_err(|e| GroupkitError::MalformedDocument {
            source_name: self.name.clone(),
            message: e.to_string(),
        })?;
        Ok(ctx.into_collected())
    }
}

/// Resolves requested group names against an ordered set of catalogs.
pub struct GroupResolver<'a> {
    catalogs: &'a [CatalogDocument],
    locale: &'a str,
    cancel: &'a dyn CancelCheck,
}

impl<'a> GroupResolver<'a> {
    pub fn new(
        catalogs: &'a [CatalogDocument],
        locale: &'a str,
        cancel: &'a dyn CancelCheck,
    ) -> Self {
        Self {
            catalogs,
            locale,
            cancel,
        }
    }

    /// Turn a requested group name into package names.
    ///
    /// Names come back in catalog order, then document order. A package
    /// listed by several matching groups appears once per group; callers
    /// dedupe if they need to.
    pub fn resolve(&self, requested: &str) -> Result<Vec<String>> {
        let target = resolve_alias(requested);

        let group_ids = match target.mode {
            QueryMode::GroupLookup => target.ids,
            QueryMode::CategoryLookup => {
                let mut group_ids = Vec::new();
                for category in &target.ids {
                    let found = self.walk_all(QueryMode::CategoryLookup, category)?;
                    if found.is_empty() {
                        info!("Category {} not found in any catalog", category);
                    }
                    group_ids.extend(found);
                }
                group_ids
            }
        };

        let mut packages = Vec::new();
        for group in &group_ids {
            let found = self.walk_all(QueryMode::GroupLookup, group)?;
            if found.is_empty() {
                debug!("Group {} not available", group);
            }
            packages.extend(found);
        }

        debug!(
            "Resolved {} to {} package names via {} groups",
            requested,
            packages.len(),
            group_ids.len()
        );
        Ok(packages)
    }

    /// Group ids listed by a category, across all catalogs.
    pub fn groups_in_category(&self, category: &str) -> Result<Vec<String>> {
        self.walk_all(QueryMode::CategoryLookup, category)
    }

    /// Package names listed by a group, across all catalogs.
    pub fn packages_in_group(&self, group: &str) -> Result<Vec<String>> {
        self.walk_all(QueryMode::GroupLookup, group)
    }

    fn walk_all(&self, mode: QueryMode, target_id: &str) -> Result<Vec<String>> {
        let mut collected = Vec::new();
        for catalog in self.catalogs {
            self.cancel.check()?;
            match catalog.collect(mode, target_id, self.locale) {
                Ok(found) => collected.extend(found),
                Err(e) if !e.is_request_fatal() => {
                    warn!("Parse failed, skipping catalog: {}", e)
                }
                Err(e) => return Err(e),
            }
        }
        Ok(collected)
    }
}

/// Resolve one requested group name against `catalogs`.
pub fn resolve_group_to_packages(
    requested: &str,
    catalogs: &[CatalogDocument],
    locale: &str,
    cancel: &dyn CancelCheck,
) -> Result<Vec<String>> {
    GroupResolver::new(catalogs, locale, cancel).resolve(requested)
}
