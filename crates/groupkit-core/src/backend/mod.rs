//! Job-facing backend: repo discovery, the shared index cache, and the
//! `search_groups` entry point.

mod catalogs;
mod job;
mod repos;

pub use catalogs::GroupCatalogs;
pub use job::{Backend, JobSink};
pub use repos::{RepoDiscovery, RepoSource, StaticRepos};
