//! groupkit - resolve comps package groups from the command line.
//!
//! Each `--repo` names a repository and its comps file. With `--packages`
//! the resolved names are looked up in a JSON package list and reported as
//! packages; without it only the resolved names are printed.

mod sink;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use groupkit::{
    Backend, BackendConfig, CancelCheck, CancellationToken, GroupCatalogs, GroupResolver,
    JsonIndexBuilder, RepoSource, SearchFilters, StaticRepos,
};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::sink::StdoutSink;

#[derive(Parser, Debug)]
#[command(name = "groupkit")]
#[command(about = "Resolve comps package groups into packages")]
struct Args {
    /// Group names to resolve (legacy names like "desktop-gnome" or comps group ids)
    #[arg(required = true)]
    groups: Vec<String>,

    /// Repository and its comps file, as ID=PATH (repeatable, in priority order)
    #[arg(long = "repo", value_name = "ID=PATH", value_parser = parse_repo)]
    repos: Vec<RepoSource>,

    /// JSON package list to look resolved names up in
    #[arg(long, value_name = "FILE")]
    packages: Option<PathBuf>,

    /// Only report installed packages
    #[arg(long, conflicts_with = "not_installed")]
    installed: bool,

    /// Only report packages that are not installed
    #[arg(long)]
    not_installed: bool,

    /// Locale used to select localized descriptions (defaults to the environment)
    #[arg(long)]
    locale: Option<String>,

    /// JSON backend configuration; --locale overrides its locale
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print one JSON object per package
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn backend_config(&self) -> Result<BackendConfig> {
        let mut config = match &self.config {
            Some(path) => BackendConfig::load(path)?,
            None => BackendConfig::default(),
        };
        if self.locale.is_some() {
            config.locale = self.locale.clone();
        }
        Ok(config)
    }

    fn filters(&self) -> SearchFilters {
        if self.installed {
            SearchFilters::installed_only()
        } else if self.not_installed {
            SearchFilters::not_installed()
        } else {
            SearchFilters::default()
        }
    }
}

fn parse_repo(spec: &str) -> Result<RepoSource> {
    let (id, path) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("expected ID=PATH, got {:?}", spec))?;
    if id.is_empty() || path.is_empty() {
        bail!("expected ID=PATH, got {:?}", spec);
    }
    Ok(RepoSource::new(id).with_metadata(groupkit::CompsConfig::GROUP_METADATA_KIND, path))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging; stdout carries results, so logs go to stderr
    let log_level = if args.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).context("Failed to install Ctrl-C handler")?;
    }

    let config = args.backend_config()?;
    let repos = StaticRepos::new(args.repos.clone());

    match &args.packages {
        Some(packages) => search(&args, repos, packages.clone(), &config, cancel),
        None => resolve(&args, repos, &config, &cancel),
    }
}

/// Resolve and report packages through the backend.
fn search(
    args: &Args,
    repos: StaticRepos,
    packages: PathBuf,
    config: &BackendConfig,
    cancel: CancellationToken,
) -> Result<()> {
    let backend = Backend::new(repos, JsonIndexBuilder::new(packages), config);
    let sink = StdoutSink::new(args.json, cancel);

    backend
        .search_groups(&sink, args.filters(), &args.groups)
        .context("Group search failed")?;
    info!("Reported {} packages", sink.reported());
    Ok(())
}

/// Print resolved package names without consulting an index.
fn resolve(
    args: &Args,
    repos: StaticRepos,
    config: &BackendConfig,
    cancel: &dyn CancelCheck,
) -> Result<()> {
    let groups = GroupCatalogs::new(repos, config.resolved_locale());
    debug!("Resolving with locale {}", groups.locale());
    let catalogs = groups.load_catalogs(cancel)?;

    let resolver = GroupResolver::new(&catalogs, groups.locale(), cancel);
    for group in &args.groups {
        for name in resolver.resolve(group)? {
            if args.json {
                println!("{}", serde_json::json!({ "group": group, "name": name }));
            } else {
                println!("{}", name);
            }
        }
    }
    Ok(())
}
