//! Argument dispatch and collaborator wiring for the binary.
//!
//! - `run()`: parses, loads config, dispatches (called by `main.rs`)
//! - `load_config()`: config lookup plus overrides
//! - `init_api()`: builds the production `PurgeApi` from a config
//! - `handle_*()`: per-command handlers that call the API and print

use super::render::{print_messages, print_settings, print_site_list};
use super::setup::{Cli, Commands};
use clap::Parser;
use lspurge::api::PurgeApi;
use lspurge::commands::CmdResult;
use lspurge::config::PurgeConfig;
use lspurge::directory::http::HttpDirectory;
use lspurge::directory::memory::StaticDirectory;
use lspurge::directory::SiteDirectory;
use lspurge::dispatch::Dispatcher;
use lspurge::error::{PurgeError, Result};
use lspurge::logging::init_logging;
use lspurge::lookup::{RestLookup, TermLookup};
use lspurge::model::{SiteRecord, TermKind};
use lspurge::nonce::{EndpointNonceProvider, EnvNonceProvider, NonceProvider};
use lspurge::transport::HttpTransport;
use std::path::{Path, PathBuf};

type Nonces = Box<dyn Fn(&str) -> Result<String>>;
type CliApi = PurgeApi<Box<dyn SiteDirectory>, Box<dyn TermLookup>, Nonces, HttpTransport>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (config, source) = load_config(&cli)?;
    let api = init_api(&config)?;
    match cli.command {
        Commands::All => handle_result(api.purge_all()?),
        Commands::Blog { blog_id } => handle_blog(&api, &blog_id),
        Commands::Url { url } => handle_result(api.purge_url(&url)?),
        Commands::Tag { ids } => handle_purge_by(&api, TermKind::Tag, &ids),
        Commands::Category { ids } => handle_purge_by(&api, TermKind::Category, &ids),
        Commands::PostId { ids } => handle_purge_by(&api, TermKind::PostId, &ids),
        Commands::NetworkList => handle_network_list(&api),
        Commands::Config => handle_config(&config, source.as_deref()),
    }
}

/// Returns the effective config and the file it came from, if any.
fn load_config(cli: &Cli) -> Result<(PurgeConfig, Option<PathBuf>)> {
    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(PurgeError::Config(format!(
                "{}: no such file",
                path.display()
            )));
        }
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let source = PurgeConfig::locate(cli.config.as_deref(), &cwd);
    let mut config = match &source {
        Some(path) => PurgeConfig::load(path)?,
        None => PurgeConfig::default(),
    }
    .with_env_overrides();

    if let Some(site_url) = &cli.site_url {
        config.site_url = site_url.clone();
    }
    tracing::debug!(source = ?source, site_url = %config.site_url, "config loaded");
    Ok((config, source))
}

fn init_api(config: &PurgeConfig) -> Result<CliApi> {
    let transport = HttpTransport::new(config.timeout(), config.connect_timeout());

    let directory: Box<dyn SiteDirectory> = match config.sites_url()? {
        Some(url) => Box::new(HttpDirectory::new(url, transport.clone())),
        None if config.multisite || !config.sites.is_empty() => {
            Box::new(StaticDirectory::multisite(config.sites.clone()))
        }
        None => Box::new(StaticDirectory::single_site()),
    };

    let lookup: Box<dyn TermLookup> = Box::new(
        RestLookup::new(config.rest_root()?, transport.clone())
            .with_post_types(config.post_types.clone()),
    );

    let nonces: Nonces = match config.nonce_url()? {
        Some(url) => {
            let provider = EndpointNonceProvider::new(url, transport.clone());
            Box::new(move |action: &str| provider.nonce(action))
        }
        None => Box::new(|action: &str| EnvNonceProvider.nonce(action)),
    };

    Ok(PurgeApi::new(
        directory,
        lookup,
        nonces,
        Dispatcher::new(transport, config.wire.clone()),
        config.site_url()?,
        config.admin_endpoint()?,
    ))
}

/// Prints what the command said, then fails if the endpoint refused.
fn handle_result(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    match result.rejection() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn handle_blog(api: &CliApi, blog_id: &str) -> Result<()> {
    match api.purge_blog(blog_id) {
        Err(PurgeError::InvalidBlogId(raw)) => {
            if let Some(sites) = remediation_sites(api.network_list()) {
                print_site_list(&sites);
            }
            Err(PurgeError::InvalidBlogId(raw))
        }
        other => handle_result(other?),
    }
}

/// Sites to show after an unknown blog id. Listing failures are only logged.
fn remediation_sites(listing: Result<CmdResult>) -> Option<Vec<SiteRecord>> {
    match listing {
        Ok(result) => Some(result.sites),
        Err(e) => {
            tracing::warn!(error = %e, "cannot list the network's sites");
            None
        }
    }
}

fn handle_purge_by(api: &CliApi, kind: TermKind, ids: &[String]) -> Result<()> {
    handle_result(api.purge_by(kind, ids)?)
}

fn handle_network_list(api: &CliApi) -> Result<()> {
    let result = api.network_list().map_err(|e| match e {
        PurgeError::NotMultisite => {
            PurgeError::Api("This is not a multisite installation!".to_string())
        }
        other => other,
    })?;
    print_site_list(&result.sites);
    Ok(())
}

fn handle_config(config: &PurgeConfig, source: Option<&Path>) -> Result<()> {
    let source = source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    let settings = vec![
        ("config_file", source),
        ("site_url", config.site_url()?.to_string()),
        ("admin_endpoint", config.admin_endpoint()?.to_string()),
        ("rest_root", config.rest_root()?.to_string()),
        ("post_types", config.post_types.join(",")),
        ("multisite", config.multisite.to_string()),
        ("sites", config.sites.len().to_string()),
        ("sites_url", optional(&config.sites_url)),
        ("nonce_url", optional(&config.nonce_url)),
        ("dispatch_action", config.wire.dispatch_action.clone()),
        ("action_key", config.wire.action_key.clone()),
        ("nonce_key", config.wire.nonce_key.clone()),
        ("timeout_secs", config.timeout_secs.to_string()),
        ("connect_timeout_secs", config.connect_timeout_secs.to_string()),
    ];
    print_settings(&settings);
    Ok(())
}
