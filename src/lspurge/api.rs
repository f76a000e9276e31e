//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. Every UI (the
//! bundled CLI, a web hook, a deploy script) should purge through it.
//!
//! The facade:
//! - **Dispatches** each operation to its command function
//! - **Owns** the collaborators a command needs (directory, lookup, nonces,
//!   dispatcher) so callers hand over raw arguments only
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no validation, printing or classification of its own; that lives
//! in `commands/*.rs` and below.
//!
//! ## Generic Over Collaborators
//!
//! `PurgeApi<D, L, N, T>` is generic over every seam:
//! - Production: `HttpDirectory`/`RestLookup`/`EndpointNonceProvider` over `HttpTransport`
//! - Testing: `StaticDirectory`/`StaticLookup`/a closure over `RecordingTransport`
//!
//! API tests only check that each method reaches the right command with the
//! right arguments. The command modules hold the behavioral tests.

use crate::commands::{self, CmdResult, Host};
use crate::directory::SiteDirectory;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::lookup::TermLookup;
use crate::model::{RequestContext, TermKind};
use crate::nonce::NonceProvider;
use crate::transport::Transport;
use url::Url;

/// The main API facade for purge operations.
pub struct PurgeApi<D, L, N, T>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    host: Host<D, L, N, T>,
}

impl<D, L, N, T> PurgeApi<D, L, N, T>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    /// `site_url` is the home URL of the install and `endpoint` its main
    /// admin-ajax URL.
    pub fn new(
        directory: D,
        lookup: L,
        nonces: N,
        dispatcher: Dispatcher<T>,
        site_url: Url,
        endpoint: Url,
    ) -> Self {
        Self {
            host: Host {
                directory,
                lookup,
                nonces,
                dispatcher,
                base: RequestContext::new(endpoint),
                site_url,
            },
        }
    }

    pub fn purge_all(&self) -> Result<CmdResult> {
        commands::all::run(&self.host)
    }

    pub fn purge_blog(&self, blog_id: &str) -> Result<CmdResult> {
        commands::blog::run(&self.host, blog_id)
    }

    pub fn purge_url(&self, url: &str) -> Result<CmdResult> {
        commands::url::run(&self.host, url)
    }

    pub fn purge_by<S: AsRef<str>>(&self, kind: TermKind, ids: &[S]) -> Result<CmdResult> {
        commands::purge_by::run(&self.host, kind, ids)
    }

    pub fn purge_tags<S: AsRef<str>>(&self, ids: &[S]) -> Result<CmdResult> {
        self.purge_by(TermKind::Tag, ids)
    }

    pub fn purge_categories<S: AsRef<str>>(&self, ids: &[S]) -> Result<CmdResult> {
        self.purge_by(TermKind::Category, ids)
    }

    pub fn purge_posts<S: AsRef<str>>(&self, ids: &[S]) -> Result<CmdResult> {
        self.purge_by(TermKind::PostId, ids)
    }

    pub fn network_list(&self) -> Result<CmdResult> {
        commands::network_list::run(&self.host.directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::fixtures::{network, OK};
    use crate::directory::memory::StaticDirectory;
    use crate::dispatch::WireKeys;
    use crate::lookup::StaticLookup;
    use crate::transport::fixtures::RecordingTransport;

    type TestApi =
        PurgeApi<StaticDirectory, StaticLookup, fn(&str) -> Result<String>, RecordingTransport>;

    fn nonce(action: &str) -> Result<String> {
        Ok(format!("n-{}", action))
    }

    fn api(directory: StaticDirectory, lookup: StaticLookup, transport: RecordingTransport) -> TestApi {
        PurgeApi::new(
            directory,
            lookup,
            nonce as fn(&str) -> Result<String>,
            Dispatcher::new(transport, WireKeys::default()),
            Url::parse("https://mysite.com/").unwrap(),
            Url::parse("https://mysite.com/wp-admin/admin-ajax.php").unwrap(),
        )
    }

    #[test]
    fn purge_all_dispatches_purge_all() {
        let transport = RecordingTransport::new().respond("admin-ajax.php", 200, OK);
        let api = api(StaticDirectory::single_site(), StaticLookup::new(), transport.clone());

        api.purge_all().unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].param("LSCWP_CTRL"), Some("PURGE_ALL"));
        assert_eq!(calls[0].param("LSCWP_NONCE"), Some("n-PURGE_ALL"));
        assert_eq!(calls[0].param("action"), Some("lscache_cli"));
    }

    #[test]
    fn purge_blog_dispatches_to_blog_endpoint() {
        let transport = RecordingTransport::new().respond("admin-ajax.php", 200, OK);
        let api = api(network(), StaticLookup::new(), transport.clone());

        api.purge_blog("2").unwrap();

        assert_eq!(transport.calls_to("shop.mysite.com").len(), 1);
    }

    #[test]
    fn purge_url_dispatches_direct_request() {
        let transport = RecordingTransport::new().respond("mysite.com/about", 200, OK);
        let api = api(StaticDirectory::single_site(), StaticLookup::new(), transport.clone());

        api.purge_url("https://mysite.com/about/").unwrap();

        assert_eq!(transport.calls()[0].param("LSCWP_CTRL"), Some("PURGE"));
    }

    #[test]
    fn term_helpers_pick_their_selector() {
        let transport = RecordingTransport::new().respond("admin-ajax.php", 200, OK);
        let lookup = StaticLookup::new()
            .with(TermKind::Tag, &[1])
            .with(TermKind::Category, &[2])
            .with(TermKind::PostId, &[3]);
        let api = api(StaticDirectory::single_site(), lookup, transport.clone());

        api.purge_tags(&["1"]).unwrap();
        api.purge_categories(&["2"]).unwrap();
        api.purge_posts(&["3"]).unwrap();

        let selects: Vec<_> = transport
            .calls()
            .iter()
            .map(|c| c.param("select").map(str::to_string))
            .collect();
        assert_eq!(
            selects,
            vec![
                Some("tag".to_string()),
                Some("category".to_string()),
                Some("post_id".to_string())
            ]
        );
    }

    #[test]
    fn network_list_reads_directory_only() {
        let transport = RecordingTransport::new();
        let api = api(network(), StaticLookup::new(), transport.clone());

        let result = api.network_list().unwrap();

        assert_eq!(result.sites.len(), 2);
        assert!(transport.calls().is_empty());
    }
}
