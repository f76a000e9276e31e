use super::{CmdMessage, CmdResult, Host};
use crate::directory::SiteDirectory;
use crate::error::Result;
use crate::lookup::TermLookup;
use crate::model::{PurgeTarget, RequestContext};
use crate::nonce::NonceProvider;
use crate::request;
use crate::transport::Transport;

/// Builds and sends the request for an already validated target, adding
/// `success_message` when the endpoint confirms. An unsuccessful answer is
/// left in `purge` for the caller to report.
pub fn send_target<D, L, N, T>(
    host: &Host<D, L, N, T>,
    target: PurgeTarget,
    ctx: &RequestContext,
    mut result: CmdResult,
    success_message: &str,
) -> Result<CmdResult>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    let request = request::build(target, ctx, &host.nonces)?;
    let outcome = host.dispatcher.send(request)?;
    if outcome.success {
        result.add_message(CmdMessage::success(success_message));
    }
    Ok(result.with_purge(outcome))
}

// --- Test Fixtures ---

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::directory::memory::StaticDirectory;
    use crate::dispatch::{Dispatcher, WireKeys};
    use crate::error::Result;
    use crate::lookup::StaticLookup;
    use crate::transport::fixtures::RecordingTransport;
    use url::Url;

    pub type TestHost = Host<StaticDirectory, StaticLookup, fn(&str) -> Result<String>, RecordingTransport>;

    pub const OK: &str = r#"{"success":true}"#;

    fn nonce(action: &str) -> Result<String> {
        Ok(format!("nonce-{}", action))
    }

    pub fn host(
        directory: StaticDirectory,
        lookup: StaticLookup,
        transport: RecordingTransport,
    ) -> TestHost {
        let site_url = Url::parse("https://mysite.com/").unwrap();
        let endpoint = site_url.join("wp-admin/admin-ajax.php").unwrap();
        Host {
            directory,
            lookup,
            nonces: nonce as fn(&str) -> Result<String>,
            dispatcher: Dispatcher::new(transport, WireKeys::default()),
            base: RequestContext::new(endpoint),
            site_url,
        }
    }

    pub fn network() -> StaticDirectory {
        StaticDirectory::single_site()
            .with_site(1, "mysite.com", "/")
            .with_site(2, "shop.mysite.com", "/")
    }
}
