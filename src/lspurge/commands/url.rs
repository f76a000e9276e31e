use super::helpers::send_target;
use super::{CmdResult, Host};
use crate::directory::SiteDirectory;
use crate::error::Result;
use crate::lookup::TermLookup;
use crate::nonce::NonceProvider;
use crate::transport::Transport;
use crate::validate::TargetKind;

/// Purges the cache entries of one page by requesting it with the purge action.
pub fn run<D, L, N, T>(host: &Host<D, L, N, T>, url: &str) -> Result<CmdResult>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    let target = host.validator().validate(TargetKind::Url, &[url])?;
    tracing::debug!("url is {}", url);
    send_target(host, target, &host.base, CmdResult::default(), "Purged the url!")
}
