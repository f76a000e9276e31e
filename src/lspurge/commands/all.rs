use super::helpers::send_target;
use super::{CmdResult, Host};
use crate::directory::SiteDirectory;
use crate::error::Result;
use crate::lookup::TermLookup;
use crate::nonce::NonceProvider;
use crate::transport::Transport;
use crate::validate::TargetKind;

/// Purges everything: the whole network on multisite.
pub fn run<D, L, N, T>(host: &Host<D, L, N, T>) -> Result<CmdResult>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    let target = host.validator().validate::<&str>(TargetKind::All, &[])?;
    send_target(host, target, &host.base, CmdResult::default(), "Purged All!")
}
