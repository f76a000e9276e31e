use super::helpers::send_target;
use super::{CmdMessage, CmdResult, Host};
use crate::directory::SiteDirectory;
use crate::error::Result;
use crate::lookup::TermLookup;
use crate::model::{PurgeTarget, TermKind};
use crate::nonce::NonceProvider;
use crate::request::join_ids;
use crate::transport::Transport;
use crate::validate::TargetKind;

/// Purges the cache tags of a list of tags, categories or posts.
///
/// Ids that are not numbers or that name nothing are skipped; the command
/// only fails if none are left.
pub fn run<D, L, N, T, S>(host: &Host<D, L, N, T>, kind: TermKind, ids: &[S]) -> Result<CmdResult>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
    S: AsRef<str>,
{
    let target = host.validator().validate(TargetKind::Terms(kind), ids)?;

    let mut result = CmdResult::default();
    if let PurgeTarget::TagSet { ids, .. } = &target {
        result.add_message(CmdMessage::info(format!(
            "Will purge the following cache tags: {}",
            join_ids(ids)
        )));
    }

    send_target(host, target, &host.base, result, "Purged the tags!")
}
