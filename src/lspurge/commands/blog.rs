use super::helpers::send_target;
use super::{CmdResult, Host};
use crate::directory::SiteDirectory;
use crate::error::{PurgeError, Result};
use crate::lookup::TermLookup;
use crate::model::PurgeTarget;
use crate::nonce::NonceProvider;
use crate::transport::Transport;
use crate::validate::TargetKind;

/// Purges one blog of a multisite network.
///
/// The request goes to that blog's own admin-ajax endpoint. The context is
/// derived from the network's base context; nothing global changes, so later
/// commands in the same process still talk to the main site.
pub fn run<D, L, N, T>(host: &Host<D, L, N, T>, blog_id: &str) -> Result<CmdResult>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    let target = host.validator().validate(TargetKind::Site, &[blog_id])?;
    let PurgeTarget::Site(id) = target else {
        return Err(PurgeError::InvalidBlogId(blog_id.to_string()));
    };

    let site = host
        .directory
        .site(id)?
        .ok_or_else(|| PurgeError::InvalidBlogId(blog_id.to_string()))?;
    let ctx = host.base.for_site(&site)?;
    tracing::debug!(blog_id = id, endpoint = %ctx.endpoint(), "bound to blog");

    send_target(host, target, &ctx, CmdResult::default(), "Purged the blog!")
}
