//! # Request Builder
//!
//! Maps a validated [`PurgeTarget`] to the [`PurgeRequest`] the dispatcher
//! sends:
//!
//! | target            | action      | params                      | route  |
//! |-------------------|-------------|-----------------------------|--------|
//! | `All`             | `PURGE_ALL` | none                        | ajax   |
//! | `Site(id)`        | `PURGE_ALL` | none                        | ajax on the blog's endpoint |
//! | `Url(u)`          | `PURGE`     | none                        | direct to `u`, no nonce |
//! | `TagSet(kind,ids)`| `PURGE_BY`  | `select=<kind>`, `list=<ids>` | ajax |

use crate::error::{PurgeError, Result};
use crate::model::{PurgeAction, PurgeRequest, PurgeTarget, RequestContext, Route};
use crate::nonce::NonceProvider;
use std::collections::BTreeMap;

pub const SELECT_PARAM: &str = "select";
pub const LIST_PARAM: &str = "list";

/// Builds the request for `target`. A `Site` target must come with a
/// context bound to that blog (see [`RequestContext::for_site`]).
///
/// The nonce provider is asked once per ajax request; URL purges never ask.
pub fn build<N: NonceProvider + ?Sized>(
    target: PurgeTarget,
    ctx: &RequestContext,
    nonces: &N,
) -> Result<PurgeRequest> {
    match target {
        PurgeTarget::All => ajax(PurgeAction::PurgeAll, BTreeMap::new(), ctx, nonces),
        PurgeTarget::Site(blog_id) => {
            if ctx.blog_id() != Some(blog_id) {
                return Err(PurgeError::Api(format!(
                    "request context is not bound to blog {}",
                    blog_id
                )));
            }
            ajax(PurgeAction::PurgeAll, BTreeMap::new(), ctx, nonces)
        }
        PurgeTarget::Url(url) => Ok(PurgeRequest::new(
            PurgeAction::Purge,
            BTreeMap::new(),
            Route::Direct { url },
        )),
        PurgeTarget::TagSet { kind, ids } => {
            if ids.is_empty() {
                return Err(PurgeError::EmptyTargetSet);
            }
            let mut params = BTreeMap::new();
            params.insert(SELECT_PARAM.to_string(), kind.as_str().to_string());
            params.insert(LIST_PARAM.to_string(), join_ids(&ids));
            ajax(PurgeAction::PurgeBy, params, ctx, nonces)
        }
    }
}

/// Comma-joined ids, in the order given.
pub fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn ajax<N: NonceProvider + ?Sized>(
    action: PurgeAction,
    params: BTreeMap<String, String>,
    ctx: &RequestContext,
    nonces: &N,
) -> Result<PurgeRequest> {
    let nonce = nonces.nonce(action.as_str())?;
    Ok(PurgeRequest::new(
        action,
        params,
        Route::Ajax {
            endpoint: ctx.endpoint().clone(),
            nonce,
        },
    ))
}
