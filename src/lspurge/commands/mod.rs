use crate::directory::SiteDirectory;
use crate::dispatch::Dispatcher;
use crate::error::PurgeError;
use crate::lookup::TermLookup;
use crate::model::{PurgeResult, RequestContext, SiteRecord};
use crate::nonce::NonceProvider;
use crate::transport::Transport;
use crate::validate::Validator;
use ::url::Url;

pub mod all;
pub mod blog;
pub mod helpers;
pub mod network_list;
pub mod purge_by;
pub mod url;

/// The collaborators every command works against.
pub struct Host<D, L, N, T>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    pub directory: D,
    pub lookup: L,
    pub nonces: N,
    pub dispatcher: Dispatcher<T>,
    /// Endpoint of the main site; blog targets derive their own from it.
    pub base: RequestContext,
    /// Home URL of the installation.
    pub site_url: Url,
}

impl<D, L, N, T> Host<D, L, N, T>
where
    D: SiteDirectory,
    L: TermLookup,
    N: NonceProvider,
    T: Transport,
{
    pub fn validator(&self) -> Validator<'_, D, L> {
        Validator::new(&self.directory, &self.lookup, &self.site_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub sites: Vec<SiteRecord>,
    pub purge: Option<PurgeResult>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_sites(mut self, sites: Vec<SiteRecord>) -> Self {
        self.sites = sites;
        self
    }

    pub fn with_purge(mut self, result: PurgeResult) -> Self {
        self.purge = Some(result);
        self
    }

    /// The endpoint answered but refused the purge.
    pub fn rejection(&self) -> Option<PurgeError> {
        self.purge
            .as_ref()
            .filter(|result| !result.success)
            .map(|result| PurgeError::Rejected {
                status_code: result.status_code,
                message: result.message.clone(),
            })
    }
}
