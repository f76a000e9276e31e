//! # Term Lookup
//!
//! The `exists(kind, id)` capability used while validating tag, category and
//! post id lists. The validator picks nothing by name: the `TermKind` carried
//! by the target selects the REST collection (or the in-memory set).
//!
//! A post id can belong to any post type, so `RestLookup` searches each
//! configured post type collection in turn and stops at the first hit.

use crate::error::{PurgeError, Result};
use crate::model::TermKind;
use crate::transport::Transport;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Post type collections searched for a post id, in order.
pub const DEFAULT_POST_TYPES: &[&str] = &["posts", "pages", "product"];

pub trait TermLookup {
    fn exists(&self, kind: TermKind, id: u64) -> Result<bool>;
}

impl<L: TermLookup + ?Sized> TermLookup for Box<L> {
    fn exists(&self, kind: TermKind, id: u64) -> Result<bool> {
        (**self).exists(kind, id)
    }
}

/// Asks the site's REST API, one GET per id and collection:
/// `<rest_root>wp/v2/{tags|categories|<post type>}/<id>`.
pub struct RestLookup<T: Transport> {
    rest_root: Url,
    transport: T,
    post_types: Vec<String>,
}

impl<T: Transport> RestLookup<T> {
    pub fn new(rest_root: Url, transport: T) -> Self {
        Self {
            rest_root,
            transport,
            post_types: DEFAULT_POST_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Replaces the post type collections searched for post ids.
    pub fn with_post_types(mut self, post_types: Vec<String>) -> Self {
        self.post_types = post_types;
        self
    }

    fn collections(&self, kind: TermKind) -> Vec<&str> {
        match kind {
            TermKind::PostId => self.post_types.iter().map(String::as_str).collect(),
            other => vec![other.rest_base()],
        }
    }

    fn entity_url(&self, collection: &str, id: u64) -> Result<Url> {
        self.rest_root
            .join(&format!("wp/v2/{}/{}", collection, id))
            .map_err(|e| PurgeError::Config(format!("bad REST root {}: {}", self.rest_root, e)))
    }

    fn found(&self, collection: &str, id: u64) -> Result<bool> {
        let url = self.entity_url(collection, id)?;
        let response = self
            .transport
            .get(&url, &[])
            .map_err(|e| PurgeError::DirectoryUnavailable(e.to_string()))?;

        match response.status {
            200..=299 => Ok(true),
            // Missing, trashed, not visible to us, or no such post type.
            401 | 403 | 404 | 410 => Ok(false),
            status => Err(PurgeError::DirectoryUnavailable(format!(
                "{} returned HTTP {}",
                url, status
            ))),
        }
    }
}

impl<T: Transport> TermLookup for RestLookup<T> {
    fn exists(&self, kind: TermKind, id: u64) -> Result<bool> {
        for collection in self.collections(kind) {
            if self.found(collection, id)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Known ids per kind, held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    known: HashMap<TermKind, HashSet<u64>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: TermKind, ids: &[u64]) -> Self {
        self.known.entry(kind).or_default().extend(ids);
        self
    }
}

impl TermLookup for StaticLookup {
    fn exists(&self, kind: TermKind, id: u64) -> Result<bool> {
        Ok(self.known.get(&kind).is_some_and(|ids| ids.contains(&id)))
    }
}
