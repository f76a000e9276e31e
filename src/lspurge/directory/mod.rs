//! # Multisite Directory
//!
//! Read-only view of the host's site registry. The validator consults it to
//! check blog ids and URL domains; `network_list` renders it.
//!
//! ## Implementations
//!
//! - [`memory::StaticDirectory`]: sites declared in the config file (or built
//!   in tests). Also represents a single-site install: `multisite = false`
//!   and no sites.
//! - [`http::HttpDirectory`]: fetches the site list from a JSON registry
//!   endpoint on every call. Any failure is [`PurgeError::DirectoryUnavailable`].
//!
//! Listings come back in the order the source enumerates them. Nothing here
//! sorts, caches, or mutates.
//!
//! [`PurgeError::DirectoryUnavailable`]: crate::error::PurgeError::DirectoryUnavailable

use crate::error::Result;
use crate::model::{parse_id, SiteRecord};

pub mod http;
pub mod memory;

pub trait SiteDirectory {
    /// Whether the installation is a multisite network.
    fn is_multisite(&self) -> bool;

    /// A fresh snapshot of every site on the network.
    fn list_sites(&self) -> Result<Vec<SiteRecord>>;

    fn site(&self, blog_id: u64) -> Result<Option<SiteRecord>> {
        Ok(self
            .list_sites()?
            .into_iter()
            .find(|site| site.blog_id == blog_id))
    }

    /// Resolves user input to the id of an existing blog.
    fn resolve_blog_id(&self, raw: &str) -> Result<Option<u64>> {
        let Some(id) = parse_id(raw) else {
            return Ok(None);
        };
        Ok(self.site(id)?.map(|site| site.blog_id))
    }

    /// Resolves a host and site path to a blog id. Hosts compare
    /// case-insensitively, paths exactly.
    fn resolve_domain(&self, host: &str, path: &str) -> Result<Option<u64>> {
        Ok(self
            .list_sites()?
            .into_iter()
            .find(|site| site.domain.eq_ignore_ascii_case(host) && site.path == path)
            .map(|site| site.blog_id))
    }
}

impl<D: SiteDirectory + ?Sized> SiteDirectory for Box<D> {
    fn is_multisite(&self) -> bool {
        (**self).is_multisite()
    }

    fn list_sites(&self) -> Result<Vec<SiteRecord>> {
        (**self).list_sites()
    }

    fn site(&self, blog_id: u64) -> Result<Option<SiteRecord>> {
        (**self).site(blog_id)
    }

    fn resolve_blog_id(&self, raw: &str) -> Result<Option<u64>> {
        (**self).resolve_blog_id(raw)
    }

    fn resolve_domain(&self, host: &str, path: &str) -> Result<Option<u64>> {
        (**self).resolve_domain(host, path)
    }
}
