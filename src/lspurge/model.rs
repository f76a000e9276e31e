use crate::error::{PurgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Path of the admin-ajax handler relative to a blog's root.
pub const ADMIN_AJAX_PATH: &str = "wp-admin/admin-ajax.php";

/// Parses a user-supplied identifier: ASCII digits only, no sign, no
/// whitespace, and strictly positive.
pub fn parse_id(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u64>().ok().filter(|id| *id > 0)
}

/// The kind of content a `TagSet` purge addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermKind {
    Tag,
    Category,
    PostId,
}

impl TermKind {
    /// Value sent as the `select` parameter of a `PURGE_BY` request.
    pub fn as_str(&self) -> &'static str {
        match self {
            TermKind::Tag => "tag",
            TermKind::Category => "category",
            TermKind::PostId => "post_id",
        }
    }

    /// Collection name under the REST API's `wp/v2` namespace. Post ids are
    /// searched across several post types; `posts` is only the first.
    pub fn rest_base(&self) -> &'static str {
        match self {
            TermKind::Tag => "tags",
            TermKind::Category => "categories",
            TermKind::PostId => "posts",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated purge target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeTarget {
    All,
    Site(u64),
    Url(Url),
    /// `ids` is non-empty, unique and kept in the order the user gave them.
    TagSet { kind: TermKind, ids: Vec<u64> },
}

/// One blog of a multisite network, as reported by the site registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub blog_id: u64,
    pub domain: String,
    #[serde(default = "default_site_path")]
    pub path: String,
}

fn default_site_path() -> String {
    "/".to_string()
}

impl SiteRecord {
    pub fn new(blog_id: u64, domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            blog_id,
            domain: domain.into(),
            path: path.into(),
        }
    }

    /// `domain` + `path`, the way the network admin shows a site.
    pub fn address(&self) -> String {
        format!("{}{}", self.domain, self.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeAction {
    PurgeAll,
    Purge,
    PurgeBy,
}

impl PurgeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurgeAction::PurgeAll => "PURGE_ALL",
            PurgeAction::Purge => "PURGE",
            PurgeAction::PurgeBy => "PURGE_BY",
        }
    }
}

impl fmt::Display for PurgeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Through the admin-ajax handler, authenticated by a nonce.
    Ajax { endpoint: Url, nonce: String },
    /// Straight at the page being purged. No nonce.
    Direct { url: Url },
}

/// A request ready to be dispatched. Built once, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeRequest {
    action: PurgeAction,
    params: BTreeMap<String, String>,
    route: Route,
}

impl PurgeRequest {
    pub(crate) fn new(action: PurgeAction, params: BTreeMap<String, String>, route: Route) -> Self {
        Self {
            action,
            params,
            route,
        }
    }

    pub fn action(&self) -> PurgeAction {
        self.action
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn into_parts(self) -> (PurgeAction, BTreeMap<String, String>, Route) {
        (self.action, self.params, self.route)
    }
}

/// Outcome of one dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeResult {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
}

/// The blog a request is bound to, expressed as its admin-ajax endpoint.
///
/// Multisite targets derive a new context from the network's base context
/// instead of switching any process-wide "current blog".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    endpoint: Url,
    blog_id: Option<u64>,
}

impl RequestContext {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            blog_id: None,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The blog this context was bound to with [`RequestContext::for_site`].
    pub fn blog_id(&self) -> Option<u64> {
        self.blog_id
    }

    /// Context for one blog of the network: same scheme and port as `self`,
    /// the blog's domain, and the admin-ajax handler under the blog's path.
    pub fn for_site(&self, site: &SiteRecord) -> Result<Self> {
        let mut endpoint = self.endpoint.clone();
        endpoint
            .set_host(Some(&site.domain))
            .map_err(|e| PurgeError::Config(format!("bad domain '{}': {}", site.domain, e)))?;

        let mut path = site.path.clone();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        if !path.ends_with('/') {
            path.push('/');
        }
        endpoint.set_path(&format!("{}{}", path, ADMIN_AJAX_PATH));
        endpoint.set_query(None);
        endpoint.set_fragment(None);

        Ok(Self {
            endpoint,
            blog_id: Some(site.blog_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RequestContext {
        RequestContext::new(Url::parse("https://network.test/wp-admin/admin-ajax.php").unwrap())
    }

    #[test]
    fn for_site_rebinds_domain_and_path() {
        let site = SiteRecord::new(2, "shop.example.com", "/");
        let ctx = base().for_site(&site).unwrap();
        assert_eq!(
            ctx.endpoint().as_str(),
            "https://shop.example.com/wp-admin/admin-ajax.php"
        );
        assert_eq!(ctx.blog_id(), Some(2));
    }

    #[test]
    fn for_site_handles_subdirectory_blogs() {
        let site = SiteRecord::new(3, "network.test", "/blog");
        let ctx = base().for_site(&site).unwrap();
        assert_eq!(
            ctx.endpoint().as_str(),
            "https://network.test/blog/wp-admin/admin-ajax.php"
        );
    }

    #[test]
    fn for_site_leaves_base_context_untouched() {
        let base = base();
        let _ = base.for_site(&SiteRecord::new(2, "a.test", "/")).unwrap();
        assert_eq!(base.endpoint().host_str(), Some("network.test"));
        assert_eq!(base.blog_id(), None);
    }

    #[test]
    fn parse_id_accepts_only_plain_positive_digits() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("+1"), None);
        assert_eq!(parse_id(" 1"), None);
        assert_eq!(parse_id("1.0"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("99999999999999999999999"), None);
    }

    #[test]
    fn site_address_joins_domain_and_path() {
        assert_eq!(
            SiteRecord::new(1, "example.com", "/shop/").address(),
            "example.com/shop/"
        );
    }

    #[test]
    fn site_record_path_defaults_to_root() {
        let site: SiteRecord =
            serde_json::from_str(r#"{"blog_id": 4, "domain": "d.test"}"#).unwrap();
        assert_eq!(site.path, "/");
    }
}
