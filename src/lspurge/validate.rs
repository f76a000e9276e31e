//! # Target Validation
//!
//! Turns raw command-line arguments into a [`PurgeTarget`]. Nothing here
//! touches the purge endpoint; the only reads are against the site directory
//! and the term lookup.
//!
//! Id lists are filtered permissively: an id that is not a plain number, or
//! that names no existing entity, is dropped with a debug diagnostic. The
//! list as a whole is strict: if nothing survives, validation fails with
//! [`PurgeError::EmptyTargetSet`].

use crate::directory::SiteDirectory;
use crate::error::{PurgeError, Result};
use crate::lookup::TermLookup;
use crate::model::{parse_id, PurgeTarget, TermKind};
use std::collections::HashSet;
use url::Url;

/// What the user asked to purge, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    All,
    Site,
    Url,
    Terms(TermKind),
}

pub struct Validator<'a, D: SiteDirectory, L: TermLookup> {
    directory: &'a D,
    lookup: &'a L,
    site_url: &'a Url,
}

impl<'a, D: SiteDirectory, L: TermLookup> Validator<'a, D, L> {
    /// `site_url` is the configured home of a single-site install; URL
    /// targets on such hosts must share its host.
    pub fn new(directory: &'a D, lookup: &'a L, site_url: &'a Url) -> Self {
        Self {
            directory,
            lookup,
            site_url,
        }
    }

    pub fn validate<S: AsRef<str>>(&self, kind: TargetKind, args: &[S]) -> Result<PurgeTarget> {
        match kind {
            TargetKind::All => {
                expect_args(args, 0, 0)?;
                Ok(PurgeTarget::All)
            }
            TargetKind::Site => {
                expect_args(args, 1, 1)?;
                self.site(args[0].as_ref())
            }
            TargetKind::Url => {
                expect_args(args, 1, 1)?;
                self.url(args[0].as_ref())
            }
            TargetKind::Terms(term) => {
                expect_args(args, 1, usize::MAX)?;
                self.terms(term, args)
            }
        }
    }

    pub fn site(&self, raw: &str) -> Result<PurgeTarget> {
        if !self.directory.is_multisite() {
            return Err(PurgeError::NotMultisite);
        }
        match self.directory.resolve_blog_id(raw)? {
            Some(blog_id) => Ok(PurgeTarget::Site(blog_id)),
            None => Err(PurgeError::InvalidBlogId(raw.to_string())),
        }
    }

    pub fn url(&self, raw: &str) -> Result<PurgeTarget> {
        let url = Url::parse(raw).map_err(|_| PurgeError::InvalidUrl(raw.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PurgeError::InvalidUrl(raw.to_string()));
        }
        let Some(host) = url.host_str() else {
            return Err(PurgeError::InvalidUrl(raw.to_string()));
        };

        if self.directory.is_multisite() {
            if self.directory.resolve_domain(host, "/")?.is_none() {
                return Err(PurgeError::DomainMismatch {
                    host: host.to_string(),
                    multisite: true,
                });
            }
        } else {
            let site_host = self.site_url.host_str().unwrap_or_default();
            if !host.eq_ignore_ascii_case(site_host) {
                return Err(PurgeError::DomainMismatch {
                    host: host.to_string(),
                    multisite: false,
                });
            }
        }

        Ok(PurgeTarget::Url(url))
    }

    pub fn terms<S: AsRef<str>>(&self, kind: TermKind, args: &[S]) -> Result<PurgeTarget> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();

        for raw in args.iter().map(AsRef::as_ref) {
            let Some(id) = parse_id(raw) else {
                tracing::debug!("Skip val, not a number: {}", raw);
                continue;
            };
            if !seen.insert(id) {
                tracing::debug!("Skip val, duplicate: {}", raw);
                continue;
            }
            if self.lookup.exists(kind, id)? {
                ids.push(id);
            } else {
                tracing::debug!("Skip val, not a valid {}: {}", kind, raw);
            }
        }

        if ids.is_empty() {
            return Err(PurgeError::EmptyTargetSet);
        }
        Ok(PurgeTarget::TagSet { kind, ids })
    }
}

fn expect_args<S: AsRef<str>>(args: &[S], min: usize, max: usize) -> Result<()> {
    let n = args.len();
    if n < min || n > max {
        let wanted = match (min, max) {
            (0, 0) => "no arguments".to_string(),
            (a, b) if a == b => format!("exactly {} argument", a),
            (a, _) => format!("at least {} argument", a),
        };
        return Err(PurgeError::InvalidArguments(format!(
            "expected {}, got {}",
            wanted, n
        )));
    }
    Ok(())
}
