use super::SiteDirectory;
use crate::error::{PurgeError, Result};
use crate::model::SiteRecord;
use crate::transport::Transport;
use serde::Deserialize;
use url::Url;

/// Site registry served as JSON by the host, fetched on every call.
///
/// Accepts either a bare array of site records or an object wrapping it
/// under `sites` (or `data`, as the ajax success envelope does).
pub struct HttpDirectory<T: Transport> {
    registry: Url,
    transport: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Bare(Vec<SiteRecord>),
    Sites { sites: Vec<SiteRecord> },
    Data { data: Vec<SiteRecord> },
}

impl<T: Transport> HttpDirectory<T> {
    pub fn new(registry: Url, transport: T) -> Self {
        Self {
            registry,
            transport,
        }
    }
}

impl<T: Transport> SiteDirectory for HttpDirectory<T> {
    fn is_multisite(&self) -> bool {
        true
    }

    fn list_sites(&self) -> Result<Vec<SiteRecord>> {
        let response = self
            .transport
            .get(&self.registry, &[])
            .map_err(|e| PurgeError::DirectoryUnavailable(e.to_string()))?;

        if !response.is_success() {
            return Err(PurgeError::DirectoryUnavailable(format!(
                "{} returned HTTP {}",
                self.registry, response.status
            )));
        }

        let listing: Listing = serde_json::from_str(&response.body).map_err(|e| {
            PurgeError::DirectoryUnavailable(format!("unreadable site list: {}", e))
        })?;

        let sites = match listing {
            Listing::Bare(sites) | Listing::Sites { sites } | Listing::Data { data: sites } => {
                sites
            }
        };
        tracing::debug!(count = sites.len(), registry = %self.registry, "fetched site list");
        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fixtures::RecordingTransport;

    fn registry() -> Url {
        Url::parse("https://network.test/sites.json").unwrap()
    }

    #[test]
    fn parses_bare_array() {
        let transport = RecordingTransport::new().respond(
            "sites.json",
            200,
            r#"[{"blog_id":1,"domain":"network.test","path":"/"},
                {"blog_id":2,"domain":"shop.network.test","path":"/"}]"#,
        );
        let dir = HttpDirectory::new(registry(), transport);
        let sites = dir.list_sites().unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[1].domain, "shop.network.test");
        assert_eq!(dir.resolve_blog_id("2").unwrap(), Some(2));
    }

    #[test]
    fn parses_wrapped_listing() {
        let transport = RecordingTransport::new().respond(
            "sites.json",
            200,
            r#"{"success":true,"data":[{"blog_id":5,"domain":"x.test"}]}"#,
        );
        let dir = HttpDirectory::new(registry(), transport);
        assert_eq!(dir.list_sites().unwrap()[0].blog_id, 5);
    }

    #[test]
    fn fetches_fresh_snapshot_each_call() {
        let transport = RecordingTransport::new().respond("sites.json", 200, "[]");
        let dir = HttpDirectory::new(registry(), transport.clone());
        dir.list_sites().unwrap();
        dir.list_sites().unwrap();
        assert_eq!(transport.calls().len(), 2);
    }

    #[test]
    fn unreachable_registry_is_directory_unavailable() {
        let transport = RecordingTransport::new().unreachable("sites.json");
        let dir = HttpDirectory::new(registry(), transport);
        assert!(matches!(
            dir.list_sites(),
            Err(PurgeError::DirectoryUnavailable(_))
        ));
    }

    #[test]
    fn http_error_is_directory_unavailable() {
        let transport = RecordingTransport::new().respond("sites.json", 403, "forbidden");
        let dir = HttpDirectory::new(registry(), transport);
        assert!(matches!(
            dir.resolve_blog_id("1"),
            Err(PurgeError::DirectoryUnavailable(_))
        ));
    }

    #[test]
    fn garbage_body_is_directory_unavailable() {
        let transport = RecordingTransport::new().respond("sites.json", 200, "<html>");
        let dir = HttpDirectory::new(registry(), transport);
        assert!(matches!(
            dir.list_sites(),
            Err(PurgeError::DirectoryUnavailable(_))
        ));
    }
}
