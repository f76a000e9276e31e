use crate::dispatch::WireKeys;
use crate::error::{PurgeError, Result};
use crate::lookup::DEFAULT_POST_TYPES;
use crate::model::{SiteRecord, ADMIN_AJAX_PATH};
use crate::transport::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const CONFIG_FILENAME: &str = "lspurge.json";
pub const CONFIG_ENV: &str = "LSPURGE_CONFIG";
pub const SITE_URL_ENV: &str = "LSPURGE_SITE_URL";
pub const ENDPOINT_ENV: &str = "LSPURGE_ENDPOINT";
const DEFAULT_SITE_URL: &str = "http://localhost/";

/// Configuration for lspurge, read from `lspurge.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurgeConfig {
    /// Home URL of the installation (the network's main site on multisite)
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Admin-ajax endpoint; derived from `site_url` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_endpoint: Option<String>,

    #[serde(default)]
    pub multisite: bool,

    /// Sites of the network, when the registry is kept in this file
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sites: Vec<SiteRecord>,

    /// JSON endpoint listing the network's sites; takes precedence over `sites`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sites_url: Option<String>,

    /// REST API root used to check that term and post ids exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_root: Option<String>,

    /// REST collections searched, in order, when checking a post id
    #[serde(default = "default_post_types")]
    pub post_types: Vec<String>,

    /// Endpoint minting nonces; without it nonces come from the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce_url: Option<String>,

    #[serde(flatten)]
    pub wire: WireKeys,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_site_url() -> String {
    DEFAULT_SITE_URL.to_string()
}

fn default_post_types() -> Vec<String> {
    DEFAULT_POST_TYPES.iter().map(|t| t.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            admin_endpoint: None,
            multisite: false,
            sites: Vec::new(),
            sites_url: None,
            rest_root: None,
            post_types: default_post_types(),
            nonce_url: None,
            wire: WireKeys::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl PurgeConfig {
    /// Finds the config file: the explicit path, then `$LSPURGE_CONFIG`,
    /// then `./lspurge.json`, then the user config directory.
    pub fn locate(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        let local = cwd.join(CONFIG_FILENAME);
        if local.exists() {
            return Some(local);
        }
        ProjectDirs::from("com", "lspurge", "lspurge")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
            .filter(|path| path.exists())
    }

    /// Load config from the given file, or return defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(PurgeError::Io)?;
        let config: PurgeConfig = serde_json::from_str(&content).map_err(|e| {
            PurgeError::Config(format!("{}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// Applies `LSPURGE_SITE_URL` and `LSPURGE_ENDPOINT`, when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(site_url) = std::env::var(SITE_URL_ENV) {
            if !site_url.is_empty() {
                self.site_url = site_url;
            }
        }
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                self.admin_endpoint = Some(endpoint);
            }
        }
        self
    }

    /// The site URL, always with a trailing slash so relative joins stay under it.
    pub fn site_url(&self) -> Result<Url> {
        let mut raw = self.site_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        parse_url("site_url", &raw)
    }

    pub fn admin_endpoint(&self) -> Result<Url> {
        match &self.admin_endpoint {
            Some(raw) => parse_url("admin_endpoint", raw),
            None => join(&self.site_url()?, ADMIN_AJAX_PATH),
        }
    }

    pub fn rest_root(&self) -> Result<Url> {
        match &self.rest_root {
            Some(raw) if raw.ends_with('/') => parse_url("rest_root", raw),
            Some(raw) => parse_url("rest_root", &format!("{}/", raw)),
            None => join(&self.site_url()?, "wp-json/"),
        }
    }

    pub fn sites_url(&self) -> Result<Option<Url>> {
        self.sites_url
            .as_deref()
            .map(|raw| parse_url("sites_url", raw))
            .transpose()
    }

    pub fn nonce_url(&self) -> Result<Option<Url>> {
        self.nonce_url
            .as_deref()
            .map(|raw| parse_url("nonce_url", raw))
            .transpose()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| PurgeError::Config(format!("{} '{}': {}", field, raw, e)))
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| PurgeError::Config(format!("cannot derive {} from {}: {}", path, base, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PurgeConfig::default();
        assert_eq!(config.site_url, "http://localhost/");
        assert!(!config.multisite);
        assert_eq!(config.wire, WireKeys::default());
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_derived_endpoints() {
        let config = PurgeConfig {
            site_url: "https://mysite.com".into(),
            ..Default::default()
        };
        assert_eq!(config.site_url().unwrap().as_str(), "https://mysite.com/");
        assert_eq!(
            config.admin_endpoint().unwrap().as_str(),
            "https://mysite.com/wp-admin/admin-ajax.php"
        );
        assert_eq!(
            config.rest_root().unwrap().as_str(),
            "https://mysite.com/wp-json/"
        );
    }

    #[test]
    fn test_derived_endpoints_keep_subdirectory() {
        let config = PurgeConfig {
            site_url: "https://mysite.com/wp".into(),
            ..Default::default()
        };
        assert_eq!(
            config.admin_endpoint().unwrap().as_str(),
            "https://mysite.com/wp/wp-admin/admin-ajax.php"
        );
    }

    #[test]
    fn test_explicit_endpoints_win() {
        let config = PurgeConfig {
            site_url: "https://mysite.com/".into(),
            admin_endpoint: Some("https://admin.mysite.com/ajax".into()),
            rest_root: Some("https://api.mysite.com/json".into()),
            ..Default::default()
        };
        assert_eq!(
            config.admin_endpoint().unwrap().as_str(),
            "https://admin.mysite.com/ajax"
        );
        assert_eq!(
            config.rest_root().unwrap().as_str(),
            "https://api.mysite.com/json/"
        );
    }

    #[test]
    fn test_bad_url_is_config_error() {
        let config = PurgeConfig {
            site_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(config.site_url(), Err(PurgeError::Config(_))));
        assert!(matches!(config.admin_endpoint(), Err(PurgeError::Config(_))));
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = PurgeConfig::load(temp_dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(config, PurgeConfig::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"{
                "site_url": "https://network.test/",
                "multisite": true,
                "sites": [{"blog_id": 2, "domain": "shop.network.test", "path": "/"}],
                "action_key": "CTRL"
            }"#,
        )
        .unwrap();

        let config = PurgeConfig::load(&path).unwrap();
        assert!(config.multisite);
        assert_eq!(config.sites.len(), 1);
        assert_eq!(config.wire.action_key, "CTRL");
        assert_eq!(config.wire.nonce_key, "LSCWP_NONCE");
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.post_types, vec!["posts", "pages", "product"]);
    }

    #[test]
    fn test_post_types_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&path, r#"{ "post_types": ["posts", "pages", "event"] }"#).unwrap();

        let config = PurgeConfig::load(&path).unwrap();
        assert_eq!(config.post_types, vec!["posts", "pages", "event"]);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(PurgeConfig::load(&path), Err(PurgeError::Config(_))));
    }

    #[test]
    fn test_locate_prefers_explicit_then_local() {
        let temp_dir = tempfile::tempdir().unwrap();
        let explicit = temp_dir.path().join("elsewhere.json");
        assert_eq!(
            PurgeConfig::locate(Some(&explicit), temp_dir.path()),
            Some(explicit)
        );

        let local = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&local, "{}").unwrap();
        if std::env::var(CONFIG_ENV).is_err() {
            assert_eq!(PurgeConfig::locate(None, temp_dir.path()), Some(local));
        }
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = PurgeConfig {
            site_url: "https://mysite.com/".into(),
            multisite: true,
            sites: vec![SiteRecord::new(1, "mysite.com", "/")],
            nonce_url: Some("https://mysite.com/nonce".into()),
            ..Default::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: PurgeConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }
}
