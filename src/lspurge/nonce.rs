//! # Nonce Providers
//!
//! A nonce is minted by the host for one action name. This crate never
//! generates or verifies one; it asks a provider for a fresh value each time
//! it builds an ajax request and never keeps it afterwards.

use crate::error::{PurgeError, Result};
use crate::transport::Transport;
use serde::Deserialize;
use url::Url;

pub const NONCE_ENV: &str = "LSPURGE_NONCE";

pub trait NonceProvider {
    fn nonce(&self, action: &str) -> Result<String>;
}

impl<F> NonceProvider for F
where
    F: Fn(&str) -> Result<String>,
{
    fn nonce(&self, action: &str) -> Result<String> {
        self(action)
    }
}

/// Fetches `GET <url>?action=<name>` from the host. The body may be the
/// bare nonce, a JSON string, `{"nonce": ".."}` or an ajax success envelope
/// `{"success": true, "data": ".."}`.
pub struct EndpointNonceProvider<T: Transport> {
    url: Url,
    transport: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NonceBody {
    Bare(String),
    Keyed { nonce: String },
    Envelope { data: String },
}

impl<T: Transport> EndpointNonceProvider<T> {
    pub fn new(url: Url, transport: T) -> Self {
        Self { url, transport }
    }
}

impl<T: Transport> NonceProvider for EndpointNonceProvider<T> {
    fn nonce(&self, action: &str) -> Result<String> {
        let response = self
            .transport
            .get(&self.url, &[("action".to_string(), action.to_string())])?;

        if !response.is_success() {
            return Err(PurgeError::Application {
                status_code: response.status,
                message: format!("nonce endpoint refused action {}", action),
            });
        }

        let body = response.body.trim();
        let nonce = match serde_json::from_str::<NonceBody>(body) {
            Ok(NonceBody::Bare(n)) | Ok(NonceBody::Keyed { nonce: n }) => n,
            Ok(NonceBody::Envelope { data }) => data,
            Err(_) => body.to_string(),
        };

        if nonce.is_empty() || nonce.chars().any(char::is_whitespace) {
            return Err(PurgeError::Application {
                status_code: response.status,
                message: "nonce endpoint returned no usable nonce".to_string(),
            });
        }
        Ok(nonce)
    }
}

/// Reads the nonce handed to the operator through the environment:
/// `LSPURGE_NONCE_<ACTION>` first, then `LSPURGE_NONCE`. Read at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvNonceProvider;

impl EnvNonceProvider {
    pub fn action_var(action: &str) -> String {
        format!("{}_{}", NONCE_ENV, action.to_ascii_uppercase())
    }
}

impl NonceProvider for EnvNonceProvider {
    fn nonce(&self, action: &str) -> Result<String> {
        std::env::var(Self::action_var(action))
            .or_else(|_| std::env::var(NONCE_ENV))
            .ok()
            .filter(|n| !n.trim().is_empty())
            .map(|n| n.trim().to_string())
            .ok_or_else(|| {
                PurgeError::Config(format!(
                    "no nonce for {}: set nonce_url in the config or {}",
                    action, NONCE_ENV
                ))
            })
    }
}
