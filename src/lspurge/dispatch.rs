//! # Dispatcher
//!
//! Sends one [`PurgeRequest`] and classifies what came back.
//!
//! ## Wire format
//!
//! Ajax requests are a GET on the blog's admin-ajax endpoint with:
//!
//! ```text
//! action=<dispatch action>      fixed; routes the call to the purge handler
//! <action key>=PURGE_BY         PURGE_ALL | PURGE | PURGE_BY
//! <nonce key>=<nonce>
//! select=tag&list=1,3,5         PURGE_BY only
//! ```
//!
//! URL purges are a GET on the URL itself carrying only `<action key>=PURGE`.
//!
//! ## Classification
//!
//! The body decides, not the HTTP status. It must be a JSON object with a
//! boolean `success`; `status_code` in the body wins over the HTTP status
//! when present. An explicit `success: false` is a normal [`PurgeResult`].
//! Anything else reached the endpoint but broke the contract and becomes
//! [`PurgeError::Application`]. Failing to reach the endpoint at all is
//! [`PurgeError::Network`], the only retryable case. There is exactly one
//! attempt per call.

use crate::error::{PurgeError, Result};
use crate::model::{PurgeRequest, PurgeResult, Route};
use crate::transport::{RawResponse, Transport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Names of the fixed query parameters the purge handler expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireKeys {
    pub dispatch_action: String,
    pub action_key: String,
    pub nonce_key: String,
}

impl Default for WireKeys {
    fn default() -> Self {
        Self {
            dispatch_action: "lscache_cli".to_string(),
            action_key: "LSCWP_CTRL".to_string(),
            nonce_key: "LSCWP_NONCE".to_string(),
        }
    }
}

pub struct Dispatcher<T: Transport> {
    transport: T,
    keys: WireKeys,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T, keys: WireKeys) -> Self {
        Self { transport, keys }
    }

    /// Sends `request`, consuming it.
    pub fn send(&self, request: PurgeRequest) -> Result<PurgeResult> {
        let action = request.action();
        let (_, params, route) = request.into_parts();

        let (url, query) = match route {
            Route::Ajax { endpoint, nonce } => {
                let mut query = vec![
                    ("action".to_string(), self.keys.dispatch_action.clone()),
                    (self.keys.action_key.clone(), action.as_str().to_string()),
                    (self.keys.nonce_key.clone(), nonce),
                ];
                query.extend(params);
                (endpoint, query)
            }
            Route::Direct { url } => {
                let mut query = vec![(self.keys.action_key.clone(), action.as_str().to_string())];
                query.extend(params);
                (url, query)
            }
        };

        tracing::debug!("url is {}", url);
        let raw = self.transport.get(&url, &query)?;
        let result = classify(&raw)?;
        tracing::debug!(
            success = result.success,
            status_code = result.status_code,
            "purge {} answered",
            action
        );
        Ok(result)
    }
}

/// Interprets a response body under the `{success, status_code}` contract.
pub fn classify(raw: &RawResponse) -> Result<PurgeResult> {
    let violation = |why: &str| PurgeError::Application {
        status_code: raw.status,
        message: why.to_string(),
    };

    let body: Value =
        serde_json::from_str(raw.body.trim()).map_err(|_| violation("response is not JSON"))?;
    let object = body
        .as_object()
        .ok_or_else(|| violation("response is not a JSON object"))?;
    let success = object
        .get("success")
        .and_then(Value::as_bool)
        .ok_or_else(|| violation("response has no boolean 'success' field"))?;

    let status_code = object
        .get("status_code")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .unwrap_or(raw.status);

    Ok(PurgeResult {
        success,
        status_code,
        message: message_of(object),
    })
}

fn message_of(object: &serde_json::Map<String, Value>) -> String {
    let from = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);
    from(object.get("message"))
        .or_else(|| from(object.get("data")))
        .or_else(|| from(object.get("data").and_then(|d| d.get("message"))))
        .unwrap_or_default()
}
