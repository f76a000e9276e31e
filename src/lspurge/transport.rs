//! # HTTP Transport
//!
//! Every outbound call (purge dispatch, site registry, term lookups, nonce
//! fetches) goes through the [`Transport`] trait so the layers above it can
//! be exercised without a network.
//!
//! - [`HttpTransport`]: blocking `ureq` agent, used by the binary.
//! - [`fixtures::RecordingTransport`]: canned responses plus a call log, for tests.
//!
//! HTTP error statuses are *not* errors at this level. A 500 with a body is a
//! [`RawResponse`] like any other; only failures to reach the server at all
//! (DNS, connect, TLS, timeout) surface as [`PurgeError::Network`].

use crate::error::{PurgeError, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// Issue one GET to `url` with `query` appended. Exactly one attempt.
    fn get(&self, url: &Url, query: &[(String, String)]) -> Result<RawResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url, query: &[(String, String)]) -> Result<RawResponse> {
        (**self).get(url, query)
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .user_agent(concat!("lspurge/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url, query: &[(String, String)]) -> Result<RawResponse> {
        let mut request = self.agent.get(url.as_str());
        for (key, value) in query {
            request = request.query(key, value);
        }

        tracing::debug!(url = %url, params = query.len(), "GET");

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                return Err(PurgeError::Network(format!("{}: {}", url, e)));
            }
        };

        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| PurgeError::Network(format!("failed to read response body: {}", e)))?;

        tracing::debug!(status, bytes = body.len(), "response");
        Ok(RawResponse { status, body })
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        pub url: Url,
        pub query: Vec<(String, String)>,
    }

    impl RecordedCall {
        pub fn param(&self, key: &str) -> Option<&str> {
            self.query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        }
    }

    #[derive(Default)]
    struct State {
        // (url substring, response); `None` simulates an unreachable server.
        rules: Vec<(String, Option<RawResponse>)>,
        calls: Vec<RecordedCall>,
    }

    /// Answers each GET with the first rule whose pattern is contained in
    /// the URL. Unmatched URLs fail as a network error.
    #[derive(Clone, Default)]
    pub struct RecordingTransport {
        state: Rc<RefCell<State>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, url_contains: &str, status: u16, body: &str) -> Self {
            self.state
                .borrow_mut()
                .rules
                .push((url_contains.to_string(), Some(RawResponse::new(status, body))));
            self
        }

        pub fn unreachable(self, url_contains: &str) -> Self {
            self.state
                .borrow_mut()
                .rules
                .push((url_contains.to_string(), None));
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.state.borrow().calls.clone()
        }

        pub fn calls_to(&self, url_contains: &str) -> Vec<RecordedCall> {
            self.calls()
                .into_iter()
                .filter(|c| c.url.as_str().contains(url_contains))
                .collect()
        }
    }

    impl Transport for RecordingTransport {
        fn get(&self, url: &Url, query: &[(String, String)]) -> Result<RawResponse> {
            let mut state = self.state.borrow_mut();
            state.calls.push(RecordedCall {
                url: url.clone(),
                query: query.to_vec(),
            });
            let rule = state
                .rules
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                .map(|(_, response)| response.clone());
            match rule {
                Some(Some(response)) => Ok(response),
                Some(None) | None => Err(PurgeError::Network(format!(
                    "{}: connection refused",
                    url
                ))),
            }
        }
    }
}
