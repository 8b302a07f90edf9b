//! Outbound HTTP plumbing shared by the resolver, fetcher and geocoder.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, error, info_span};

use crate::error::{Result, SlotFinderError};

pub const USER_AGENT: &str = concat!("padel-slot-finder/", env!("CARGO_PKG_VERSION"));

/// Blocking GET returning the body of a successful response.
///
/// Implementations must surface every failure (connect, timeout, non-2xx,
/// unreadable body) as [`SlotFinderError::Api`].
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        (**self).get(url, query)
    }
}

/// `ureq`-backed transport. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self { agent: config.into() }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, String)]) -> Result<String> {
        let mut request = self.agent.get(url).header("User-Agent", USER_AGENT);
        for (key, value) in query {
            request = request.query(*key, value);
        }

        let response_result = {
            let _span = info_span!("platform_get", url = %url).entered();
            request.call()
        };
        match response_result {
            Ok(response) => {
                debug!(status = response.status().as_u16(), url = %url, "Received response");
                let mut body_reader = response.into_body();
                body_reader.read_to_string().map_err(|e| {
                    error!(error = %e, url = %url, "Failed to read response body");
                    SlotFinderError::api(format!("Failed to read response body: {}", e), None)
                })
            }
            Err(ureq::Error::StatusCode(code)) => {
                error!(status = code, url = %url, "Request returned non-success status");
                Err(SlotFinderError::api(format!("HTTP status {}", code), Some(code)))
            }
            Err(e) => {
                error!(error = %e, url = %url, "Request failed");
                Err(SlotFinderError::api(format!("Request failed: {}", e), None))
            }
        }
    }
}

/// Decode a JSON body, mapping any mismatch to a parse-class API error.
pub(crate) fn decode_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str::<T>(body).map_err(|e| {
        error!(error = %e, bytes = body.len(), what, "Failed to decode response");
        SlotFinderError::parse(format!("Invalid JSON response from {}: {}", what, e))
    })
}
