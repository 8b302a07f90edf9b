use crate::config::Config;
use crate::platform::{HttpTransport, Transport};

/// Entry point of the engine: venue resolution, availability fetching and filtering.
///
/// Holds no per-request state, so one instance can serve concurrent callers
/// as long as the transport can.
#[derive(Debug, Clone)]
pub struct SlotFinder<T = HttpTransport> {
    pub(crate) transport: T,
    pub(crate) config: Config,
}

impl SlotFinder<HttpTransport> {
    /// Build a finder backed by a pooled HTTP agent using the configured timeout.
    pub fn from_config(config: Config) -> Self {
        let transport = HttpTransport::new(config.request_timeout);
        Self { transport, config }
    }
}

impl<T: Transport> SlotFinder<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base_url.trim_end_matches('/'), path)
    }
}
