//! Entry point tying configuration, transport and endpoint wrappers together.

use std::sync::Arc;

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::tickets::Tickets;
use crate::transport::Transport;

/// Client for the management API.
///
/// Cheap to clone and safe to share between threads; every endpoint wrapper
/// it hands out uses the same underlying connection pool.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    http: HttpClient,
}

impl ManagementClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { http: HttpClient::new(config) }
    }

    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            http: HttpClient::with_transport(config, transport),
        }
    }

    pub fn tickets(&self) -> Tickets {
        Tickets::new(self.http.clone())
    }

    /// The raw request pipeline, for endpoints without a wrapper.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}
