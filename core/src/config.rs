//! Client configuration, built in code or read from the environment.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("mgmt-core/", env!("CARGO_PKG_VERSION"));

/// Connection settings shared by every request a client makes.
///
/// `base_url` is the API root, e.g. `https://tenant.example.com/api/v2/`;
/// path segments are appended below it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub bearer_token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::Config(format!("base url `{base_url}`: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!("base url `{base_url}` cannot carry a path")));
        }
        Ok(Self {
            base_url,
            bearer_token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Reads `MGMT_BASE_URL` (required), `MGMT_TOKEN`, `MGMT_TIMEOUT_SECS`
    /// and `MGMT_USER_AGENT`.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("MGMT_BASE_URL").map_err(|_| Error::Config("MGMT_BASE_URL is not set".to_string()))?;
        let mut config = Self::new(&base_url)?;

        if let Ok(token) = env::var("MGMT_TOKEN") {
            config = config.with_bearer_token(token);
        }
        if let Ok(secs) = env::var("MGMT_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|_| Error::Config(format!("MGMT_TIMEOUT_SECS `{secs}` is not a number of seconds")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Ok(user_agent) = env::var("MGMT_USER_AGENT") {
            config = config.with_user_agent(user_agent);
        }
        Ok(config)
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.bearer_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
