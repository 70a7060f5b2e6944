//! Request execution against the configured API.
//!
//! # Design
//! `HttpClient` holds the configuration and a shared `Transport` behind
//! `Arc`s and nothing mutable, so clones are cheap and any number of threads
//! can execute requests through it at once. Execution turns a `RequestSpec`
//! into an `HttpRequest` (URL, headers, serialized body), sends it, and
//! classifies the outcome: no response at all is `Error::Network`, a non-2xx
//! response is `Error::Api`. Nothing is retried here.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use crate::builder::{RequestBuilder, RequestSpec};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

#[derive(Clone)]
pub struct HttpClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url.as_str())
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Client over the default `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        let transport = Arc::new(UreqTransport::new(config.timeout));
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A builder with nothing set.
    pub fn request(&self) -> RequestBuilder {
        RequestBuilder::new(self.clone())
    }

    /// Shorthand for `request().method(method)`.
    pub fn method(&self, method: HttpMethod) -> RequestBuilder {
        self.request().method(method)
    }

    /// Assembles the wire request for `spec` without sending it.
    pub fn to_http_request(&self, spec: &RequestSpec) -> Result<HttpRequest> {
        let url = self.url_for(spec)?;

        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), self.config.user_agent.clone()),
        ];
        if let Some(token) = &self.config.bearer_token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }

        let body = match spec.body() {
            Some(body) => {
                headers.push(("content-type".to_string(), "application/json".to_string()));
                Some(serde_json::to_string(body).map_err(|e| Error::Serialization(e.to_string()))?)
            }
            None => None,
        };
        headers.extend(spec.headers().iter().cloned());

        Ok(HttpRequest {
            method: spec.method(),
            url: url.into(),
            headers,
            body,
        })
    }

    pub fn execute(&self, spec: RequestSpec) -> Result<Response> {
        let request = self.to_http_request(&spec)?;
        tracing::debug!(method = %request.method, url = %request.url, "dispatching request");
        if let Some(body) = &request.body {
            tracing::trace!(bytes = body.len(), "request body attached");
        }

        let response = self.transport.send(&request).map_err(|e| {
            tracing::debug!(method = %request.method, url = %request.url, error = %e, "transport failed");
            Error::Network { cause: e.message }
        })?;
        tracing::debug!(method = %request.method, url = %request.url, status = response.status, "response received");

        classify(response)
    }

    fn url_for(&self, spec: &RequestSpec) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("base url `{}` cannot carry a path", self.config.base_url)))?
            .pop_if_empty()
            .extend(spec.path_segments());

        if let Some(options) = spec.options() {
            let pairs = options.query_pairs();
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(&pairs);
            }
        }
        Ok(url)
    }
}

/// 2xx becomes a `Response`; anything else an `Api` error with the raw body.
fn classify(response: HttpResponse) -> Result<Response> {
    if response.is_success() {
        return Ok(Response { inner: response });
    }
    Err(Error::Api {
        status: response.status,
        body: response.body,
    })
}

/// A successful response. Decoding is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    inner: HttpResponse,
}

impl Response {
    pub fn status(&self) -> u16 {
        self.inner.status
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.header(name)
    }

    pub fn text(&self) -> &str {
        &self.inner.body
    }

    pub fn is_empty(&self) -> bool {
        self.inner.body.trim().is_empty()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.inner.body).map_err(|e| Error::Deserialization(e.to_string()))
    }

    pub fn into_inner(self) -> HttpResponse {
        self.inner
    }
}
