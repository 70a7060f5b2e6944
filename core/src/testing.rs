//! In-memory transport for unit tests.

use std::sync::{Arc, Mutex};

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};

/// Records every request and answers each one with the same canned reply.
pub(crate) struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    reply: Result<HttpResponse, TransportError>,
}

impl RecordingTransport {
    pub(crate) fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Ok(HttpResponse {
                status,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: body.to_string(),
            }),
        })
    }

    pub(crate) fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            reply: Err(TransportError::new(message)),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

/// Client rooted at `http://api.test/api/v2/` with token `test-token`.
pub(crate) fn client_with(transport: Arc<RecordingTransport>) -> (HttpClient, Arc<RecordingTransport>) {
    let config = ClientConfig::new("http://api.test/api/v2/")
        .unwrap()
        .with_bearer_token("test-token");
    let client = HttpClient::with_transport(config, transport.clone());
    (client, transport)
}
