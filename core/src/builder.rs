//! Fluent request assembly.
//!
//! # Design
//! A `RequestBuilder` accumulates the method, path segments, body, options
//! and extra headers of one request. Every setter consumes and returns the
//! builder so calls chain; argument problems found along the way (an empty
//! path segment, a body that is not a JSON object) are remembered and
//! reported by `build()`/`call()` so the chain never has to be broken up.
//!
//! The builder moves through `Empty -> MethodSet -> PathSet`; body and
//! options are optional stages on top of `PathSet`. `build()` turns a
//! `PathSet` builder into the immutable `RequestSpec` (the ready state), and
//! `call()` builds and executes in one step. Both consume the builder, so a
//! builder serves exactly one request; clone it first to send variations.
//! `method()` and `with_body()` may be called again before that, and the
//! last value wins.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{HttpClient, Response};
use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::options::RequestOptions;
use crate::validate::require_object;

/// A JSON object request payload.
pub type Body = Map<String, Value>;

/// Serializes `value` into a [`Body`], rejecting anything that is not a
/// JSON object.
pub fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<Body> {
    let value = serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))?;
    require_object(value, "body")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    MethodSet,
    PathSet,
}

/// An immutable, executable request. Only produced by
/// [`RequestBuilder::build`], so it always has a method and at least one
/// path segment.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: HttpMethod,
    path_segments: Vec<String>,
    body: Option<Body>,
    options: Option<RequestOptions>,
    headers: Vec<(String, String)>,
}

impl RequestSpec {
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn options(&self) -> Option<&RequestOptions> {
        self.options.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: HttpClient,
    method: Option<HttpMethod>,
    path_segments: Vec<String>,
    body: Option<Body>,
    options: Option<RequestOptions>,
    headers: Vec<(String, String)>,
    error: Option<Error>,
}

impl RequestBuilder {
    pub(crate) fn new(client: HttpClient) -> Self {
        Self {
            client,
            method: None,
            path_segments: Vec::new(),
            body: None,
            options: None,
            headers: Vec::new(),
            error: None,
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Appends segments in order. Each one is escaped on its own when the
    /// URL is assembled, so `"a/b"` stays a single segment (`a%2Fb`).
    /// Empty, `.` and `..` segments are rejected.
    pub fn add_path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for segment in segments {
            let segment = segment.into();
            if segment.is_empty() || segment == "." || segment == ".." {
                self.fail(Error::invalid_argument("path segment"));
                continue;
            }
            self.path_segments.push(segment);
        }
        self
    }

    /// Attaches a JSON object body. It is serialized only when the request
    /// executes, and can still be changed through [`body_mut`](Self::body_mut).
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Attaches any serializable payload whose JSON form is an object.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        match to_body(value) {
            Ok(body) => self.body = Some(body),
            Err(e) => self.fail(e),
        }
        self
    }

    /// `None` leaves the builder unchanged.
    pub fn with_options(mut self, options: Option<&RequestOptions>) -> Self {
        if let Some(options) = options {
            self.options = Some(options.clone());
        }
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body_mut(&mut self) -> Option<&mut Body> {
        self.body.as_mut()
    }

    pub fn state(&self) -> BuilderState {
        match (self.method, self.path_segments.is_empty()) {
            (None, _) => BuilderState::Empty,
            (Some(_), true) => BuilderState::MethodSet,
            (Some(_), false) => BuilderState::PathSet,
        }
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn has_options(&self) -> bool {
        self.options.is_some()
    }

    pub fn build(self) -> Result<RequestSpec> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let method = self
            .method
            .ok_or_else(|| Error::State("no HTTP method set before call".to_string()))?;
        if self.path_segments.is_empty() {
            return Err(Error::State("no path segment added before call".to_string()));
        }
        Ok(RequestSpec {
            method,
            path_segments: self.path_segments,
            body: self.body,
            options: self.options,
            headers: self.headers,
        })
    }

    pub fn call(self) -> Result<Response> {
        let client = self.client.clone();
        let spec = self.build()?;
        client.execute(spec)
    }

    // First error wins; later ones are usually fallout from it.
    fn fail(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_with, RecordingTransport};
    use serde_json::json;

    fn object(value: Value) -> Body {
        require_object(value, "body").unwrap()
    }

    #[test]
    fn states_progress_with_method_and_path() {
        let (client, _) = client_with(RecordingTransport::replying(200, "{}"));
        let builder = client.request();
        assert_eq!(builder.state(), BuilderState::Empty);
        let builder = builder.method(HttpMethod::Get);
        assert_eq!(builder.state(), BuilderState::MethodSet);
        let builder = builder.add_path(["users"]);
        assert_eq!(builder.state(), BuilderState::PathSet);
        assert!(!builder.has_body());
        let builder = builder.with_body(Body::new()).with_options(Some(&RequestOptions::new()));
        assert!(builder.has_body());
        assert!(builder.has_options());
    }

    #[test]
    fn call_without_method_is_a_state_error() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        let err = client.request().add_path(["a"]).call().unwrap_err();
        assert!(matches!(err, Error::State(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn call_without_path_is_a_state_error() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        let err = client.method(HttpMethod::Get).call().unwrap_err();
        assert!(matches!(err, Error::State(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn segments_are_escaped_individually() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        client.method(HttpMethod::Get).add_path(["a", "b"]).call().unwrap();
        assert_eq!(transport.last().unwrap().url, "http://api.test/api/v2/a/b");

        client.method(HttpMethod::Get).add_path(["users", "auth0/123"]).call().unwrap();
        assert_eq!(transport.last().unwrap().url, "http://api.test/api/v2/users/auth0%2F123");
    }

    #[test]
    fn add_path_appends_in_call_order() {
        let (client, _) = client_with(RecordingTransport::replying(200, "{}"));
        let spec = client
            .method(HttpMethod::Get)
            .add_path(["tickets"])
            .add_path(vec!["email-verification".to_string()])
            .build()
            .unwrap();
        assert_eq!(spec.path_segments(), ["tickets", "email-verification"]);
    }

    #[test]
    fn empty_or_dot_segment_is_an_invalid_argument() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        for bad in ["", ".", ".."] {
            let err = client.method(HttpMethod::Get).add_path(["users", bad]).call().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }), "segment {bad:?}");
        }
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn last_method_and_body_win() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        client
            .method(HttpMethod::Get)
            .method(HttpMethod::Patch)
            .add_path(["users", "u1"])
            .with_body(object(json!({"blocked": false})))
            .with_body(object(json!({"blocked": true})))
            .call()
            .unwrap();
        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Patch);
        assert_eq!(sent.body.as_deref(), Some(r#"{"blocked":true}"#));
    }

    #[test]
    fn body_can_change_until_call() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        let mut builder = client
            .method(HttpMethod::Post)
            .add_path(["tickets", "password-change"])
            .with_body(object(json!({"user_id": "u1"})));
        builder
            .body_mut()
            .unwrap()
            .insert("ttl_sec".to_string(), json!(60));
        builder.call().unwrap();
        assert_eq!(
            transport.last().unwrap().body.as_deref(),
            Some(r#"{"user_id":"u1","ttl_sec":60}"#)
        );
    }

    #[test]
    fn with_json_rejects_non_objects() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        let err = client
            .method(HttpMethod::Post)
            .add_path(["x"])
            .with_json(&[1, 2, 3])
            .call()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref name } if name == "body"));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn none_options_are_a_no_op() {
        let (client, _) = client_with(RecordingTransport::replying(200, "{}"));
        let builder = client
            .method(HttpMethod::Get)
            .add_path(["users"])
            .with_options(Some(&RequestOptions::new().with_filter("q", "x")))
            .with_options(None);
        let spec = builder.build().unwrap();
        assert_eq!(spec.options().unwrap().filters, vec![("q".to_string(), "x".to_string())]);
    }

    #[test]
    fn cloned_builder_sends_an_independent_request() {
        let (client, transport) = client_with(RecordingTransport::replying(200, "{}"));
        let base = client.method(HttpMethod::Get).add_path(["users"]);
        let filtered = base.clone().with_options(Some(&RequestOptions::new().with_filter("q", "x")));
        base.call().unwrap();
        filtered.call().unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].url, "http://api.test/api/v2/users");
        assert_eq!(sent[1].url, "http://api.test/api/v2/users?q=x");
    }
}
