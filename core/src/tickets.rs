//! The `tickets` endpoints: email verification and password change.
//!
//! Each operation exists in two forms. `*_request` assembles the builder
//! without sending, `create_*` sends and hands back the raw response, and the
//! `*_ticket` helpers take the typed parameter structs and decode the
//! resulting [`Ticket`].

use serde_json::{json, Value};

use crate::builder::{to_body, Body, RequestBuilder};
use crate::client::{HttpClient, Response};
use crate::error::{Error, Result};
use crate::http::HttpMethod;
use crate::merge::merge;
use crate::options::RequestOptions;
use crate::types::{EmailVerificationTicket, PasswordChangeTicket, Ticket};
use crate::validate::require_non_empty;

#[derive(Debug, Clone)]
pub struct Tickets {
    http: HttpClient,
}

impl Tickets {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// POST `tickets/email-verification`.
    ///
    /// `user_id` is placed first in the body and overrides any `user_id`
    /// already present in `body`.
    pub fn email_verification_request(
        &self,
        user_id: &str,
        body: Option<&Body>,
        options: Option<&RequestOptions>,
    ) -> Result<RequestBuilder> {
        let user_id = require_non_empty(user_id, "userId")?;

        let mut fixed = Body::new();
        fixed.insert("user_id".to_string(), json!(user_id));
        // Merging twice keeps `user_id` leading while letting it win.
        let body = merge(&merge(&fixed, body), Some(&fixed));

        Ok(self
            .http
            .method(HttpMethod::Post)
            .add_path(["tickets", "email-verification"])
            .with_body(body)
            .with_options(options))
    }

    pub fn create_email_verification(
        &self,
        user_id: &str,
        body: Option<&Body>,
        options: Option<&RequestOptions>,
    ) -> Result<Response> {
        self.email_verification_request(user_id, body, options)?.call()
    }

    pub fn create_email_verification_ticket(&self, user_id: &str, params: &EmailVerificationTicket) -> Result<Ticket> {
        let body = to_body(params)?;
        self.create_email_verification(user_id, Some(&body), None)?.json()
    }

    /// POST `tickets/password-change` with `body` as given. A `user_id`, if
    /// present, must be a non-empty string.
    pub fn password_change_request(&self, body: &Body, options: Option<&RequestOptions>) -> Result<RequestBuilder> {
        match body.get("user_id") {
            None => {}
            Some(Value::String(user_id)) => {
                require_non_empty(user_id, "user_id")?;
            }
            Some(_) => return Err(Error::invalid_argument("user_id")),
        }

        Ok(self
            .http
            .method(HttpMethod::Post)
            .add_path(["tickets", "password-change"])
            .with_body(body.clone())
            .with_options(options))
    }

    pub fn create_password_change(&self, body: &Body, options: Option<&RequestOptions>) -> Result<Response> {
        self.password_change_request(body, options)?.call()
    }

    pub fn create_password_change_ticket(&self, params: &PasswordChangeTicket) -> Result<Ticket> {
        let body = to_body(params)?;
        self.create_password_change(&body, None)?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_with, RecordingTransport};
    use crate::validate::require_object;

    fn object(value: Value) -> Body {
        require_object(value, "body").unwrap()
    }

    fn setup(transport: std::sync::Arc<RecordingTransport>) -> (Tickets, std::sync::Arc<RecordingTransport>) {
        let (client, transport) = client_with(transport);
        (Tickets::new(client), transport)
    }

    #[test]
    fn email_verification_posts_merged_body() {
        let (tickets, transport) = setup(RecordingTransport::replying(201, r#"{"ticket":"https://t/v"}"#));
        let extra = object(json!({"ttl_sec": 86400}));
        let response = tickets.create_email_verification("user123", Some(&extra), None).unwrap();
        assert_eq!(response.status(), 201);

        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "http://api.test/api/v2/tickets/email-verification");
        assert_eq!(sent.body.as_deref(), Some(r#"{"user_id":"user123","ttl_sec":86400}"#));
    }

    #[test]
    fn caller_cannot_override_user_id() {
        let (tickets, transport) = setup(RecordingTransport::replying(201, r#"{"ticket":"x"}"#));
        let spoofed = object(json!({"result_url": "https://app/done", "user_id": "someone-else"}));
        tickets.create_email_verification("user123", Some(&spoofed), None).unwrap();
        assert_eq!(
            transport.last().unwrap().body.as_deref(),
            Some(r#"{"user_id":"user123","result_url":"https://app/done"}"#)
        );
    }

    #[test]
    fn empty_user_id_never_reaches_the_transport() {
        let (tickets, transport) = setup(RecordingTransport::replying(201, "{}"));
        for user_id in ["", "   "] {
            let err = tickets.create_email_verification(user_id, None, None).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { ref name } if name == "userId"));
        }
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn email_verification_without_body_sends_only_user_id() {
        let (tickets, _) = setup(RecordingTransport::replying(201, "{}"));
        let spec = tickets.email_verification_request("auth0|abc", None, None).unwrap().build().unwrap();
        assert_eq!(spec.body(), Some(&object(json!({"user_id": "auth0|abc"}))));
        assert_eq!(spec.path_segments(), ["tickets", "email-verification"]);
    }

    #[test]
    fn password_change_sends_body_unchanged() {
        let (tickets, transport) = setup(RecordingTransport::replying(201, r#"{"ticket":"https://t/p"}"#));
        let body = object(json!({"email": "jo@example.com", "connection_id": "con_1"}));
        tickets.create_password_change(&body, None).unwrap();

        let sent = transport.last().unwrap();
        assert_eq!(sent.url, "http://api.test/api/v2/tickets/password-change");
        assert_eq!(
            serde_json::from_str::<Value>(sent.body.as_deref().unwrap()).unwrap(),
            json!({"email": "jo@example.com", "connection_id": "con_1"})
        );
    }

    #[test]
    fn password_change_rejects_blank_or_non_string_user_id() {
        let (tickets, transport) = setup(RecordingTransport::replying(201, "{}"));
        for body in [json!({"user_id": ""}), json!({"user_id": 42})] {
            let err = tickets.create_password_change(&object(body), None).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument { .. }));
        }
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn typed_helpers_decode_the_ticket() {
        let (tickets, transport) = setup(RecordingTransport::replying(201, r#"{"ticket":"https://t/lo/reset?ticket=1#"}"#));
        let ticket = tickets
            .create_password_change_ticket(&PasswordChangeTicket {
                user_id: Some("user123".to_string()),
                mark_email_as_verified: Some(true),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ticket.ticket, "https://t/lo/reset?ticket=1#");
        assert_eq!(
            transport.last().unwrap().body.as_deref(),
            Some(r#"{"user_id":"user123","mark_email_as_verified":true}"#)
        );

        let ticket = tickets
            .create_email_verification_ticket("user123", &EmailVerificationTicket::default())
            .unwrap();
        assert_eq!(ticket.ticket, "https://t/lo/reset?ticket=1#");
    }

    #[test]
    fn api_rejection_is_surfaced() {
        let (tickets, _) = setup(RecordingTransport::replying(
            400,
            r#"{"statusCode":400,"error":"Bad Request","message":"Payload validation error"}"#,
        ));
        let err = tickets.create_email_verification("user123", None, None).unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.api_body_json().unwrap()["error"], "Bad Request");
    }
}
