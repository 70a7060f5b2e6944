//! Ticket DTOs.
//!
//! # Design
//! The request structs cover the documented ticket parameters as optional
//! fields so typed callers get names checked at compile time. They convert
//! into a [`Body`](crate::builder::Body) before sending; callers that need a
//! parameter not listed here can pass a raw body to the `Tickets` methods
//! instead.

use serde::{Deserialize, Serialize};

/// Result of creating a ticket: the URL the user has to visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub ticket: String,
}

/// Identity to verify when a user has several linked accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketIdentity {
    pub user_id: String,
    pub provider: String,
}

/// Optional parameters of an email-verification ticket. The user id is
/// passed separately and always takes precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailVerificationTicket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Lifetime of the ticket in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_sec: Option<u64>,
    #[serde(rename = "includeEmailInRedirect", skip_serializing_if = "Option::is_none")]
    pub include_email_in_redirect: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<TicketIdentity>,
}

/// Parameters of a password-change ticket. Identify the user either by
/// `user_id` or by `email` together with `connection_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordChangeTicket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_sec: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_email_as_verified: Option<bool>,
    #[serde(rename = "includeEmailInRedirect", skip_serializing_if = "Option::is_none")]
    pub include_email_in_redirect: Option<bool>,
}
