use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Ticket lifetime when the request does not set `ttl_sec`.
pub const DEFAULT_TTL_SEC: u64 = 432_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketKind {
    EmailVerification,
    PasswordChange,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssuedTicket {
    pub id: Uuid,
    pub kind: TicketKind,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub ttl_sec: u64,
    pub ticket: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketCreated {
    pub ticket: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct EmailVerificationInput {
    pub user_id: Option<String>,
    pub ttl_sec: Option<u64>,
}

#[derive(Deserialize)]
pub struct PasswordChangeInput {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub connection_id: Option<String>,
    pub ttl_sec: Option<u64>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    #[serde(default)]
    pub include_totals: bool,
    pub fields: Option<String>,
    pub include_fields: Option<bool>,
}

pub type Db = Arc<RwLock<Vec<IssuedTicket>>>;

type ApiFailure = (StatusCode, Json<ErrorBody>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/api/v2/tickets", get(list_tickets))
        .route("/api/v2/tickets/email-verification", post(create_email_verification))
        .route("/api/v2/tickets/password-change", post(create_password_change))
        .route("/api/v2/tickets/{id}", get(get_ticket))
        .route_layer(middleware::from_fn(require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, message: impl Into<String>) -> ApiFailure {
    (
        status,
        Json(ErrorBody {
            status_code: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
        }),
    )
}

fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return failure(StatusCode::UNAUTHORIZED, "Missing authentication").into_response();
    }
    next.run(request).await
}

async fn issue(db: &Db, ticket: IssuedTicket) -> (StatusCode, Json<TicketCreated>) {
    tracing::info!(id = %ticket.id, kind = ?ticket.kind, "issued ticket");
    let url = ticket.ticket.clone();
    db.write().await.push(ticket);
    (StatusCode::CREATED, Json(TicketCreated { ticket: url }))
}

async fn create_email_verification(
    State(db): State<Db>,
    Json(input): Json<EmailVerificationInput>,
) -> Result<(StatusCode, Json<TicketCreated>), ApiFailure> {
    if !non_blank(&input.user_id) {
        return Err(failure(StatusCode::BAD_REQUEST, "Payload validation error: missing user_id"));
    }
    let id = Uuid::new_v4();
    let ticket = IssuedTicket {
        id,
        kind: TicketKind::EmailVerification,
        user_id: input.user_id,
        email: None,
        ttl_sec: input.ttl_sec.unwrap_or(DEFAULT_TTL_SEC),
        ticket: format!("https://mock.local/u/email-verification?ticket={id}#"),
    };
    Ok(issue(&db, ticket).await)
}

async fn create_password_change(
    State(db): State<Db>,
    Json(input): Json<PasswordChangeInput>,
) -> Result<(StatusCode, Json<TicketCreated>), ApiFailure> {
    let by_email = non_blank(&input.email) && non_blank(&input.connection_id);
    if !non_blank(&input.user_id) && !by_email {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            "Payload validation error: user_id or email with connection_id is required",
        ));
    }
    let id = Uuid::new_v4();
    let ticket = IssuedTicket {
        id,
        kind: TicketKind::PasswordChange,
        user_id: input.user_id,
        email: input.email,
        ttl_sec: input.ttl_sec.unwrap_or(DEFAULT_TTL_SEC),
        ticket: format!("https://mock.local/u/reset-verify?ticket={id}#"),
    };
    Ok(issue(&db, ticket).await)
}

async fn list_tickets(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Value> {
    let tickets = db.read().await;
    let per_page = params.per_page.unwrap_or(50).max(1);
    let page = params.page.unwrap_or(0);
    let selected: Vec<Value> = tickets
        .iter()
        .skip(page * per_page)
        .take(per_page)
        .map(|ticket| project(ticket, params.fields.as_deref(), params.include_fields.unwrap_or(true)))
        .collect();

    if params.include_totals {
        Json(serde_json::json!({
            "start": page * per_page,
            "limit": per_page,
            "total": tickets.len(),
            "tickets": selected,
        }))
    } else {
        Json(Value::Array(selected))
    }
}

/// Keeps (or with `include == false`, drops) the comma-separated `fields`.
fn project(ticket: &IssuedTicket, fields: Option<&str>, include: bool) -> Value {
    let Ok(Value::Object(object)) = serde_json::to_value(ticket) else {
        return Value::Null;
    };
    let Some(fields) = fields else {
        return Value::Object(object);
    };
    let wanted: Vec<&str> = fields.split(',').map(str::trim).collect();
    let projected: Map<String, Value> = object
        .into_iter()
        .filter(|(key, _)| wanted.contains(&key.as_str()) == include)
        .collect();
    Value::Object(projected)
}

async fn get_ticket(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<IssuedTicket>, ApiFailure> {
    let tickets = db.read().await;
    Uuid::parse_str(&id)
        .ok()
        .and_then(|uuid| tickets.iter().find(|t| t.id == uuid).cloned())
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("ticket {id} not found")))
}
