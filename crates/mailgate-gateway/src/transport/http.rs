//! HTTP binding for intercepted auth operations.
//!
//! Each interception point is exposed as `POST /api/auth/<point path>`. The
//! body is handed to the before-hooks as JSON; a rejection aborts with a 400
//! (policy / malformed input) or 500 (validator or internal failure).

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use mailgate_core::error::{ClientCode, MailgateError};

use crate::app_state::AppState;
use crate::hooks::{HookContext, InterceptionPoint};

/// Route prefix the auth pipeline is mounted under.
pub const AUTH_PREFIX: &str = "/api/auth";

/// A before-hook failure, rendered as a client-visible error.
#[derive(Debug)]
pub struct HookRejection(pub MailgateError);

impl HookRejection {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MailgateError> for HookRejection {
    fn from(e: MailgateError) -> Self {
        Self(e)
    }
}

impl IntoResponse for HookRejection {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "before hook failed");
        }
        let body = json!({
            "code": self.0.client_code().as_str(),
            "message": self.0.client_message(),
        });
        (status, Json(body)).into_response()
    }
}

/// Parse the raw body. Empty means "no fields", which leaves `email` absent.
pub fn parse_body(raw: &[u8]) -> Result<Value, HookRejection> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(raw)
        .map_err(|e| HookRejection(MailgateError::BadRequest(format!("invalid json body: {e}"))))
}

/// Run every before-hook bound to `point`.
pub async fn intercept(
    state: &AppState,
    point: InterceptionPoint,
    body: Value,
) -> Result<(), HookRejection> {
    let ctx = HookContext::new(point, body);
    state.hooks().run_before(&ctx).await?;
    Ok(())
}

/// Handler for one interception point. On success the real operation would
/// run next; this host only acknowledges that it may proceed.
pub async fn handle_point(
    State(state): State<AppState>,
    point: InterceptionPoint,
    raw: Bytes,
) -> Result<Json<Value>, HookRejection> {
    let body = parse_body(&raw)?;
    intercept(&state, point, body).await?;
    Ok(Json(json!({ "status": "ok", "point": point.path() })))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
