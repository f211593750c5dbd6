//! HTTP request handlers

use crate::api::{MessageRequest, MessageResponse, StatusResponse, UNSUPPORTED_METHOD_BODY};
use crate::auth::Authenticated;
use crate::extract::ValidatedJson;
use axum::Json;
use devops_core::format_message;
use tracing::{debug, info};

/// Root status endpoint
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Health check
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Handle `POST /DevOps`.
///
/// [`Authenticated`] runs before the body is parsed, so unauthenticated
/// requests never reach the formatter and get 401 even with a bad body.
pub async fn send_message(
    Authenticated(claims): Authenticated,
    ValidatedJson(req): ValidatedJson<MessageRequest>,
) -> Json<MessageResponse> {
    debug!(claims = claims.len(), ttl = req.time_to_life_sec, "Message request authenticated");

    let response = format_message(&req);

    info!(to = %req.to, "Message accepted");

    Json(response)
}

/// GET, PUT, DELETE and PATCH on `/DevOps`: 200 with the JSON string `"ERROR"`
pub async fn method_not_supported() -> Json<&'static str> {
    Json(UNSUPPORTED_METHOD_BODY)
}
