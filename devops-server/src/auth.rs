//! Authentication gate for the message endpoint.
//!
//! Both checks must pass: the shared API key first, then the JWT. The first
//! failure short-circuits with 401, before the request body is read.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use devops_core::{validate_api_key, ClaimSet};
use tracing::warn;

/// Header carrying the shared API key
pub const API_KEY_HEADER: &str = "x-parse-rest-api-key";

/// Header carrying the signed token
pub const JWT_HEADER: &str = "x-jwt-kwy";

/// Proof that a request passed both checks, with the token's claims
#[derive(Debug, Clone)]
pub struct Authenticated(pub ClaimSet);

/// Run the API key and JWT checks against request headers
pub fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<ClaimSet, ApiError> {
    if let Err(e) = validate_api_key(header_str(headers, API_KEY_HEADER), &state.api_key) {
        warn!("Rejected request: {}", e);
        return Err(e.into());
    }

    state
        .tokens
        .validate(header_str(headers, JWT_HEADER))
        .map_err(|e| {
            warn!("Rejected request: {}", e);
            e.into()
        })
}

/// Header value as text. Values that are not visible ASCII count as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, state).map(Authenticated)
    }
}
