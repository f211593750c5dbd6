//! Error types for the HTTP API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use devops_core::AuthError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body failed schema validation (422)
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Gateway core error
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Auth(e) if e.is_unauthorized() => (StatusCode::UNAUTHORIZED, e.to_string()),
            ApiError::Auth(e) => {
                error!("Gateway core error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::UnprocessableEntity("missing field `to`".to_string());
        assert_eq!(format!("{}", err), "Unprocessable entity: missing field `to`");

        let err: ApiError = AuthError::InvalidJwt.into();
        assert_eq!(format!("{}", err), "Invalid JWT");
    }

    #[tokio::test]
    async fn test_invalid_api_key_response() {
        let response = ApiError::from(AuthError::InvalidApiKey).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "Invalid API Key");
    }

    #[tokio::test]
    async fn test_invalid_jwt_response() {
        let response = ApiError::from(AuthError::InvalidJwt).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["detail"], "Invalid JWT");
    }

    #[tokio::test]
    async fn test_unprocessable_entity_response() {
        let response = ApiError::UnprocessableEntity("bad body".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["detail"], "bad body");
    }

    #[tokio::test]
    async fn test_core_config_error_is_internal() {
        let err = ApiError::from(AuthError::Config("jwt_secret must not be empty".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "Internal Server Error");
        assert!(!json.to_string().contains("jwt_secret"));
    }
}
