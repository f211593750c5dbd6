//! Request extractors

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    Json,
};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejections all map to 422
///
/// A body without any `Content-Type` is still parsed as JSON. A non-JSON
/// content type, a syntax error or a schema mismatch is rejected.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(header::CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            return Ok(ValidatedJson(value));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::UnprocessableEntity(e.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(ValidatedJson)
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid JSON body: {}", e)))
    }
}
