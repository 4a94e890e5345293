use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::shared::constants::BAD_REQUEST_MESSAGE;

/// JSON body extractor that ignores Content-Type and rejects with a 400
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!("Failed to read request body: {}", e);
            AppError::BadRequest(BAD_REQUEST_MESSAGE.to_string())
        })?;

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|e| {
            tracing::warn!("Failed to parse request body: {}", e);
            AppError::BadRequest(BAD_REQUEST_MESSAGE.to_string())
        })?;

        Ok(Self(value))
    }
}

/// Path extractor whose parse failures render as "400 bad request"
pub struct AppPath<T>(pub T);

impl<T, S> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::warn!("Invalid path parameter: {}", rejection);
                Err(AppError::BadRequest(BAD_REQUEST_MESSAGE.to_string()))
            }
        }
    }
}
