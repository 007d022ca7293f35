//! Query string extractor answering malformed parameters with an envelope.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use poolside_core::message::MessageCategory;

use crate::http::error::AppError;

/// Like `axum::extract::Query`, but rejects with `APP_INVALID_BODY`.
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ValidQuery(value)),
            Err(rejection) => {
                tracing::debug!("rejected query string: {rejection}");
                Err(AppError::new(MessageCategory::AppInvalidBody))
            }
        }
    }
}
