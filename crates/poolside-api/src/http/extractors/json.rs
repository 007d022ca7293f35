//! JSON body extractor answering malformed bodies with an envelope.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use poolside_core::message::MessageCategory;

use crate::http::error::AppError;

/// Like `axum::Json`, but rejects with `APP_INVALID_BODY`.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => {
                tracing::debug!("rejected request body: {rejection}");
                Err(AppError::new(MessageCategory::AppInvalidBody))
            }
        }
    }
}
