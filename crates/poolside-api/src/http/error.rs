//! Application error type mapping domain failures to envelope responses.

use std::fmt::Display;

use axum::response::{IntoResponse, Response};

use poolside_core::message::{Categorized, MessageCategory};

use crate::http::response::respond;

/// A failed request, answered with exactly one message category.
///
/// `cause` is set for internal failures; it is logged and never sent to
/// the client. `details` is client-safe and goes into the envelope.
#[derive(Debug)]
pub struct AppError {
    category: MessageCategory,
    cause: Option<String>,
    details: Option<String>,
}

impl AppError {
    /// An expected, client-facing failure.
    pub fn new(category: MessageCategory) -> Self {
        Self {
            category,
            cause: None,
            details: None,
        }
    }

    /// An internal failure answered with `category` (a 500 category).
    pub fn internal(category: MessageCategory, cause: impl Display) -> Self {
        Self {
            category,
            cause: Some(cause.to_string()),
            details: None,
        }
    }

    /// Map a domain error, falling back to `fallback` when it has no category.
    pub fn from_domain<E>(err: E, fallback: MessageCategory) -> Self
    where
        E: Categorized + Display,
    {
        match err.category() {
            Some(category) => Self {
                details: err.details(),
                ..Self::new(category)
            },
            None => Self::internal(fallback, err),
        }
    }

    pub fn category(&self) -> MessageCategory {
        self.category
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self.cause {
            Some(cause) => tracing::error!(category = %self.category, "{cause}"),
            None => tracing::debug!(category = %self.category, "request rejected"),
        }
        respond(self.category, None, self.details)
    }
}

/// Attach the operation's 500 category to a domain result.
pub trait ResultExt<T> {
    fn or_fail(self, fallback: MessageCategory) -> Result<T, AppError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Categorized + Display,
{
    fn or_fail(self, fallback: MessageCategory) -> Result<T, AppError> {
        self.map_err(|e| AppError::from_domain(e, fallback))
    }
}

#[cfg(test)]
mod tests {
    use poolside_types::error::{ReservationError, ScheduleError};

    use super::*;

    #[test]
    fn test_expected_error_keeps_its_category() {
        let err = AppError::from_domain(ScheduleError::NotFound, MessageCategory::ScheduleFetchError);
        assert_eq!(err.category(), MessageCategory::ScheduleNotFound);
        assert!(err.cause.is_none());
    }

    #[test]
    fn test_internal_error_uses_fallback() {
        let result: Result<(), _> = Err(ReservationError::StorageError("disk I/O".to_string()));
        let err = result.or_fail(MessageCategory::ReservationCreateError).unwrap_err();
        assert_eq!(err.category(), MessageCategory::ReservationCreateError);
        assert_eq!(err.cause.as_deref(), Some("storage error: disk I/O"));
        assert!(err.details.is_none());
    }

    #[tokio::test]
    async fn test_validation_details_reach_the_body() {
        let err = AppError::from_domain(
            ReservationError::InvalidStatus("LATE".to_string()),
            MessageCategory::ReservationFetchError,
        );
        assert!(err.cause.is_none());

        let response = err.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["details"], "unknown status 'LATE'");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::internal(MessageCategory::UserFetchError, "boom").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
