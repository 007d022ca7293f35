//! Envelope responses built from message categories.
//!
//! The category alone decides the HTTP status, the `success` flag and the
//! text, so handlers never pick status codes themselves.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use poolside_core::message::{Envelope, MessageCategory};

/// Build the response for `category` with optional payload and details.
///
/// # Panics
///
/// Panics if `category` is missing from the registry. The registry is
/// validated before the server starts, so this only fires on a broken build.
pub fn respond(category: MessageCategory, data: Option<Value>, details: Option<String>) -> Response {
    let (status, envelope) = match Envelope::for_category(category, data, details) {
        Ok(resolved) => resolved,
        Err(e) => panic!("message registry is inconsistent: {e}"),
    };

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

/// Respond with `category` and no payload.
pub fn message(category: MessageCategory) -> Response {
    respond(category, None, None)
}

/// Respond with `category` and `payload` serialized as `data`.
pub fn with_data<T: Serialize>(category: MessageCategory, payload: &T) -> Response {
    match serde_json::to_value(payload) {
        Ok(value) => respond(category, Some(value), None),
        Err(e) => {
            tracing::error!(%category, "failed to serialize response payload: {e}");
            message(MessageCategory::AppInternalError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_error_category_body_is_exact() {
        let response = message(MessageCategory::AuthEmailAlreadyExists);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"success":false,"error":"Este email ya está registrado"}"#
        );
    }

    #[tokio::test]
    async fn test_success_with_data() {
        let response = with_data(MessageCategory::ScheduleCreated, &serde_json::json!({"id": 3}));
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["id"], 3);
        assert!(body.get("error").is_none());
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_details_are_passed_through() {
        let response = respond(
            MessageCategory::AppWelcome,
            None,
            Some("v0.1.0".to_string()),
        );
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["details"], "v0.1.0");
        assert!(body.get("data").is_none());
    }
}
