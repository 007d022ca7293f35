//! The JSON response envelope.
//!
//! ```json
//! { "success": true, "message": "...", "data": { ... }, "details": "..." }
//! { "success": false, "error": "..." }
//! ```
//!
//! `message` is used for successes and `error` for failures. `data` and
//! `details` are omitted entirely (never `null`) when not supplied.

use serde::Serialize;
use serde_json::Value;

use super::category::MessageCategory;
use super::registry::{self, RegistryError, Resolved};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Envelope {
    /// Shape an envelope around an already resolved registry entry.
    pub fn from_resolved(resolved: Resolved, data: Option<Value>, details: Option<String>) -> Self {
        let success = resolved.is_success();
        Self {
            success,
            message: success.then_some(resolved.text),
            error: (!success).then_some(resolved.text),
            data,
            details,
        }
    }

    /// Resolve `category` and return its status code with the envelope.
    pub fn for_category(
        category: MessageCategory,
        data: Option<Value>,
        details: Option<String>,
    ) -> Result<(u16, Self), RegistryError> {
        let resolved = registry::resolve(category)?;
        Ok((resolved.status, Self::from_resolved(resolved, data, details)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_envelope_is_bit_exact() {
        let (status, envelope) =
            Envelope::for_category(MessageCategory::AuthEmailAlreadyExists, None, None).unwrap();
        assert_eq!(status, 400);
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"success":false,"error":"Este email ya está registrado"}"#
        );
    }

    #[test]
    fn test_success_envelope_with_data() {
        let (status, envelope) = Envelope::for_category(
            MessageCategory::AuthLogin,
            Some(json!({"id": 1, "token": "t"})),
            None,
        )
        .unwrap();
        assert_eq!(status, 200);
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"success":true,"message":"Inicio de sesión exitoso","data":{"id":1,"token":"t"}}"#
        );
    }

    #[test]
    fn test_details_included_when_supplied() {
        let (_, envelope) = Envelope::for_category(
            MessageCategory::ScheduleInvalidData,
            None,
            Some("endTime must be after startTime".to_string()),
        )
        .unwrap();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["details"], "endTime must be after startTime");
        assert!(value.get("data").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_success_flag_tracks_status_for_every_category() {
        for category in MessageCategory::ALL {
            let (status, envelope) = Envelope::for_category(*category, None, None).unwrap();
            assert_eq!(envelope.success, status < 400, "{category}");
            assert_eq!(envelope.message.is_some(), envelope.success);
            assert_eq!(envelope.error.is_some(), !envelope.success);
        }
    }

    #[test]
    fn test_empty_array_data_is_kept() {
        let (_, envelope) =
            Envelope::for_category(MessageCategory::UserListRetrieved, Some(json!([])), None)
                .unwrap();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["data"], json!([]));
    }
}
