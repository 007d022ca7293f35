//! Mapping from domain errors to message categories.
//!
//! Expected failures (validation, conflicts, missing rows, permissions) have
//! a fixed 4xx category. Unexpected ones (storage, hashing, token signing)
//! return `None`; the caller answers with the 500 category of whatever
//! operation it was performing and logs the cause.

use poolside_types::error::{AuthError, ReservationError, ScheduleError, TokenError, UserError};

use super::category::MessageCategory;

/// A domain error that may correspond to a client-facing category.
pub trait Categorized {
    /// The category to answer with, or `None` for an internal failure.
    fn category(&self) -> Option<MessageCategory>;

    /// Client-safe text sent as the envelope's `details`.
    ///
    /// Only validation failures carry it; it names the offending input.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Categorized for AuthError {
    fn category(&self) -> Option<MessageCategory> {
        use MessageCategory as M;
        match self {
            AuthError::MissingCredentials => Some(M::AuthMissingCredentials),
            AuthError::MissingRegisterData => Some(M::AuthMissingRegisterData),
            AuthError::EmailAlreadyExists => Some(M::AuthEmailAlreadyExists),
            AuthError::MissingCurrentPassword => Some(M::AuthMissingCurrentPassword),
            AuthError::InvalidCredentials => Some(M::AuthInvalidCredentials),
            AuthError::AccountDisabled => Some(M::AuthAccountDisabled),
            AuthError::WrongCurrentPassword => Some(M::AuthWrongCurrentPassword),
            AuthError::UserNotFound => Some(M::AuthUserNotFound),
            AuthError::StorageError(_) | AuthError::HashingError(_) | AuthError::Token(_) => None,
        }
    }
}

impl Categorized for UserError {
    fn category(&self) -> Option<MessageCategory> {
        use MessageCategory as M;
        match self {
            UserError::MissingRequiredFields => Some(M::UserMissingRequiredFields),
            UserError::EmailAlreadyExists => Some(M::UserEmailAlreadyExists),
            UserError::InvalidId(_) => Some(M::UserInvalidId),
            UserError::NotFound => Some(M::UserNotFound),
            UserError::StorageError(_) | UserError::HashingError(_) => None,
        }
    }
}

impl Categorized for ScheduleError {
    fn category(&self) -> Option<MessageCategory> {
        use MessageCategory as M;
        match self {
            ScheduleError::MissingRequiredFields => Some(M::ScheduleMissingRequiredFields),
            ScheduleError::InvalidData(_) => Some(M::ScheduleInvalidData),
            ScheduleError::InvalidId(_) => Some(M::ScheduleInvalidId),
            ScheduleError::MissingAvailabilityParams => Some(M::ScheduleMissingAvailabilityParams),
            ScheduleError::NotFound => Some(M::ScheduleNotFound),
            ScheduleError::StorageError(_) => None,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ScheduleError::InvalidData(reason) => Some(reason.clone()),
            _ => None,
        }
    }
}

impl Categorized for ReservationError {
    fn category(&self) -> Option<MessageCategory> {
        use MessageCategory as M;
        match self {
            ReservationError::MissingData => Some(M::ReservationMissingData),
            ReservationError::InvalidId(_) => Some(M::ReservationInvalidId),
            ReservationError::InvalidDate(_) => Some(M::ReservationInvalidDate),
            ReservationError::InvalidStatus(_) => Some(M::ReservationInvalidStatus),
            ReservationError::NotFound => Some(M::ReservationNotFound),
            ReservationError::ScheduleNotFound => Some(M::ScheduleNotFound),
            ReservationError::ScheduleUnavailable => Some(M::ReservationScheduleUnavailable),
            ReservationError::NoCapacity => Some(M::ReservationNoCapacity),
            ReservationError::AlreadyReserved => Some(M::ReservationAlreadyExists),
            ReservationError::ViewForbidden => Some(M::ReservationViewForbidden),
            ReservationError::CancelForbidden => Some(M::ReservationCancelForbidden),
            ReservationError::AlreadyCompleted => Some(M::ReservationAlreadyCompleted),
            ReservationError::MissingPaymentData => Some(M::ReservationMissingPaymentData),
            ReservationError::PaymentOnCancelled => Some(M::ReservationPaymentCancelled),
            ReservationError::CompleteCancelled => Some(M::ReservationCompleteCancelled),
            ReservationError::StorageError(_) => None,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ReservationError::InvalidDate(raw) => Some(format!("invalid date '{raw}'")),
            ReservationError::InvalidStatus(raw) => Some(format!("unknown status '{raw}'")),
            _ => None,
        }
    }
}

/// Token failures seen while authenticating a request are always the
/// client's problem: the token is missing its signature, tampered, or stale.
impl Categorized for TokenError {
    fn category(&self) -> Option<MessageCategory> {
        match self {
            TokenError::Expired | TokenError::Invalid(_) => Some(MessageCategory::AuthTokenInvalid),
            TokenError::Issue(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::registry::resolve;

    #[test]
    fn test_expected_errors_are_client_errors() {
        let categories = [
            AuthError::InvalidCredentials.category(),
            UserError::InvalidId("x".to_string()).category(),
            ScheduleError::NotFound.category(),
            ReservationError::NoCapacity.category(),
            ReservationError::CancelForbidden.category(),
            TokenError::Expired.category(),
        ];
        for category in categories {
            let status = resolve(category.unwrap()).unwrap().status;
            assert!((400..500).contains(&status), "{status}");
        }
    }

    #[test]
    fn test_internal_errors_have_no_category() {
        assert!(AuthError::StorageError("disk".to_string()).category().is_none());
        assert!(AuthError::HashingError("join".to_string()).category().is_none());
        assert!(UserError::StorageError("disk".to_string()).category().is_none());
        assert!(ScheduleError::StorageError("disk".to_string()).category().is_none());
        assert!(ReservationError::StorageError("disk".to_string()).category().is_none());
        assert!(TokenError::Issue("key".to_string()).category().is_none());
    }

    #[test]
    fn test_validation_errors_name_the_input() {
        let err = ScheduleError::InvalidData("invalid time '25:99', expected HH:MM".to_string());
        assert_eq!(err.details().as_deref(), Some("invalid time '25:99', expected HH:MM"));

        let err = ReservationError::InvalidDate("2024-13-01".to_string());
        assert_eq!(err.details().as_deref(), Some("invalid date '2024-13-01'"));
        assert_eq!(
            ReservationError::InvalidStatus("LATE".to_string()).details().as_deref(),
            Some("unknown status 'LATE'")
        );
    }

    #[test]
    fn test_other_errors_have_no_details() {
        assert!(ScheduleError::NotFound.details().is_none());
        assert!(ScheduleError::StorageError("disk".to_string()).details().is_none());
        assert!(ReservationError::StorageError("disk".to_string()).details().is_none());
        assert!(AuthError::InvalidCredentials.details().is_none());
        assert!(TokenError::Expired.details().is_none());
    }

    #[test]
    fn test_reservation_on_missing_schedule_uses_schedule_category() {
        assert_eq!(
            ReservationError::ScheduleNotFound.category(),
            Some(MessageCategory::ScheduleNotFound)
        );
    }
}
