//! Message categories: the unique keys of the message registry.
//!
//! A category names one canned response (`AUTH_LOGIN`,
//! `RESERVATION_NO_CAPACITY`, ...). Keys are unique across the whole
//! registry, so a category alone determines its HTTP status code and text.
//! The domain prefix (`AUTH_`, `USER_`, `SCHEDULE_`, `RESERVATION_`, `APP_`)
//! is a naming convention only.

use serde::{Serialize, Serializer};

use std::fmt;
use std::str::FromStr;

/// One canned response of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCategory {
    AuthLogin,
    AuthProfileRetrieved,
    AuthProfileUpdated,
    AuthRegister,
    AuthMissingCredentials,
    AuthMissingRegisterData,
    AuthEmailAlreadyExists,
    AuthMissingCurrentPassword,
    AuthNotAuthenticated,
    AuthNotAuthorized,
    AuthTokenInvalid,
    AuthInvalidCredentials,
    AuthAccountDisabled,
    AuthWrongCurrentPassword,
    AuthInsufficientPermissions,
    AuthUserNotFound,
    AuthRegisterError,
    AuthLoginError,
    AuthProfileError,
    AuthUpdateError,

    AppWelcome,
    AppInvalidBody,
    AppRouteNotFound,
    AppInternalError,

    UserListRetrieved,
    UserRetrieved,
    UserCreated,
    UserMissingRequiredFields,
    UserEmailAlreadyExists,
    UserInvalidId,
    UserNotFound,
    UserFetchError,
    UserCreateError,

    ScheduleListRetrieved,
    ScheduleRetrieved,
    ScheduleUpdated,
    ScheduleDeleted,
    ScheduleDeactivated,
    ScheduleAvailabilityRetrieved,
    ScheduleCreated,
    ScheduleMissingRequiredFields,
    ScheduleInvalidData,
    ScheduleInvalidId,
    ScheduleMissingAvailabilityParams,
    ScheduleNotFound,
    ScheduleFetchError,
    ScheduleCreateError,
    ScheduleUpdateError,
    ScheduleDeleteError,
    ScheduleAvailabilityError,

    ReservationListRetrieved,
    ReservationRetrieved,
    ReservationCancelled,
    ReservationPaymentConfirmed,
    ReservationCompleted,
    ReservationCreated,
    ReservationMissingData,
    ReservationInvalidId,
    ReservationInvalidDate,
    ReservationInvalidStatus,
    ReservationScheduleUnavailable,
    ReservationNoCapacity,
    ReservationAlreadyExists,
    ReservationAlreadyCompleted,
    ReservationMissingPaymentData,
    ReservationPaymentCancelled,
    ReservationCompleteCancelled,
    ReservationViewForbidden,
    ReservationCancelForbidden,
    ReservationNotFound,
    ReservationFetchError,
    ReservationCreateError,
    ReservationCancelError,
    ReservationPaymentError,
    ReservationCompleteError,
}

impl MessageCategory {
    /// Every category, in declaration order.
    pub const ALL: &'static [MessageCategory] = &[
        MessageCategory::AuthLogin,
        MessageCategory::AuthProfileRetrieved,
        MessageCategory::AuthProfileUpdated,
        MessageCategory::AuthRegister,
        MessageCategory::AuthMissingCredentials,
        MessageCategory::AuthMissingRegisterData,
        MessageCategory::AuthEmailAlreadyExists,
        MessageCategory::AuthMissingCurrentPassword,
        MessageCategory::AuthNotAuthenticated,
        MessageCategory::AuthNotAuthorized,
        MessageCategory::AuthTokenInvalid,
        MessageCategory::AuthInvalidCredentials,
        MessageCategory::AuthAccountDisabled,
        MessageCategory::AuthWrongCurrentPassword,
        MessageCategory::AuthInsufficientPermissions,
        MessageCategory::AuthUserNotFound,
        MessageCategory::AuthRegisterError,
        MessageCategory::AuthLoginError,
        MessageCategory::AuthProfileError,
        MessageCategory::AuthUpdateError,
        MessageCategory::AppWelcome,
        MessageCategory::AppInvalidBody,
        MessageCategory::AppRouteNotFound,
        MessageCategory::AppInternalError,
        MessageCategory::UserListRetrieved,
        MessageCategory::UserRetrieved,
        MessageCategory::UserCreated,
        MessageCategory::UserMissingRequiredFields,
        MessageCategory::UserEmailAlreadyExists,
        MessageCategory::UserInvalidId,
        MessageCategory::UserNotFound,
        MessageCategory::UserFetchError,
        MessageCategory::UserCreateError,
        MessageCategory::ScheduleListRetrieved,
        MessageCategory::ScheduleRetrieved,
        MessageCategory::ScheduleUpdated,
        MessageCategory::ScheduleDeleted,
        MessageCategory::ScheduleDeactivated,
        MessageCategory::ScheduleAvailabilityRetrieved,
        MessageCategory::ScheduleCreated,
        MessageCategory::ScheduleMissingRequiredFields,
        MessageCategory::ScheduleInvalidData,
        MessageCategory::ScheduleInvalidId,
        MessageCategory::ScheduleMissingAvailabilityParams,
        MessageCategory::ScheduleNotFound,
        MessageCategory::ScheduleFetchError,
        MessageCategory::ScheduleCreateError,
        MessageCategory::ScheduleUpdateError,
        MessageCategory::ScheduleDeleteError,
        MessageCategory::ScheduleAvailabilityError,
        MessageCategory::ReservationListRetrieved,
        MessageCategory::ReservationRetrieved,
        MessageCategory::ReservationCancelled,
        MessageCategory::ReservationPaymentConfirmed,
        MessageCategory::ReservationCompleted,
        MessageCategory::ReservationCreated,
        MessageCategory::ReservationMissingData,
        MessageCategory::ReservationInvalidId,
        MessageCategory::ReservationInvalidDate,
        MessageCategory::ReservationInvalidStatus,
        MessageCategory::ReservationScheduleUnavailable,
        MessageCategory::ReservationNoCapacity,
        MessageCategory::ReservationAlreadyExists,
        MessageCategory::ReservationAlreadyCompleted,
        MessageCategory::ReservationMissingPaymentData,
        MessageCategory::ReservationPaymentCancelled,
        MessageCategory::ReservationCompleteCancelled,
        MessageCategory::ReservationViewForbidden,
        MessageCategory::ReservationCancelForbidden,
        MessageCategory::ReservationNotFound,
        MessageCategory::ReservationFetchError,
        MessageCategory::ReservationCreateError,
        MessageCategory::ReservationCancelError,
        MessageCategory::ReservationPaymentError,
        MessageCategory::ReservationCompleteError,
    ];

    /// The registry key, e.g. `"AUTH_LOGIN"`.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageCategory::AuthLogin => "AUTH_LOGIN",
            MessageCategory::AuthProfileRetrieved => "AUTH_PROFILE_RETRIEVED",
            MessageCategory::AuthProfileUpdated => "AUTH_PROFILE_UPDATED",
            MessageCategory::AuthRegister => "AUTH_REGISTER",
            MessageCategory::AuthMissingCredentials => "AUTH_MISSING_CREDENTIALS",
            MessageCategory::AuthMissingRegisterData => "AUTH_MISSING_REGISTER_DATA",
            MessageCategory::AuthEmailAlreadyExists => "AUTH_EMAIL_ALREADY_EXISTS",
            MessageCategory::AuthMissingCurrentPassword => "AUTH_MISSING_CURRENT_PASSWORD",
            MessageCategory::AuthNotAuthenticated => "AUTH_NOT_AUTHENTICATED",
            MessageCategory::AuthNotAuthorized => "AUTH_NOT_AUTHORIZED",
            MessageCategory::AuthTokenInvalid => "AUTH_TOKEN_INVALID",
            MessageCategory::AuthInvalidCredentials => "AUTH_INVALID_CREDENTIALS",
            MessageCategory::AuthAccountDisabled => "AUTH_ACCOUNT_DISABLED",
            MessageCategory::AuthWrongCurrentPassword => "AUTH_WRONG_CURRENT_PASSWORD",
            MessageCategory::AuthInsufficientPermissions => "AUTH_INSUFFICIENT_PERMISSIONS",
            MessageCategory::AuthUserNotFound => "AUTH_USER_NOT_FOUND",
            MessageCategory::AuthRegisterError => "AUTH_REGISTER_ERROR",
            MessageCategory::AuthLoginError => "AUTH_LOGIN_ERROR",
            MessageCategory::AuthProfileError => "AUTH_PROFILE_ERROR",
            MessageCategory::AuthUpdateError => "AUTH_UPDATE_ERROR",
            MessageCategory::AppWelcome => "APP_WELCOME",
            MessageCategory::AppInvalidBody => "APP_INVALID_BODY",
            MessageCategory::AppRouteNotFound => "APP_ROUTE_NOT_FOUND",
            MessageCategory::AppInternalError => "APP_INTERNAL_ERROR",
            MessageCategory::UserListRetrieved => "USER_LIST_RETRIEVED",
            MessageCategory::UserRetrieved => "USER_RETRIEVED",
            MessageCategory::UserCreated => "USER_CREATED",
            MessageCategory::UserMissingRequiredFields => "USER_MISSING_REQUIRED_FIELDS",
            MessageCategory::UserEmailAlreadyExists => "USER_EMAIL_ALREADY_EXISTS",
            MessageCategory::UserInvalidId => "USER_INVALID_ID",
            MessageCategory::UserNotFound => "USER_NOT_FOUND",
            MessageCategory::UserFetchError => "USER_FETCH_ERROR",
            MessageCategory::UserCreateError => "USER_CREATE_ERROR",
            MessageCategory::ScheduleListRetrieved => "SCHEDULE_LIST_RETRIEVED",
            MessageCategory::ScheduleRetrieved => "SCHEDULE_RETRIEVED",
            MessageCategory::ScheduleUpdated => "SCHEDULE_UPDATED",
            MessageCategory::ScheduleDeleted => "SCHEDULE_DELETED",
            MessageCategory::ScheduleDeactivated => "SCHEDULE_DEACTIVATED",
            MessageCategory::ScheduleAvailabilityRetrieved => "SCHEDULE_AVAILABILITY_RETRIEVED",
            MessageCategory::ScheduleCreated => "SCHEDULE_CREATED",
            MessageCategory::ScheduleMissingRequiredFields => "SCHEDULE_MISSING_REQUIRED_FIELDS",
            MessageCategory::ScheduleInvalidData => "SCHEDULE_INVALID_DATA",
            MessageCategory::ScheduleInvalidId => "SCHEDULE_INVALID_ID",
            MessageCategory::ScheduleMissingAvailabilityParams => "SCHEDULE_MISSING_AVAILABILITY_PARAMS",
            MessageCategory::ScheduleNotFound => "SCHEDULE_NOT_FOUND",
            MessageCategory::ScheduleFetchError => "SCHEDULE_FETCH_ERROR",
            MessageCategory::ScheduleCreateError => "SCHEDULE_CREATE_ERROR",
            MessageCategory::ScheduleUpdateError => "SCHEDULE_UPDATE_ERROR",
            MessageCategory::ScheduleDeleteError => "SCHEDULE_DELETE_ERROR",
            MessageCategory::ScheduleAvailabilityError => "SCHEDULE_AVAILABILITY_ERROR",
            MessageCategory::ReservationListRetrieved => "RESERVATION_LIST_RETRIEVED",
            MessageCategory::ReservationRetrieved => "RESERVATION_RETRIEVED",
            MessageCategory::ReservationCancelled => "RESERVATION_CANCELLED",
            MessageCategory::ReservationPaymentConfirmed => "RESERVATION_PAYMENT_CONFIRMED",
            MessageCategory::ReservationCompleted => "RESERVATION_COMPLETED",
            MessageCategory::ReservationCreated => "RESERVATION_CREATED",
            MessageCategory::ReservationMissingData => "RESERVATION_MISSING_DATA",
            MessageCategory::ReservationInvalidId => "RESERVATION_INVALID_ID",
            MessageCategory::ReservationInvalidDate => "RESERVATION_INVALID_DATE",
            MessageCategory::ReservationInvalidStatus => "RESERVATION_INVALID_STATUS",
            MessageCategory::ReservationScheduleUnavailable => "RESERVATION_SCHEDULE_UNAVAILABLE",
            MessageCategory::ReservationNoCapacity => "RESERVATION_NO_CAPACITY",
            MessageCategory::ReservationAlreadyExists => "RESERVATION_ALREADY_EXISTS",
            MessageCategory::ReservationAlreadyCompleted => "RESERVATION_ALREADY_COMPLETED",
            MessageCategory::ReservationMissingPaymentData => "RESERVATION_MISSING_PAYMENT_DATA",
            MessageCategory::ReservationPaymentCancelled => "RESERVATION_PAYMENT_CANCELLED",
            MessageCategory::ReservationCompleteCancelled => "RESERVATION_COMPLETE_CANCELLED",
            MessageCategory::ReservationViewForbidden => "RESERVATION_VIEW_FORBIDDEN",
            MessageCategory::ReservationCancelForbidden => "RESERVATION_CANCEL_FORBIDDEN",
            MessageCategory::ReservationNotFound => "RESERVATION_NOT_FOUND",
            MessageCategory::ReservationFetchError => "RESERVATION_FETCH_ERROR",
            MessageCategory::ReservationCreateError => "RESERVATION_CREATE_ERROR",
            MessageCategory::ReservationCancelError => "RESERVATION_CANCEL_ERROR",
            MessageCategory::ReservationPaymentError => "RESERVATION_PAYMENT_ERROR",
            MessageCategory::ReservationCompleteError => "RESERVATION_COMPLETE_ERROR",
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown message category: '{s}'"))
    }
}

impl Serialize for MessageCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<&str> = MessageCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(keys.len(), MessageCategory::ALL.len());
    }

    #[test]
    fn test_key_round_trip() {
        for category in MessageCategory::ALL {
            let parsed: MessageCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, *category);
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!("AUTH_LOGOUT".parse::<MessageCategory>().is_err());
        assert!("auth_login".parse::<MessageCategory>().is_err());
    }

    #[test]
    fn test_keys_carry_a_domain_prefix() {
        let prefixes = ["AUTH_", "USER_", "SCHEDULE_", "RESERVATION_", "APP_"];
        for category in MessageCategory::ALL {
            let key = category.as_str();
            assert!(
                prefixes.iter().any(|p| key.starts_with(p)),
                "{key} has no known domain prefix"
            );
        }
    }

    #[test]
    fn test_serializes_as_key() {
        let json = serde_json::to_string(&MessageCategory::AuthLogin).unwrap();
        assert_eq!(json, "\"AUTH_LOGIN\"");
    }
}
