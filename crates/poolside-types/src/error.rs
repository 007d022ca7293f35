use thiserror::Error;

/// Errors from authentication and profile operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("email, password and name are required")]
    MissingRegisterData,

    #[error("email already registered")]
    EmailAlreadyExists,

    #[error("current password is required to set a new one")]
    MissingCurrentPassword,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account disabled")]
    AccountDisabled,

    #[error("current password does not match")]
    WrongCurrentPassword,

    #[error("user not found")]
    UserNotFound,

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("credential hashing failed: {0}")]
    HashingError(String),

    #[error("token error: {0}")]
    Token(#[from] TokenError),
}

/// Errors from administrative user management.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("email, password and name are required")]
    MissingRequiredFields,

    #[error("email already registered")]
    EmailAlreadyExists,

    #[error("invalid user id: '{0}'")]
    InvalidId(String),

    #[error("user not found")]
    NotFound,

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("credential hashing failed: {0}")]
    HashingError(String),
}

/// Errors from schedule management and availability queries.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("day of week, start time, end time, capacity and lane count are required")]
    MissingRequiredFields,

    #[error("invalid schedule data: {0}")]
    InvalidData(String),

    #[error("invalid schedule id: '{0}'")]
    InvalidId(String),

    #[error("schedule id and date are required")]
    MissingAvailabilityParams,

    #[error("schedule not found")]
    NotFound,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from reservation booking and its lifecycle.
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error("schedule id and date are required")]
    MissingData,

    #[error("invalid reservation id: '{0}'")]
    InvalidId(String),

    #[error("invalid date: '{0}'")]
    InvalidDate(String),

    #[error("invalid reservation status: '{0}'")]
    InvalidStatus(String),

    #[error("reservation not found")]
    NotFound,

    #[error("schedule not found")]
    ScheduleNotFound,

    #[error("schedule is not active")]
    ScheduleUnavailable,

    #[error("no capacity left for that date")]
    NoCapacity,

    #[error("user already holds a reservation for that slot")]
    AlreadyReserved,

    #[error("not allowed to view this reservation")]
    ViewForbidden,

    #[error("not allowed to cancel this reservation")]
    CancelForbidden,

    #[error("reservation already completed")]
    AlreadyCompleted,

    #[error("amount and payment method are required")]
    MissingPaymentData,

    #[error("cannot confirm payment of a cancelled reservation")]
    PaymentOnCancelled,

    #[error("cannot complete a cancelled reservation")]
    CompleteCancelled,

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from issuing or verifying bearer tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token could not be issued: {0}")]
    Issue(String),

    #[error("token expired")]
    Expired,

    #[error("token invalid: {0}")]
    Invalid(String),
}

/// Errors from repository operations (used by trait definitions in poolside-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}
