//! Reservation handlers: booking, listing and the status lifecycle.

use axum::extract::{Path, State};
use axum::response::Response;

use poolside_core::message::MessageCategory;
use poolside_types::reservation::{
    ConfirmPaymentRequest, CreateReservationRequest, MyReservationsQuery, ReservationListQuery,
};

use crate::http::error::{AppError, ResultExt};
use crate::http::extractors::auth::{AdminOnly, AuthUser, Authorized, Staff};
use crate::http::extractors::json::ValidJson;
use crate::http::extractors::query::ValidQuery;
use crate::http::response::with_data;
use crate::state::AppState;

/// GET /api/reservations?status=&date=&userId= - Every reservation (staff).
pub async fn list_reservations(
    State(state): State<AppState>,
    _auth: Authorized<Staff>,
    ValidQuery(query): ValidQuery<ReservationListQuery>,
) -> Result<Response, AppError> {
    let reservations = state
        .reservation_service
        .list_all(query)
        .await
        .or_fail(MessageCategory::ReservationFetchError)?;

    Ok(with_data(MessageCategory::ReservationListRetrieved, &reservations))
}

/// GET /api/reservations/my-reservations?status=
pub async fn my_reservations(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidQuery(query): ValidQuery<MyReservationsQuery>,
) -> Result<Response, AppError> {
    let reservations = state
        .reservation_service
        .list_for_user(claims.id, query.status.as_deref())
        .await
        .or_fail(MessageCategory::ReservationFetchError)?;

    Ok(with_data(MessageCategory::ReservationListRetrieved, &reservations))
}

/// GET /api/reservations/{id} - Owner or staff; payments hidden from USER.
pub async fn get_reservation(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let reservation = state
        .reservation_service
        .get(&claims, &id)
        .await
        .or_fail(MessageCategory::ReservationFetchError)?;

    Ok(with_data(MessageCategory::ReservationRetrieved, &reservation))
}

/// POST /api/reservations - Book a schedule on a date for the caller.
pub async fn create_reservation(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    ValidJson(body): ValidJson<CreateReservationRequest>,
) -> Result<Response, AppError> {
    let reservation = state
        .reservation_service
        .create(&claims, body)
        .await
        .or_fail(MessageCategory::ReservationCreateError)?;

    Ok(with_data(MessageCategory::ReservationCreated, &reservation))
}

/// PUT /api/reservations/{id}/cancel - Owner or staff.
pub async fn cancel_reservation(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let reservation = state
        .reservation_service
        .cancel(&claims, &id)
        .await
        .or_fail(MessageCategory::ReservationCancelError)?;

    Ok(with_data(MessageCategory::ReservationCancelled, &reservation))
}

/// PUT /api/reservations/{id}/confirm-payment - Staff.
pub async fn confirm_payment(
    State(state): State<AppState>,
    auth: Authorized<Staff>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<ConfirmPaymentRequest>,
) -> Result<Response, AppError> {
    let reservation = state
        .reservation_service
        .confirm_payment(&auth.claims, &id, body)
        .await
        .or_fail(MessageCategory::ReservationPaymentError)?;

    Ok(with_data(
        MessageCategory::ReservationPaymentConfirmed,
        &reservation,
    ))
}

/// PUT /api/reservations/{id}/complete - Admin.
pub async fn complete_reservation(
    State(state): State<AppState>,
    _auth: Authorized<AdminOnly>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let reservation = state
        .reservation_service
        .complete(&id)
        .await
        .or_fail(MessageCategory::ReservationCompleteError)?;

    Ok(with_data(MessageCategory::ReservationCompleted, &reservation))
}
