//! Reservation booking, cancellation, payment and completion.
//!
//! Ownership rules: a `USER` only ever sees and cancels their own bookings and
//! never sees the payment ledger. Staff (`ADMIN`, `TREASURER`) act on any
//! booking. Role gates on whole routes are enforced by the HTTP layer; the
//! per-reservation checks live here because they need the row.

use poolside_types::auth::{AuthClaims, Role, non_blank};
use poolside_types::error::{RepositoryError, ReservationError};
use poolside_types::reservation::{
    BookingOutcome, ConfirmPaymentRequest, CreateReservationRequest, NewPayment, NewReservation,
    Reservation, ReservationDetail, ReservationFilter, ReservationListQuery, ReservationStatus,
};
use poolside_types::schedule::parse_calendar_date;

use crate::repository::reservation::ReservationRepository;
use crate::repository::schedule::ScheduleRepository;
use crate::service::parse_id;

pub struct ReservationService<R: ReservationRepository, S: ScheduleRepository> {
    reservations: R,
    schedules: S,
}

impl<R, S> ReservationService<R, S>
where
    R: ReservationRepository,
    S: ScheduleRepository,
{
    pub fn new(reservations: R, schedules: S) -> Self {
        Self {
            reservations,
            schedules,
        }
    }

    /// Staff listing with optional status, date and user filters.
    pub async fn list_all(
        &self,
        query: ReservationListQuery,
    ) -> Result<Vec<ReservationDetail>, ReservationError> {
        let filter = ReservationFilter {
            status: parse_status(query.status.as_deref())?,
            date: present(query.date.as_deref())
                .map(|raw| {
                    parse_calendar_date(raw)
                        .ok_or_else(|| ReservationError::InvalidDate(raw.to_string()))
                })
                .transpose()?,
            user_id: present(query.user_id.as_deref())
                .map(|raw| parse_id(raw).ok_or_else(|| ReservationError::InvalidId(raw.to_string())))
                .transpose()?,
        };

        self.reservations.list(&filter).await.map_err(storage)
    }

    /// The caller's own reservations, optionally narrowed to one status.
    pub async fn list_for_user(
        &self,
        user_id: i64,
        status: Option<&str>,
    ) -> Result<Vec<ReservationDetail>, ReservationError> {
        let status = parse_status(status)?;
        self.reservations
            .list_for_user(user_id, status)
            .await
            .map_err(storage)
    }

    /// One reservation with its relations. Payment records are hidden from `USER` callers.
    pub async fn get(
        &self,
        caller: &AuthClaims,
        raw_id: &str,
    ) -> Result<ReservationDetail, ReservationError> {
        let id = parse_reservation_id(raw_id)?;
        let mut detail = self
            .reservations
            .get_detail(id)
            .await
            .map_err(storage)?
            .ok_or(ReservationError::NotFound)?;

        if !caller.role.is_staff() {
            if detail.reservation.user_id != caller.id {
                return Err(ReservationError::ViewForbidden);
            }
            detail.payment_records = None;
        }

        Ok(detail)
    }

    /// Book an active schedule on a date for the caller.
    pub async fn create(
        &self,
        caller: &AuthClaims,
        request: CreateReservationRequest,
    ) -> Result<ReservationDetail, ReservationError> {
        let (Some(schedule_id), Some(raw_date)) =
            (request.schedule_id, present(request.date.as_deref()))
        else {
            return Err(ReservationError::MissingData);
        };

        let date = parse_calendar_date(raw_date)
            .ok_or_else(|| ReservationError::InvalidDate(raw_date.to_string()))?;

        let schedule = self
            .schedules
            .get_by_id(schedule_id)
            .await
            .map_err(storage)?
            .ok_or(ReservationError::ScheduleNotFound)?;

        if !schedule.is_active {
            return Err(ReservationError::ScheduleUnavailable);
        }

        let new_reservation = NewReservation {
            user_id: caller.id,
            schedule_id,
            date,
        };

        match self
            .reservations
            .book(&new_reservation, schedule.max_capacity)
            .await
            .map_err(storage)?
        {
            BookingOutcome::Created(detail) => {
                tracing::info!(
                    reservation_id = detail.reservation.id,
                    user_id = caller.id,
                    schedule_id,
                    %date,
                    "reservation created"
                );
                Ok(detail)
            }
            BookingOutcome::Full => Err(ReservationError::NoCapacity),
            BookingOutcome::Duplicate => Err(ReservationError::AlreadyReserved),
        }
    }

    /// Cancel a booking. Owners may cancel their own; staff may cancel any.
    ///
    /// Cancelling an already cancelled booking succeeds and changes nothing
    /// but `updated_at`.
    pub async fn cancel(
        &self,
        caller: &AuthClaims,
        raw_id: &str,
    ) -> Result<ReservationDetail, ReservationError> {
        let id = parse_reservation_id(raw_id)?;
        let reservation = self.find(id).await?;

        if caller.role == Role::User && reservation.user_id != caller.id {
            return Err(ReservationError::CancelForbidden);
        }
        if reservation.status == ReservationStatus::Completed {
            return Err(ReservationError::AlreadyCompleted);
        }

        let detail = self.set_status(id, ReservationStatus::Cancelled).await?;
        tracing::info!(reservation_id = id, by = caller.id, "reservation cancelled");
        Ok(detail)
    }

    /// Record a payment and mark the booking paid.
    ///
    /// A pending or confirmed booking becomes `CONFIRMED`; a completed one
    /// stays `COMPLETED`.
    pub async fn confirm_payment(
        &self,
        caller: &AuthClaims,
        raw_id: &str,
        request: ConfirmPaymentRequest,
    ) -> Result<Reservation, ReservationError> {
        let id = parse_reservation_id(raw_id)?;

        let (Some(amount), Some(payment_method)) = (
            request.amount.filter(|a| a.is_finite() && *a > 0.0),
            non_blank(request.payment_method.as_deref()),
        ) else {
            return Err(ReservationError::MissingPaymentData);
        };

        let reservation = self.find(id).await?;
        let status = match reservation.status {
            ReservationStatus::Cancelled => return Err(ReservationError::PaymentOnCancelled),
            ReservationStatus::Completed => ReservationStatus::Completed,
            ReservationStatus::Pending | ReservationStatus::Confirmed => {
                ReservationStatus::Confirmed
            }
        };

        let payment = NewPayment {
            amount,
            payment_method: payment_method.to_string(),
            confirmed_by_id: caller.id,
            notes: request.notes.unwrap_or_default(),
        };

        let updated = self
            .reservations
            .confirm_payment(id, status, &payment)
            .await
            .map_err(not_found_or_storage)?;

        tracing::info!(reservation_id = id, by = caller.id, amount, "payment confirmed");
        Ok(updated)
    }

    /// Mark a booking as having taken place.
    pub async fn complete(&self, raw_id: &str) -> Result<ReservationDetail, ReservationError> {
        let id = parse_reservation_id(raw_id)?;
        let reservation = self.find(id).await?;

        if reservation.status == ReservationStatus::Cancelled {
            return Err(ReservationError::CompleteCancelled);
        }

        self.set_status(id, ReservationStatus::Completed).await
    }

    async fn find(&self, id: i64) -> Result<Reservation, ReservationError> {
        self.reservations
            .get_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(ReservationError::NotFound)
    }

    async fn set_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<ReservationDetail, ReservationError> {
        self.reservations
            .update_status(id, status)
            .await
            .map_err(not_found_or_storage)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_status(raw: Option<&str>) -> Result<Option<ReservationStatus>, ReservationError> {
    present(raw)
        .map(|raw| {
            raw.parse::<ReservationStatus>()
                .map_err(|_| ReservationError::InvalidStatus(raw.to_string()))
        })
        .transpose()
}

fn parse_reservation_id(raw: &str) -> Result<i64, ReservationError> {
    parse_id(raw).ok_or_else(|| ReservationError::InvalidId(raw.to_string()))
}

fn storage(e: RepositoryError) -> ReservationError {
    ReservationError::StorageError(e.to_string())
}

fn not_found_or_storage(e: RepositoryError) -> ReservationError {
    match e {
        RepositoryError::NotFound => ReservationError::NotFound,
        other => storage(other),
    }
}
