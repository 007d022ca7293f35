use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::schedule::Schedule;
use crate::user::UserSummary;

/// Reservation lifecycle.
///
/// - Pending: booked, not yet paid
/// - Confirmed: payment registered by staff
/// - Cancelled: released; no longer counts against capacity
/// - Completed: the swim took place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservationStatus::Pending => write!(f, "PENDING"),
            ReservationStatus::Confirmed => write!(f, "CONFIRMED"),
            ReservationStatus::Cancelled => write!(f, "CANCELLED"),
            ReservationStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(ReservationStatus::Pending),
            "CONFIRMED" => Ok(ReservationStatus::Confirmed),
            "CANCELLED" => Ok(ReservationStatus::Cancelled),
            "COMPLETED" => Ok(ReservationStatus::Completed),
            other => Err(format!("invalid reservation status: '{other}'")),
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

/// One user's booking of one schedule on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub schedule_id: i64,
    pub date: NaiveDate,
    pub status: ReservationStatus,
    pub is_paid: bool,
    pub payment_date: Option<DateTime<Utc>>,
    /// Staff member who confirmed the payment.
    pub payment_confirmed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ledger entry written when staff confirm a payment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: i64,
    pub reservation_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub confirmed_by_id: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// A reservation with its related rows, as returned by listing and detail views.
///
/// Relations that were not loaded (or that the caller may not see) are omitted
/// from the JSON entirely.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetail {
    #[serde(flatten)]
    pub reservation: Reservation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_records: Option<Vec<PaymentRecord>>,
}

/// Insert shape for a new reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: i64,
    pub schedule_id: i64,
    pub date: NaiveDate,
}

/// Insert shape for a payment ledger entry.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub amount: f64,
    pub payment_method: String,
    pub confirmed_by_id: i64,
    pub notes: String,
}

/// Result of an atomic capacity-checked booking attempt.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(ReservationDetail),
    /// Non-cancelled bookings already reach the schedule's capacity.
    Full,
    /// The user already holds a non-cancelled booking for that slot.
    Duplicate,
}

/// Filter criteria for listing reservations.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub date: Option<NaiveDate>,
    pub user_id: Option<i64>,
}

/// Query string of `GET /api/reservations` (staff listing).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListQuery {
    pub status: Option<String>,
    pub date: Option<String>,
    pub user_id: Option<String>,
}

/// Query string of `GET /api/reservations/my-reservations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MyReservationsQuery {
    pub status: Option<String>,
}

/// Body of `POST /api/reservations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub schedule_id: Option<i64>,
    pub date: Option<String>,
}

/// Body of `PUT /api/reservations/{id}/confirm-payment`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_reservation() -> Reservation {
        let now = Utc::now();
        Reservation {
            id: 3,
            user_id: 9,
            schedule_id: 2,
            date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
            status: ReservationStatus::Pending,
            is_paid: false,
            payment_date: None,
            payment_confirmed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
        ] {
            let parsed: ReservationStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("expired".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_detail_omits_unloaded_relations() {
        let detail = ReservationDetail {
            reservation: make_reservation(),
            user: None,
            schedule: None,
            payment_records: None,
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["status"], "PENDING");
        assert_eq!(json["date"], "2025-05-02");
        assert!(json.get("user").is_none());
        assert!(json.get("schedule").is_none());
        assert!(json.get("paymentRecords").is_none());
    }

    #[test]
    fn test_detail_includes_loaded_relations() {
        let detail = ReservationDetail {
            reservation: make_reservation(),
            user: Some(UserSummary {
                id: 9,
                name: "Ana".to_string(),
                email: "ana@piscina.cl".to_string(),
                phone: None,
            }),
            schedule: None,
            payment_records: Some(Vec::new()),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["user"]["name"], "Ana");
        assert_eq!(json["paymentRecords"], serde_json::json!([]));
    }
}
