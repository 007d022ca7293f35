use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::reservation::Reservation;

/// A registered pool user.
///
/// The stored credential record is never serialized; every JSON view of a
/// user leaves it out.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    /// Disabled accounts cannot log in.
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact fields of a user, embedded in reservation listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// A user together with all of their reservations (admin detail view).
#[derive(Debug, Clone, Serialize)]
pub struct UserWithReservations {
    #[serde(flatten)]
    pub user: User,
    pub reservations: Vec<Reservation>,
}

/// Insert shape for a new user row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password_hash: String,
}

/// Partial update of a user row. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}

/// Body of `POST /api/users` (admin-created accounts).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_user() -> User {
        let now = Utc::now();
        User {
            id: 7,
            email: "ana@piscina.cl".to_string(),
            name: "Ana".to_string(),
            phone: None,
            role: Role::User,
            is_active: true,
            password_hash: "100000$64$aa$bb".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_user_json_omits_password_hash() {
        let json = serde_json::to_value(make_user()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["isActive"], true);
        assert_eq!(json["role"], "USER");
    }

    #[test]
    fn test_user_summary_from_user() {
        let user = make_user();
        let summary = UserSummary::from(&user);
        assert_eq!(summary.id, 7);
        assert_eq!(summary.email, "ana@piscina.cl");
    }

    #[test]
    fn test_user_changes_is_empty() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            name: Some("Bea".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
