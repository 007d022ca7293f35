//! Roles, token claims and authentication request shapes.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::user::User;

/// Access role attached to every user account.
///
/// - User: books and cancels their own reservations
/// - Treasurer: additionally sees all reservations and confirms payments
/// - Admin: everything, including schedule and user management
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
    Treasurer,
}

impl Role {
    /// Staff roles may act on reservations that belong to other users.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Treasurer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
            Role::Treasurer => write!(f, "TREASURER"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            "TREASURER" => Ok(Role::Treasurer),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// The small claims record carried inside a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthClaims {
    /// Claims describing the given user.
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }

    /// Whether the role is on the given allow-list.
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.role)
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of `PUT /api/auth/profile`.
///
/// Changing the password requires `current_password` alongside `new_password`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// A user together with a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// Treat absent and blank strings alike, the way form fields arrive.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Admin, Role::Treasurer] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
        assert_eq!("treasurer".parse::<Role>().unwrap(), Role::Treasurer);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"TREASURER\"").unwrap();
        assert_eq!(role, Role::Treasurer);
    }

    #[test]
    fn test_staff_roles() {
        assert!(!Role::User.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(Role::Treasurer.is_staff());
    }

    #[test]
    fn test_has_role() {
        let claims = AuthClaims {
            id: 1,
            email: "a@b.cl".to_string(),
            role: Role::Treasurer,
        };
        assert!(claims.has_role(&[Role::Admin, Role::Treasurer]));
        assert!(!claims.has_role(&[Role::Admin]));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" x ")), Some("x"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@b.cl","password":"x","name":"Ana"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.cl"));
        assert!(req.phone.is_none());

        let upd: UpdateProfileRequest =
            serde_json::from_str(r#"{"currentPassword":"a","newPassword":"b"}"#).unwrap();
        assert_eq!(upd.current_password.as_deref(), Some("a"));
        assert_eq!(upd.new_password.as_deref(), Some("b"));
    }
}
