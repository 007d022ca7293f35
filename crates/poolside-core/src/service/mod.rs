//! Business logic services (use cases).
//!
//! Services validate request shapes, orchestrate repository calls and apply
//! the booking rules. They depend on traits (ports) -- never on concrete
//! infrastructure implementations.

pub mod auth;
pub mod password;
pub mod reservation;
pub mod schedule;
pub mod token;
pub mod user;

/// Parse a numeric path segment. Anything but a positive integer is rejected.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("4.5"), None);
        assert_eq!(parse_id(""), None);
    }
}
