//! PBKDF2-HMAC-SHA512 credential records.
//!
//! Implements the `PasswordHasher` trait from `poolside-core`. A record is the
//! text `iterations$keyLength$saltHex$hashHex`; all parameters needed to verify
//! travel inside it, so records written with older parameters keep working
//! after the configured defaults change.
//!
//! The KDF salt input is the UTF-8 bytes of the salt's hex text, not the
//! decoded salt bytes. Records created by earlier deployments depend on this.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha512;

use poolside_core::service::password::PasswordHasher;
use poolside_types::config::PasswordSection;

/// Upper bound on iterations accepted from a stored record.
const MAX_ITERATIONS: u32 = 10_000_000;

/// Upper bound on derived key length (bytes) accepted from a stored record.
const MAX_KEY_LENGTH: usize = 1024;

const SEPARATOR: char = '$';

/// PBKDF2-HMAC-SHA512 implementation of `PasswordHasher`.
#[derive(Debug, Clone)]
pub struct Pbkdf2PasswordHasher {
    iterations: u32,
    key_length: usize,
    salt_length: usize,
}

impl Pbkdf2PasswordHasher {
    /// Hasher with the production parameters: 100 000 iterations, 64-byte key, 32-byte salt.
    pub fn new() -> Self {
        Self::from_config(&PasswordSection::default())
    }

    /// Hasher with explicit parameters for newly created records.
    ///
    /// Zero values are raised to 1 so every record stays verifiable.
    pub fn with_params(iterations: u32, key_length: usize, salt_length: usize) -> Self {
        Self {
            iterations: iterations.clamp(1, MAX_ITERATIONS),
            key_length: key_length.clamp(1, MAX_KEY_LENGTH),
            salt_length: salt_length.max(1),
        }
    }

    pub fn from_config(config: &PasswordSection) -> Self {
        Self::with_params(config.iterations, config.key_length, config.salt_length)
    }

    /// Build a record from a caller-supplied salt (hex text).
    ///
    /// Returns `None` when the salt is empty or not hex, since such a
    /// record would never verify.
    pub fn hash_with_salt(&self, password: &str, salt_hex: &str) -> Option<String> {
        if salt_hex.is_empty() || !salt_hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(self.record(password, salt_hex))
    }

    fn record(&self, password: &str, salt_hex: &str) -> String {
        let derived = derive(password, salt_hex, self.iterations, self.key_length);
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{salt_hex}{SEPARATOR}{}",
            self.iterations,
            self.key_length,
            hex::encode(derived)
        )
    }
}

impl Default for Pbkdf2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash_password(&self, password: &str) -> String {
        let mut salt = vec![0u8; self.salt_length];
        OsRng.fill_bytes(&mut salt);
        self.record(password, &hex::encode(salt))
    }

    fn verify_password(&self, password: &str, record: &str) -> bool {
        let Some(stored) = StoredRecord::parse(record) else {
            return false;
        };
        let derived = derive(password, stored.salt_hex, stored.iterations, stored.key_length);
        constant_time_eq(&derived, &stored.hash)
    }
}

/// A record that passed every structural check.
struct StoredRecord<'a> {
    iterations: u32,
    key_length: usize,
    salt_hex: &'a str,
    hash: Vec<u8>,
}

impl<'a> StoredRecord<'a> {
    fn parse(record: &'a str) -> Option<Self> {
        let fields: Vec<&str> = record.split(SEPARATOR).collect();
        let &[iterations, key_length, salt_hex, hash_hex] = fields.as_slice() else {
            return None;
        };
        if fields.iter().any(|f| f.is_empty()) {
            return None;
        }

        let iterations: u32 = iterations.parse().ok()?;
        let key_length: usize = key_length.parse().ok()?;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return None;
        }
        if key_length == 0 || key_length > MAX_KEY_LENGTH {
            return None;
        }

        let hash = hex::decode(hash_hex).ok()?;
        if hash.len() != key_length {
            return None;
        }

        Some(Self {
            iterations,
            key_length,
            salt_hex,
            hash,
        })
    }
}

fn derive(password: &str, salt_hex: &str, iterations: u32, key_length: usize) -> Vec<u8> {
    let mut out = vec![0u8; key_length];
    pbkdf2_hmac::<Sha512>(password.as_bytes(), salt_hex.as_bytes(), iterations, &mut out);
    out
}

/// Compare without early exit on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> Pbkdf2PasswordHasher {
        Pbkdf2PasswordHasher::with_params(1_000, 64, 32)
    }

    fn fields(record: &str) -> Vec<String> {
        record.split('$').map(str::to_string).collect()
    }

    #[test]
    fn test_record_layout() {
        let record = fast_hasher().hash_password("piscina123");
        let parts = fields(&record);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "1000");
        assert_eq!(parts[1], "64");
        assert_eq!(parts[2].len(), 64);
        assert_eq!(parts[3].len(), 128);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
        assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_round_trip() {
        let hasher = fast_hasher();
        for password in ["piscina123", "", "contraseña segura ñandú 🏊"] {
            let record = hasher.hash_password(password);
            assert!(hasher.verify_password(password, &record), "{password:?}");
        }
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hasher = fast_hasher();
        let record = hasher.hash_password("piscina123");
        assert!(!hasher.verify_password("piscina124", &record));
        assert!(!hasher.verify_password("", &record));
    }

    #[test]
    fn test_fresh_salt_per_record() {
        let hasher = fast_hasher();
        let a = hasher.hash_password("same");
        let b = hasher.hash_password("same");
        assert_ne!(a, b);
        assert!(hasher.verify_password("same", &a));
        assert!(hasher.verify_password("same", &b));
    }

    #[test]
    fn test_salt_is_hex_text() {
        // Derived with the salt hex string's bytes as KDF input.
        let hasher = Pbkdf2PasswordHasher::with_params(1, 16, 1);
        let record = hasher.hash_with_salt("pw", "00").unwrap();
        let mut expected = vec![0u8; 16];
        pbkdf2_hmac::<Sha512>(b"pw", b"00", 1, &mut expected);
        assert_eq!(fields(&record)[3], hex::encode(expected));

        let mut decoded_salt = vec![0u8; 16];
        pbkdf2_hmac::<Sha512>(b"pw", &[0u8], 1, &mut decoded_salt);
        assert_ne!(fields(&record)[3], hex::encode(decoded_salt));
    }

    #[test]
    fn test_caller_salt_must_be_hex() {
        let hasher = fast_hasher();
        assert!(hasher.hash_with_salt("pw", "").is_none());
        assert!(hasher.hash_with_salt("pw", "a$b").is_none());
        assert!(hasher.hash_with_salt("pw", "sal-marina").is_none());

        let record = hasher.hash_with_salt("pw", "C0FFEE").unwrap();
        assert_eq!(fields(&record)[2], "C0FFEE");
        assert!(hasher.verify_password("pw", &record));
    }

    #[test]
    fn test_parameters_travel_with_record() {
        let old = Pbkdf2PasswordHasher::with_params(500, 32, 8);
        let record = old.hash_password("antigua");
        let current = fast_hasher();
        assert!(current.verify_password("antigua", &record));
    }

    #[test]
    fn test_tampered_fields_rejected() {
        let hasher = fast_hasher();
        let record = hasher.hash_password("piscina123");
        let parts = fields(&record);

        let mut iterations = parts.clone();
        iterations[0] = "1001".to_string();
        assert!(!hasher.verify_password("piscina123", &iterations.join("$")));

        let mut salt = parts.clone();
        salt[2] = format!("{}0", &salt[2][..salt[2].len() - 1]);
        if salt[2] == parts[2] {
            salt[2] = format!("{}1", &salt[2][..salt[2].len() - 1]);
        }
        assert!(!hasher.verify_password("piscina123", &salt.join("$")));

        let mut hash = parts.clone();
        let flipped = if hash[3].starts_with('0') { "1" } else { "0" };
        hash[3] = format!("{flipped}{}", &hash[3][1..]);
        assert!(!hasher.verify_password("piscina123", &hash.join("$")));

        let mut length = parts.clone();
        length[1] = "32".to_string();
        assert!(!hasher.verify_password("piscina123", &length.join("$")));
    }

    #[test]
    fn test_malformed_records_rejected() {
        let hasher = fast_hasher();
        let valid = hasher.hash_password("x");
        let parts = fields(&valid);

        let malformed = [
            String::new(),
            "justonefield".to_string(),
            format!("{}${}${}", parts[0], parts[1], parts[2]),
            format!("{valid}$extra"),
            format!("abc${}${}${}", parts[1], parts[2], parts[3]),
            format!("{}$sixty${}${}", parts[0], parts[2], parts[3]),
            format!("0${}${}${}", parts[1], parts[2], parts[3]),
            format!("20000000${}${}${}", parts[1], parts[2], parts[3]),
            format!("{}$0${}${}", parts[0], parts[2], parts[3]),
            format!("{}$4096${}${}", parts[0], parts[2], parts[3]),
            format!("{}${}$${}", parts[0], parts[1], parts[3]),
            format!("{}${}${}$zz{}", parts[0], parts[1], parts[2], &parts[3][2..]),
            format!("{}${}${}$", parts[0], parts[1], parts[2]),
        ];

        for record in &malformed {
            assert!(!hasher.verify_password("x", record), "accepted {record:?}");
        }
    }

    #[test]
    fn test_with_params_floors_zero() {
        let hasher = Pbkdf2PasswordHasher::with_params(0, 0, 0);
        let record = hasher.hash_password("pw");
        assert!(record.starts_with("1$1$"));
        assert!(hasher.verify_password("pw", &record));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }
}
