//! Configuration types for the Poolside server.
//!
//! `PoolsideConfig` mirrors `config.toml` in the data directory. Every field
//! has a default, so an empty or missing file yields a runnable development
//! setup.

use serde::{Deserialize, Serialize};

/// Secret used when neither the config file nor `JWT_SECRET` provides one.
pub const DEVELOPMENT_JWT_SECRET: &str = "your-secret-key-for-development";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolsideConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub auth: AuthSection,
    pub password: PasswordSection,
    pub logging: LoggingSection,
}

/// Listener and CORS settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API with credentials. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec![
                "https://farancibiat.cl".to_string(),
                "https://www.farancibiat.cl".to_string(),
                "https://swim.farancibiat.cl".to_string(),
            ],
        }
    }
}

/// Database location. `None` means `{data_dir}/poolside.db`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
}

/// Bearer token settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            token_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl AuthSection {
    pub fn uses_development_secret(&self) -> bool {
        self.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}

/// Parameters for newly created credential records.
///
/// Existing records keep verifying with the parameters embedded in them, so
/// raising `iterations` later does not invalidate stored passwords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordSection {
    pub iterations: u32,
    pub key_length: usize,
    pub salt_length: usize,
}

impl Default for PasswordSection {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            key_length: 64,
            salt_length: 32,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub format: LogFormat,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}
