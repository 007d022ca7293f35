//! Configuration loader for Poolside.
//!
//! Reads `config.toml` from the data directory (`~/.poolside/` by default),
//! then applies environment overrides. A missing file yields the defaults; an
//! unparsable one is logged and ignored.

use std::path::{Path, PathBuf};

use poolside_types::config::PoolsideConfig;

/// Load configuration from `{data_dir}/config.toml` and the process environment.
pub async fn load_config(data_dir: &Path) -> PoolsideConfig {
    let mut config = load_config_file(data_dir).await;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

async fn load_config_file(data_dir: &Path) -> PoolsideConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return PoolsideConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return PoolsideConfig::default();
        }
    };

    match toml::from_str::<PoolsideConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PoolsideConfig::default()
        }
    }
}

/// Overlay `DATABASE_URL`, `HOST`, `PORT`, `JWT_SECRET`, `JWT_EXPIRES_IN` and
/// `CORS_ORIGINS`. Values that fail to parse are logged and skipped.
pub fn apply_env_overrides<F>(config: &mut PoolsideConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(url) = var("DATABASE_URL") {
        config.database.url = Some(url);
    }
    if let Some(host) = var("HOST") {
        config.server.host = host;
    }
    if let Some(port) = var("PORT") {
        match port.trim().parse() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring invalid PORT '{port}'"),
        }
    }
    if let Some(secret) = var("JWT_SECRET") {
        config.auth.jwt_secret = secret;
    }
    if let Some(expires_in) = var("JWT_EXPIRES_IN") {
        match parse_duration_secs(&expires_in) {
            Some(secs) => config.auth.token_ttl_secs = secs,
            None => tracing::warn!("Ignoring invalid JWT_EXPIRES_IN '{expires_in}'"),
        }
    }
    if let Some(origins) = var("CORS_ORIGINS") {
        config.server.cors_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
    }
}

/// Parse a lifetime such as `24h`, `30m`, `7d`, `45s` or plain seconds.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => raw.split_at(idx),
        None => (raw, "s"),
    };

    let value: i64 = digits.parse().ok()?;
    let multiplier = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 24 * 60 * 60,
        _ => return None,
    };

    value.checked_mul(multiplier).filter(|secs| *secs > 0)
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `POOLSIDE_DATA_DIR` environment variable
/// 2. `~/.poolside`
/// 3. `.poolside` in the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("POOLSIDE_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".poolside");
    }

    PathBuf::from(".poolside")
}

/// The configured database URL, or `sqlite://{data_dir}/poolside.db?mode=rwc`.
pub fn database_url(config: &PoolsideConfig, data_dir: &Path) -> String {
    config.database.url.clone().unwrap_or_else(|| {
        format!("sqlite://{}?mode=rwc", data_dir.join("poolside.db").display())
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_file(tmp.path()).await;
        assert_eq!(config, PoolsideConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[server]
port = 4000
cors_origins = ["http://localhost:5173"]

[password]
iterations = 200000
"#,
        )
        .await
        .unwrap();

        let config = load_config_file(tmp.path()).await;
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.password.iterations, 200_000);
        assert_eq!(config.password.key_length, 64);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config_file(tmp.path()).await;
        assert_eq!(config, PoolsideConfig::default());
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = PoolsideConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("HOST", "127.0.0.1"),
                ("PORT", "8081"),
                ("JWT_SECRET", "prod-secret"),
                ("JWT_EXPIRES_IN", "30m"),
                ("CORS_ORIGINS", "https://a.cl, https://b.cl ,"),
            ]),
        );

        assert_eq!(config.database.url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.auth.jwt_secret, "prod-secret");
        assert!(!config.auth.uses_development_secret());
        assert_eq!(config.auth.token_ttl_secs, 1800);
        assert_eq!(config.server.cors_origins, vec!["https://a.cl", "https://b.cl"]);
    }

    #[test]
    fn env_overrides_skip_invalid_values() {
        let mut config = PoolsideConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("PORT", "eighty"), ("JWT_EXPIRES_IN", "forever"), ("HOST", "  ")]),
        );
        assert_eq!(config, PoolsideConfig::default());
    }

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration_secs("24h"), Some(86_400));
        assert_eq!(parse_duration_secs("30m"), Some(1_800));
        assert_eq!(parse_duration_secs("7d"), Some(604_800));
        assert_eq!(parse_duration_secs("45s"), Some(45));
        assert_eq!(parse_duration_secs("3600"), Some(3_600));
        assert_eq!(parse_duration_secs("0"), None);
        assert_eq!(parse_duration_secs("h"), None);
        assert_eq!(parse_duration_secs("2w"), None);
        assert_eq!(parse_duration_secs("-5m"), None);
    }

    #[test]
    fn database_url_defaults_to_data_dir() {
        let config = PoolsideConfig::default();
        let url = database_url(&config, Path::new("/var/lib/poolside"));
        assert_eq!(url, "sqlite:///var/lib/poolside/poolside.db?mode=rwc");

        let mut config = PoolsideConfig::default();
        config.database.url = Some("sqlite://custom.db".to_string());
        assert_eq!(database_url(&config, Path::new("/x")), "sqlite://custom.db");
    }
}
