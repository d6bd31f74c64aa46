use std::{collections::HashMap, env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub smtp: SmtpConfig,
    /// Bearer token to group-membership table, loaded from the
    /// `STAFF_TOKENS` secret file.
    pub staff_tokens: HashMap<String, Vec<String>>,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Fixed sender address for all outbound mail.
    pub from: String,
    pub tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let staff_tokens = read_optional_secret("STAFF_TOKENS")
            .map(|raw| parse_token_groups(&raw))
            .unwrap_or_default();

        Self {
            port: try_load("PORT", "8000"),
            database_url: try_load("DATABASE_URL", "sqlite://campus_eats.db"),
            smtp: SmtpConfig {
                host: try_load("SMTP_HOST", "localhost"),
                port: try_load("SMTP_PORT", "587"),
                from: try_load("SMTP_FROM", "example@example.com"),
                tls: try_load("SMTP_TLS", "false"),
                username: var("SMTP_USERNAME").ok(),
                password: read_optional_secret("SMTP_PASSWORD"),
            },
            staff_tokens,
        }
    }
}

/// Parses the staff token secret: a JSON object mapping each token to the
/// list of groups its holder belongs to.
pub fn parse_token_groups(raw: &str) -> HashMap<String, Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| {
            warn!("Invalid STAFF_TOKENS secret: {e}");
        })
        .unwrap_or_default()
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn read_optional_secret(secret_name: &str) -> Option<String> {
    let dir = env::var("SECRETS_DIR").unwrap_or_else(|_| "/run/secrets".to_string());
    let path = format!("{dir}/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("Secret {secret_name} not available: {e}");
        })
        .ok()
}
