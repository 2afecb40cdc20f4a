//! Environment-driven server configuration.
//!
//! All knobs use the `EPORTFOLIO_` prefix. The signing secret and the single
//! seeded credential are required; everything else has a sensible default.

use eportfolio_core::default_log_level;
use std::env;

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "eportfolio.db";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the server binds to.
    pub addr: String,
    /// SQLite database file path.
    pub db_path: String,
    /// HMAC signing secret for bearer tokens.
    pub secret: String,
    /// Username of the single seeded credential.
    pub username: String,
    /// Stored password hash of the seeded credential.
    pub password_hash: String,
    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: u64,
    /// Log level (trace|debug|info|warn|error).
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: String,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// - Returns a human-readable error when a required variable is missing
    ///   or a numeric variable does not parse.
    pub fn from_env() -> Result<Self, String> {
        let secret = require("EPORTFOLIO_SECRET")?;
        let username = require("EPORTFOLIO_USERNAME")?;
        let password_hash = require("EPORTFOLIO_PASSWORD_HASH")?;

        let token_ttl_secs = match env::var("EPORTFOLIO_TOKEN_TTL_SECS") {
            Ok(value) => value
                .parse()
                .map_err(|_| format!("EPORTFOLIO_TOKEN_TTL_SECS is not a number: `{value}`"))?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            addr: env::var("EPORTFOLIO_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
            db_path: env::var("EPORTFOLIO_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            secret,
            username,
            password_hash,
            token_ttl_secs,
            log_level: env::var("EPORTFOLIO_LOG_LEVEL")
                .unwrap_or_else(|_| default_log_level().to_string()),
            log_dir: env::var("EPORTFOLIO_LOG_DIR").unwrap_or_else(default_log_dir),
        })
    }
}

fn require(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("required environment variable {name} is not set")),
    }
}

fn default_log_dir(_: env::VarError) -> String {
    std::env::temp_dir()
        .join("eportfolio-logs")
        .to_string_lossy()
        .into_owned()
}
