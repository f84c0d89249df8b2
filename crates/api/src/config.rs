//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PORTFOLIO_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! ## Optional
//! - `PORTFOLIO_HOST` - Bind address (default: 127.0.0.1)
//! - `PORTFOLIO_PORT` - Listen port (default: 8000)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated list of allowed origins
//! - `RECAPTCHA_SECRET_KEY` - reCAPTCHA server secret; verification is
//!   skipped entirely when unset
//! - `ADMIN_API_TOKEN` - Bearer token guarding message administration;
//!   the admin endpoints fail closed when unset
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Sentry error tracking
//!
//! ## Outbound mail
//! - `EMAIL_HOST` (default: localhost), `EMAIL_PORT` (default: 587)
//! - `EMAIL_USE_TLS` (default: true)
//! - `EMAIL_HOST_USER`, `EMAIL_HOST_PASSWORD` - SMTP credentials; the
//!   notification dispatcher skips sending when either is unset
//! - `DEFAULT_FROM_EMAIL` - From header (default: `EMAIL_HOST_USER`)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Portfolio API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed by the CORS layer (empty = permissive)
    pub cors_allowed_origins: Vec<String>,
    /// reCAPTCHA server-side secret; `None` disables verification
    pub recaptcha_secret: Option<SecretString>,
    /// Bearer token for the message administration endpoints
    pub admin_token: Option<SecretString>,
    /// Outbound mail configuration
    pub mail: MailConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
}

/// Outbound SMTP configuration.
///
/// Credentials are individually optional: the notification dispatcher treats
/// a missing username or password as "mail not configured" and skips sending
/// rather than failing the request.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct MailConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port
    pub port: u16,
    /// Whether to negotiate STARTTLS
    pub use_tls: bool,
    /// SMTP authentication username
    pub username: Option<String>,
    /// SMTP authentication password
    pub password: Option<SecretString>,
    /// Email sender address (From header); defaults to the username
    pub from_address: Option<String>,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("use_tls", &self.use_tls)
            .field("username", &self.username)
            .field(
                "password",
                &self.password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PORTFOLIO_DATABASE_URL")?;
        let host = get_env_or_default("PORTFOLIO_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTFOLIO_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORTFOLIO_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORTFOLIO_PORT".to_string(), e.to_string()))?;

        let cors_allowed_origins = get_optional_env("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url,
            host,
            port,
            cors_allowed_origins,
            recaptcha_secret: get_optional_env("RECAPTCHA_SECRET_KEY").map(SecretString::from),
            admin_token: get_optional_env("ADMIN_API_TOKEN").map(SecretString::from),
            mail: MailConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = get_env_or_default("EMAIL_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("EMAIL_PORT".to_string(), e.to_string()))?;
        let use_tls = parse_bool(&get_env_or_default("EMAIL_USE_TLS", "true"))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "EMAIL_USE_TLS".to_string(),
                    "expected true or false".to_string(),
                )
            })?;

        Ok(Self {
            host: get_env_or_default("EMAIL_HOST", "localhost"),
            port,
            use_tls,
            username: get_optional_env("EMAIL_HOST_USER"),
            password: get_optional_env("EMAIL_HOST_PASSWORD").map(SecretString::from),
            from_address: get_optional_env("DEFAULT_FROM_EMAIL"),
        })
    }

    /// The From address to use: `DEFAULT_FROM_EMAIL` or the SMTP username.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.from_address.as_deref().or(self.username.as_deref())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse common boolean spellings used in env files.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_mail_config() -> MailConfig {
        MailConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            use_tls: true,
            username: Some("mailer@example.com".to_string()),
            password: Some(SecretString::from("hunter2-but-longer")),
            from_address: None,
        }
    }

    #[test]
    fn test_parse_bool_spellings() {
        for v in ["true", "True", "1", "yes", "ON"] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["false", "0", "no", "Off"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_mail_sender_falls_back_to_username() {
        let mut mail = test_mail_config();
        assert_eq!(mail.sender(), Some("mailer@example.com"));

        mail.from_address = Some("noreply@example.com".to_string());
        assert_eq!(mail.sender(), Some("noreply@example.com"));

        mail.from_address = None;
        mail.username = None;
        assert_eq!(mail.sender(), None);
    }

    #[test]
    fn test_mail_config_debug_redacts_password() {
        let mail = test_mail_config();
        let debug_output = format!("{mail:?}");
        assert!(debug_output.contains("smtp.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_socket_addr() {
        let config = ApiConfig {
            database_url: SecretString::from("postgres://localhost/portfolio"),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            cors_allowed_origins: vec![],
            recaptcha_secret: None,
            admin_token: None,
            mail: test_mail_config(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }
}
