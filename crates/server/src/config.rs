//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ANGADI_DATABASE_URL` - `PostgreSQL` connection string
//! - `ANGADI_TOKEN_SECRET` - Bearer-token signing secret (min 32 chars)
//!
//! ## Optional
//! - `ANGADI_HOST` - Bind address (default: 127.0.0.1)
//! - `ANGADI_PORT` - Listen port (default: 5000)
//! - `VAPID_PRIVATE_KEY` - VAPID signing key, base64url (push delivery)
//! - `VAPID_PUBLIC_KEY` - VAPID public key, base64url
//! - `VAPID_SUBJECT` - VAPID subject claim (e.g., mailto:ops@example.com)
//! - `ANGADI_NOTIFICATION_ICON` - Icon path embedded in push payloads
//!   (default: /icons/icon-192x192.png)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//!
//! The three `VAPID_*` variables must be set together; setting only some of
//! them is a configuration error rather than a silent no-push deployment.

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
    #[error("Incomplete VAPID configuration: set all of {0} or none")]
    IncompleteVapid(&'static str),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Bearer-token signing secret
    pub token_secret: SecretString,
    /// Push delivery configuration; `None` disables the dispatcher
    pub push: Option<PushConfig>,
    /// Icon path embedded in notification payloads
    pub notification_icon: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// VAPID key pair and subject for web push delivery.
///
/// Implements `Debug` manually to redact the private key.
#[derive(Clone)]
pub struct PushConfig {
    /// VAPID private key, base64url without padding
    pub private_key: SecretString,
    /// VAPID public key, base64url without padding (served to browsers)
    pub public_key: String,
    /// VAPID subject claim, a `mailto:` or `https:` URI
    pub subject: String,
}

impl std::fmt::Debug for PushConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushConfig")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .field("subject", &self.subject)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// if the token secret fails validation, or if the VAPID trio is only
    /// partially set.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url =
            SecretString::from(get_required_env("ANGADI_DATABASE_URL")?);
        let host = get_env_or_default("ANGADI_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ANGADI_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("ANGADI_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ANGADI_PORT".to_owned(), e.to_string()))?;

        let token_secret = get_required_env("ANGADI_TOKEN_SECRET")?;
        validate_secret("ANGADI_TOKEN_SECRET", &token_secret)?;
        let token_secret = SecretString::from(token_secret);

        let push = load_push_config()?;
        let notification_icon =
            get_env_or_default("ANGADI_NOTIFICATION_ICON", "/icons/icon-192x192.png");
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            token_secret,
            push,
            notification_icon,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Socket address built from `host` and `port`.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Load the VAPID trio; all-or-nothing.
fn load_push_config() -> Result<Option<PushConfig>, ConfigError> {
    let private_key = get_optional_env("VAPID_PRIVATE_KEY");
    let public_key = get_optional_env("VAPID_PUBLIC_KEY");
    let subject = get_optional_env("VAPID_SUBJECT");

    match (private_key, public_key, subject) {
        (Some(private_key), Some(public_key), Some(subject)) => Ok(Some(PushConfig {
            private_key: SecretString::from(private_key),
            public_key,
            subject,
        })),
        (None, None, None) => Ok(None),
        _ => Err(ConfigError::IncompleteVapid(
            "VAPID_PRIVATE_KEY, VAPID_PUBLIC_KEY, VAPID_SUBJECT",
        )),
    }
}

/// Get a required environment variable.
fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Validate a signing secret: minimum length and no obvious placeholders.
fn validate_secret(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            name.to_owned(),
            format!("must be at least {MIN_TOKEN_SECRET_LENGTH} characters"),
        ));
    }

    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                name.to_owned(),
                format!("contains placeholder pattern '{pattern}'"),
            ));
        }
    }

    Ok(())
}

/// Expose the database URL for pool creation.
///
/// Separate helper so call sites don't need to import `secrecy` traits.
#[must_use]
pub fn expose_database_url(config: &ServerConfig) -> &str {
    config.database_url.expose_secret()
}
