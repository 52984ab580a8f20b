//! Pricelens configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRICELENS_DATABASE_URL` - `PostgreSQL` connection string
//! - `PRICELENS_BASE_URL` - Public URL for the site
//! - `PRICELENS_SESSION_SECRET` - Session signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `PRICELENS_HOST` - Bind address (default: 127.0.0.1)
//! - `PRICELENS_PORT` - Listen port (default: 3000)
//! - `PRICELENS_MAP_CENTER_LAT` / `PRICELENS_MAP_CENTER_LON` - Fallback map
//!   center when the viewer's location is unknown (default: Supela, Bhilai)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use pricelens_core::Coordinate;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Default map center: Supela market, Bhilai.
const DEFAULT_MAP_CENTER: Coordinate = Coordinate::new(21.2, 81.3);

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
}

/// Pricelens application configuration.
#[derive(Debug, Clone)]
pub struct PricelensConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// Fallback map center when the viewer has no resolved location
    pub map_center: Coordinate,
}

impl PricelensConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing, a value fails
    /// to parse, or the session secret is too weak.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = SecretString::from(get_required_env("PRICELENS_DATABASE_URL")?);
        let base_url = get_required_env("PRICELENS_BASE_URL")?;

        let session_secret = get_validated_secret("PRICELENS_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "PRICELENS_SESSION_SECRET")?;

        let host: IpAddr = get_env_or("PRICELENS_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("PRICELENS_HOST".into(), format!("{e}"))
            })?;

        let port: u16 = get_env_or("PRICELENS_PORT", "3000").parse().map_err(|e| {
            ConfigError::InvalidEnvVar("PRICELENS_PORT".into(), format!("{e}"))
        })?;

        let map_center = Coordinate::new(
            get_env_f64_or("PRICELENS_MAP_CENTER_LAT", DEFAULT_MAP_CENTER.latitude)?,
            get_env_f64_or("PRICELENS_MAP_CENTER_LON", DEFAULT_MAP_CENTER.longitude)?,
        );

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            map_center,
        })
    }

    /// Socket address for the server to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (controls cookie security).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

fn get_env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn get_env_f64_or(key: &str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), format!("{e}"))),
        Err(_) => Ok(default),
    }
}

/// Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let len = s.chars().count() as f64;

    counts
        .values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)]
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Reject secrets that look like placeholders or have low entropy.
fn validate_secret_strength(value: &str, key: &str) -> Result<(), ConfigError> {
    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                key.to_owned(),
                format!("value contains placeholder pattern '{pattern}'"),
            ));
        }
    }

    let entropy = shannon_entropy(value);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            key.to_owned(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need {MIN_ENTROPY_BITS_PER_CHAR})"
            ),
        ));
    }

    Ok(())
}

/// Validate the session secret length.
fn validate_session_secret(secret: &SecretString, key: &str) -> Result<(), ConfigError> {
    if secret.expose_secret().len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            key.to_owned(),
            format!("must be at least {MIN_SESSION_SECRET_LENGTH} characters"),
        ));
    }
    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-session-key-here", "TEST_VAR");
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InsecureSecret(_, _)
        ));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = PricelensConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            map_center: DEFAULT_MAP_CENTER,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }
}
