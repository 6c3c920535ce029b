//! Runtime configuration for the auth library
//!
//! The token secret is resolved once at startup and handed to the token codec
//! as a value; nothing below this module reads the environment.

use anyhow::Result;
use tracing::warn;

/// Secret used when `JWT_SECRET` is unset outside production.
const DEVELOPMENT_SECRET: &str = "development-only-secret-do-not-deploy";

/// Minimum accepted secret length in production, in bytes.
const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Token validity window in seconds (8 hours).
pub const TOKEN_TTL_SECONDS: i64 = 8 * 60 * 60;

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Read `APP_ENV`; only the exact value `production` selects production.
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Token codec configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC secret for signing tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_seconds: i64,
}

impl TokenConfig {
    /// Build a config around an explicit secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds: TOKEN_TTL_SECONDS,
        }
    }

    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: HMAC secret. Required in production (at least 32 bytes).
    ///   In development a fixed fallback is used and a warning is logged.
    pub fn from_env(environment: Environment) -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.trim().is_empty());

        Self::resolve(secret, environment)
    }

    fn resolve(secret: Option<String>, environment: Environment) -> Result<Self> {
        match (secret, environment) {
            (Some(secret), Environment::Production) if secret.len() < MIN_PRODUCTION_SECRET_LEN => {
                anyhow::bail!(
                    "JWT_SECRET must be at least {} bytes in production",
                    MIN_PRODUCTION_SECRET_LEN
                )
            }
            (Some(secret), _) => Ok(Self::new(secret)),
            (None, Environment::Production) => {
                anyhow::bail!("JWT_SECRET environment variable not set")
            }
            (None, Environment::Development) => {
                warn!("!!! JWT_SECRET is not set: signing tokens with the DEVELOPMENT fallback secret !!!");
                warn!("!!! Never run this configuration in production (set APP_ENV=production to enforce) !!!");
                Ok(Self::new(DEVELOPMENT_SECRET))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_development_falls_back_to_constant() {
        let config = TokenConfig::resolve(None, Environment::Development).unwrap();
        assert_eq!(config.secret, DEVELOPMENT_SECRET);
        assert_eq!(config.ttl_seconds, 28_800);
    }

    #[test]
    fn test_production_requires_secret() {
        assert!(TokenConfig::resolve(None, Environment::Production).is_err());
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let short = Some("too-short".to_string());
        assert!(TokenConfig::resolve(short, Environment::Production).is_err());

        let long = Some("x".repeat(MIN_PRODUCTION_SECRET_LEN));
        let config = TokenConfig::resolve(long, Environment::Production).unwrap();
        assert_eq!(config.secret.len(), MIN_PRODUCTION_SECRET_LEN);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_secret_and_environment() {
        unsafe {
            std::env::set_var("APP_ENV", "production");
            std::env::set_var("JWT_SECRET", "test-secret-key-for-testing-purposes-minimum-32");
        }

        let environment = Environment::from_env();
        assert!(environment.is_production());
        let config = TokenConfig::from_env(environment).unwrap();
        assert_eq!(config.secret, "test-secret-key-for-testing-purposes-minimum-32");

        unsafe {
            std::env::set_var("JWT_SECRET", "   ");
        }
        assert!(TokenConfig::from_env(environment).is_err());

        unsafe {
            std::env::remove_var("APP_ENV");
            std::env::remove_var("JWT_SECRET");
        }
        assert_eq!(Environment::from_env(), Environment::Development);
    }
}
