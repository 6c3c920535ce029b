//! Server configuration

use std::env;

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SWEEP_SCHEDULE: &str = "0 */15 * * * *";

/// Listener and maintenance settings for the binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address to bind
    pub addr: String,
    /// Cron expression for the expired-session sweep
    pub sweep_schedule: String,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SERVER_ADDR`: bind address (default: 0.0.0.0:3000)
    /// - `SESSION_SWEEP_SCHEDULE`: six-field cron expression (default: every 15 minutes)
    pub fn from_env() -> Self {
        Self {
            addr: env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string()),
            sweep_schedule: env::var("SESSION_SWEEP_SCHEDULE")
                .unwrap_or_else(|_| DEFAULT_SWEEP_SCHEDULE.to_string()),
        }
    }
}
