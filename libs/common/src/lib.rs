//! Common library for the hotel site backend
//!
//! This crate provides shared functionality used by the auth library and the
//! website service: PostgreSQL connectivity, the shared database error type
//! and tracing setup.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, init_pool, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod telemetry;
