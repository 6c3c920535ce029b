//! Admin authentication for the hotel site
//!
//! This crate issues and verifies admin tokens, keeps the session table,
//! gates protected routes and exposes the `/api/auth` endpoints. Persistence
//! is reached through the [`repositories::AdminStore`] and
//! [`repositories::SessionStore`] traits.

pub mod clock;
pub mod config;
pub mod cookie;
pub mod error;
pub mod extract;
pub mod gate;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod request;
pub mod routes;
pub mod service;
pub mod validation;

pub use error::{AuthError, AuthResult};
pub use extract::AdminAuth;
pub use gate::{RouteGate, RouteGateConfig, route_gate};
pub use service::{AuthService, AuthenticatedAdmin, IssuedSession};
