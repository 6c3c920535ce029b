//! Authentication models

pub mod admin;
pub mod session;

// Re-export for convenience
pub use admin::{Admin, AdminSummary, LoginCredentials};
pub use session::{NewSession, SessionRecord};
