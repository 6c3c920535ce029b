//! Admin model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Admin entity
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn summary(&self) -> AdminSummary {
        AdminSummary {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Public view of an admin, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub id: i32,
    pub email: String,
}

/// Admin login credentials
#[derive(Debug, Clone, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}
