//! Session record model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// One issued, revocable login session
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SessionRecord {
    pub id: i32,
    pub admin_id: i32,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// A record is live strictly before its expiry instant
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// New session creation payload
#[derive(Debug, Clone)]
pub struct NewSession {
    pub admin_id: i32,
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
