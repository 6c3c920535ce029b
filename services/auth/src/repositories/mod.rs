//! Persistence capabilities used by the auth service
//!
//! The service only sees these traits; PostgreSQL implementations live in
//! [`admin`] and [`session`], in-memory ones in `memory` behind the
//! `test-util` feature.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::DatabaseResult;

use crate::models::{Admin, NewSession, SessionRecord};

pub mod admin;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod session;

pub use admin::PgAdminStore;
pub use session::PgSessionStore;

/// Credential store: admin records
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Exact (case-sensitive) email lookup
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Admin>>;

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Admin>>;

    async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> DatabaseResult<()>;

    /// Insert an admin unless the email is taken; `None` when it already existed
    async fn insert_if_absent(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DatabaseResult<Option<Admin>>;
}

/// Session store: issued session records
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fails with `DatabaseError::Duplicate` if the token id already exists
    async fn insert(&self, session: &NewSession) -> DatabaseResult<SessionRecord>;

    /// Delete every record of an admin, returning how many were removed
    async fn delete_for_admin(&self, admin_id: i32) -> DatabaseResult<u64>;

    /// Delete records whose expiry is at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> DatabaseResult<u64>;

    async fn count_for_admin(&self, admin_id: i32) -> DatabaseResult<i64>;

    /// True when the admin owns a record with this token id that is live at `now`
    async fn is_live(
        &self,
        admin_id: i32,
        token_id: &str,
        now: DateTime<Utc>,
    ) -> DatabaseResult<bool>;
}
