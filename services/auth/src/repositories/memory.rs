//! In-memory stores for tests
//!
//! Both stores can be switched into an "unavailable" mode in which every call
//! fails like an unreachable database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::{AdminStore, SessionStore};
use crate::models::{Admin, NewSession, SessionRecord};

fn unavailable() -> DatabaseError {
    DatabaseError::Connection(sqlx::Error::PoolTimedOut)
}

/// Admins kept in a vector
#[derive(Clone, Default)]
pub struct MemoryAdminStore {
    admins: Arc<Mutex<Vec<Admin>>>,
    down: Arc<AtomicBool>,
}

impl MemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an admin with an already-computed password hash
    pub async fn add(&self, email: &str, password_hash: &str, is_active: bool) -> Admin {
        let mut admins = self.admins.lock().await;
        let admin = Admin {
            id: admins.iter().map(|a| a.id).max().unwrap_or(0) + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_active,
            last_login_at: None,
            created_at: Utc::now(),
        };
        admins.push(admin.clone());
        admin
    }

    pub async fn set_active(&self, id: i32, is_active: bool) {
        let mut admins = self.admins.lock().await;
        if let Some(admin) = admins.iter_mut().find(|a| a.id == id) {
            admin.is_active = is_active;
        }
    }

    pub async fn remove(&self, id: i32) {
        self.admins.lock().await.retain(|a| a.id != id);
    }

    pub async fn get(&self, id: i32) -> Option<Admin> {
        self.admins.lock().await.iter().find(|a| a.id == id).cloned()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> DatabaseResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl AdminStore for MemoryAdminStore {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Admin>> {
        self.check()?;
        let admins = self.admins.lock().await;
        Ok(admins.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Admin>> {
        self.check()?;
        Ok(self.get(id).await)
    }

    async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> DatabaseResult<()> {
        self.check()?;
        let mut admins = self.admins.lock().await;
        if let Some(admin) = admins.iter_mut().find(|a| a.id == id) {
            admin.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DatabaseResult<Option<Admin>> {
        self.check()?;
        if self.admins.lock().await.iter().any(|a| a.email == email) {
            return Ok(None);
        }
        Ok(Some(self.add(email, password_hash, true).await))
    }
}

/// Session records kept in a vector
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
    down: Arc<AtomicBool>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<SessionRecord> {
        self.sessions.lock().await.clone()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> DatabaseResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &NewSession) -> DatabaseResult<SessionRecord> {
        self.check()?;
        let mut sessions = self.sessions.lock().await;
        if sessions.iter().any(|s| s.token_id == session.token_id) {
            return Err(DatabaseError::Duplicate(session.token_id.clone()));
        }

        let record = SessionRecord {
            id: sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            admin_id: session.admin_id,
            token_id: session.token_id.clone(),
            expires_at: session.expires_at,
            created_at: session.created_at,
        };
        sessions.push(record.clone());
        Ok(record)
    }

    async fn delete_for_admin(&self, admin_id: i32) -> DatabaseResult<u64> {
        self.check()?;
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|s| s.admin_id != admin_id);
        Ok((before - sessions.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DatabaseResult<u64> {
        self.check()?;
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|s| s.is_live_at(now));
        Ok((before - sessions.len()) as u64)
    }

    async fn count_for_admin(&self, admin_id: i32) -> DatabaseResult<i64> {
        self.check()?;
        let sessions = self.sessions.lock().await;
        Ok(sessions.iter().filter(|s| s.admin_id == admin_id).count() as i64)
    }

    async fn is_live(
        &self,
        admin_id: i32,
        token_id: &str,
        now: DateTime<Utc>,
    ) -> DatabaseResult<bool> {
        self.check()?;
        let sessions = self.sessions.lock().await;
        Ok(sessions
            .iter()
            .any(|s| s.admin_id == admin_id && s.token_id == token_id && s.is_live_at(now)))
    }
}
