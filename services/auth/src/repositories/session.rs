//! Session repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;

use super::SessionStore;
use crate::models::{NewSession, SessionRecord};

/// PostgreSQL-backed session store
#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn insert(&self, session: &NewSession) -> DatabaseResult<SessionRecord> {
        sqlx::query_as::<_, SessionRecord>(
            r#"
            INSERT INTO admin_sessions (admin_id, token_id, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, admin_id, token_id, expires_at, created_at
            "#,
        )
        .bind(session.admin_id)
        .bind(&session.token_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn delete_for_admin(&self, admin_id: i32) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE admin_id = $1")
            .bind(admin_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DatabaseResult<u64> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected())
    }

    async fn count_for_admin(&self, admin_id: i32) -> DatabaseResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admin_sessions WHERE admin_id = $1")
            .bind(admin_id)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)
    }

    async fn is_live(
        &self,
        admin_id: i32,
        token_id: &str,
        now: DateTime<Utc>,
    ) -> DatabaseResult<bool> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM admin_sessions
                WHERE admin_id = $1 AND token_id = $2 AND expires_at > $3
            )
            "#,
        )
        .bind(admin_id)
        .bind(token_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
