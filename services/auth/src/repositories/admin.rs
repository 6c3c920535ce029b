//! Admin repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

use super::AdminStore;
use crate::models::Admin;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAdminStore {
    pool: PgPool,
}

impl PgAdminStore {
    /// Create a new admin repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminStore for PgAdminStore {
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<Admin>> {
        sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password_hash, is_active, last_login_at, created_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Admin>> {
        sqlx::query_as::<_, Admin>(
            r#"
            SELECT id, email, password_hash, is_active, last_login_at, created_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn touch_last_login(&self, id: i32, at: DateTime<Utc>) -> DatabaseResult<()> {
        sqlx::query("UPDATE admins SET last_login_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }

    async fn insert_if_absent(
        &self,
        email: &str,
        password_hash: &str,
    ) -> DatabaseResult<Option<Admin>> {
        info!("Provisioning admin: {}", email);

        sqlx::query_as::<_, Admin>(
            r#"
            INSERT INTO admins (email, password_hash, is_active)
            VALUES ($1, $2, TRUE)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, is_active, last_login_at, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }
}
