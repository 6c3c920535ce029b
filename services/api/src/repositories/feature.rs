//! Room feature repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;

use crate::models::RoomFeature;

/// Read access to the room feature list
#[derive(Clone)]
pub struct FeatureRepository {
    pool: PgPool,
}

impl FeatureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Active features by sort order
    pub async fn list_active(&self) -> DatabaseResult<Vec<RoomFeature>> {
        sqlx::query_as::<_, RoomFeature>(
            r#"
            SELECT id, key, label, category, sort_order, is_active
            FROM room_features
            WHERE is_active
            ORDER BY sort_order ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
