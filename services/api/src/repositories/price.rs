//! Price repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::{NewPrice, Price, PriceCategoryRef, PriceWithCategory};

/// Price repository for database operations
#[derive(Clone)]
pub struct PriceRepository {
    pool: PgPool,
}

fn price_with_category(row: &PgRow) -> PriceWithCategory {
    PriceWithCategory {
        price: Price {
            id: row.get("id"),
            category_id: row.get("category_id"),
            hourly_hours: row.get("hourly_hours"),
            rate_cents: row.get("rate_cents"),
            label: row.get("label"),
            created_at: row.get("created_at"),
        },
        category: PriceCategoryRef {
            id: row.get("category_id"),
            title: row.get("category_title"),
            slug: row.get("category_slug"),
        },
    }
}

impl PriceRepository {
    /// Create a new price repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Prices ordered by category title then hours, optionally for one category
    pub async fn list(&self, category_id: Option<i32>) -> DatabaseResult<Vec<PriceWithCategory>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.category_id, p.hourly_hours, p.rate_cents, p.label, p.created_at,
                   c.title AS category_title, c.slug AS category_slug
            FROM prices p
            JOIN hotel_categories c ON c.id = p.category_id
            WHERE ($1::INTEGER IS NULL OR p.category_id = $1)
            ORDER BY c.title ASC, p.hourly_hours ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(price_with_category).collect())
    }

    /// Insert a price; `None` when the category does not exist
    pub async fn create(&self, payload: &NewPrice) -> DatabaseResult<Option<Price>> {
        sqlx::query_as::<_, Price>(
            r#"
            INSERT INTO prices (category_id, hourly_hours, rate_cents, label)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (SELECT 1 FROM hotel_categories WHERE id = $1)
            RETURNING id, category_id, hourly_hours, rate_cents, label, created_at
            "#,
        )
        .bind(payload.category_id)
        .bind(payload.hourly_hours)
        .bind(payload.rate_cents)
        .bind(&payload.label)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }
}
