//! Room category repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Postgres, Transaction, types::Json};
use tracing::info;

use crate::models::{
    Category, CategoryDetails, CategoryImage, CategoryUpdate, NewCategory, Price, PriceTier,
};

/// Price tiers every new category starts with: hours, cents, label
const DEFAULT_PRICE_TIERS: [(i32, i32, &str); 3] = [
    (2, 50000, "2 Hours"),
    (4, 80000, "4 Hours"),
    (24, 150000, "24 Hours"),
];

const CATEGORY_COLUMNS: &str = "id, slug, title, description, specs, essential_amenities, \
     bed_type, max_occupancy, room_size, video_url, room_count, created_at, updated_at";

/// Category repository for database operations
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories ordered by title, with prices and images
    pub async fn list_with_details(&self) -> DatabaseResult<Vec<CategoryDetails>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM hotel_categories ORDER BY title ASC",
            CATEGORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        self.attach_details(categories).await
    }

    /// One category by slug
    pub async fn find_by_slug(&self, slug: &str) -> DatabaseResult<Option<CategoryDetails>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM hotel_categories WHERE slug = $1",
            CATEGORY_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        self.detail_one(category).await
    }

    /// One category by id
    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<CategoryDetails>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM hotel_categories WHERE id = $1",
            CATEGORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        self.detail_one(category).await
    }

    /// Create a category together with the default price tiers
    pub async fn create(&self, slug: &str, payload: &NewCategory) -> DatabaseResult<CategoryDetails> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::Query)?;

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO hotel_categories
                (slug, title, description, specs, essential_amenities,
                 bed_type, max_occupancy, room_size, video_url, room_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(slug)
        .bind(payload.title.trim())
        .bind(&payload.description)
        .bind(Json(payload.specs.unwrap_or_default()))
        .bind(&payload.essential_amenities)
        .bind(&payload.bed_type)
        .bind(payload.max_occupancy)
        .bind(&payload.room_size)
        .bind(&payload.video_url)
        .bind(payload.room_count)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::from_query)?;

        for (hours, cents, label) in DEFAULT_PRICE_TIERS {
            insert_tier(&mut tx, id, hours, cents, Some(label)).await?;
        }

        tx.commit().await.map_err(DatabaseError::Query)?;
        info!("Created category {} ({})", id, slug);

        self.find_by_id(id)
            .await?
            .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))
    }

    /// Apply an update; `None` when the category does not exist
    pub async fn update(
        &self,
        id: i32,
        update: &CategoryUpdate,
    ) -> DatabaseResult<Option<CategoryDetails>> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::Query)?;

        let updated = sqlx::query(
            r#"
            UPDATE hotel_categories SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                room_count = COALESCE($5, room_count),
                bed_type = COALESCE($6, bed_type),
                max_occupancy = COALESCE($7, max_occupancy),
                room_size = COALESCE($8, room_size),
                specs = specs || COALESCE($9, '{}'::jsonb),
                essential_amenities = COALESCE($10, essential_amenities),
                video_url = COALESCE($11, video_url),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.slug)
        .bind(&update.description)
        .bind(update.room_count)
        .bind(&update.bed_type)
        .bind(update.max_occupancy)
        .bind(&update.room_size)
        .bind(&update.specs)
        .bind(&update.essential_amenities)
        .bind(&update.video_url)
        .execute(&mut *tx)
        .await
        .map_err(DatabaseError::from_query)?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(tiers) = &update.prices {
            replace_tiers(&mut tx, id, tiers).await?;
        }

        tx.commit().await.map_err(DatabaseError::Query)?;
        info!("Updated category {}", id);

        self.find_by_id(id).await
    }

    /// Delete a category; its prices go with it
    pub async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM hotel_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn detail_one(&self, category: Option<Category>) -> DatabaseResult<Option<CategoryDetails>> {
        match category {
            Some(category) => Ok(self.attach_details(vec![category]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn attach_details(&self, categories: Vec<Category>) -> DatabaseResult<Vec<CategoryDetails>> {
        let ids: Vec<i32> = categories.iter().map(|c| c.id).collect();

        let prices = sqlx::query_as::<_, Price>(
            r#"
            SELECT id, category_id, hourly_hours, rate_cents, label, created_at
            FROM prices
            WHERE category_id = ANY($1)
            ORDER BY hourly_hours ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let images = sqlx::query_as::<_, CategoryImage>(
            r#"
            SELECT id, url, caption, category_id
            FROM gallery_images
            WHERE category_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        let details = categories
            .into_iter()
            .map(|category| CategoryDetails {
                prices: prices
                    .iter()
                    .filter(|p| p.category_id == category.id)
                    .cloned()
                    .collect(),
                images: images
                    .iter()
                    .filter(|i| i.category_id == Some(category.id))
                    .cloned()
                    .collect(),
                category,
            })
            .collect();

        Ok(details)
    }
}

async fn insert_tier(
    tx: &mut Transaction<'_, Postgres>,
    category_id: i32,
    hourly_hours: i32,
    rate_cents: i32,
    label: Option<&str>,
) -> DatabaseResult<()> {
    sqlx::query(
        r#"
        INSERT INTO prices (category_id, hourly_hours, rate_cents, label)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(category_id)
    .bind(hourly_hours)
    .bind(rate_cents)
    .bind(label)
    .execute(&mut **tx)
    .await
    .map_err(DatabaseError::from_query)?;

    Ok(())
}

async fn replace_tiers(
    tx: &mut Transaction<'_, Postgres>,
    category_id: i32,
    tiers: &[PriceTier],
) -> DatabaseResult<()> {
    sqlx::query("DELETE FROM prices WHERE category_id = $1")
        .bind(category_id)
        .execute(&mut **tx)
        .await
        .map_err(DatabaseError::Query)?;

    for tier in tiers {
        insert_tier(
            tx,
            category_id,
            tier.hourly_hours,
            tier.rate_cents,
            tier.label.as_deref().filter(|l| !l.is_empty()),
        )
        .await?;
    }

    Ok(())
}
