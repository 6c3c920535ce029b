//! Gallery image repository

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;

use crate::models::{GalleryCategoryRef, GalleryImage, NewGalleryImage, UpdateGalleryImage};

const IMAGE_SELECT: &str = r#"
    SELECT g.id, g.category, g.url, g.public_id, g.caption, g.category_id, g.created_at,
           c.title AS category_title, c.slug AS category_slug
    FROM gallery_images g
    LEFT JOIN hotel_categories c ON c.id = g.category_id
"#;

/// Gallery repository for database operations
#[derive(Clone)]
pub struct GalleryRepository {
    pool: PgPool,
}

fn gallery_image(row: &PgRow) -> GalleryImage {
    let category_id: Option<i32> = row.get("category_id");
    let title: Option<String> = row.get("category_title");
    let slug: Option<String> = row.get("category_slug");

    let hotel_category = match (category_id, title, slug) {
        (Some(id), Some(title), Some(slug)) => Some(GalleryCategoryRef { id, title, slug }),
        _ => None,
    };

    GalleryImage {
        id: row.get("id"),
        category: row.get("category"),
        url: row.get("url"),
        public_id: row.get("public_id"),
        caption: row.get("caption"),
        category_id,
        created_at: row.get("created_at"),
        hotel_category,
    }
}

impl GalleryRepository {
    /// Create a new gallery repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Images newest first, optionally for one gallery category
    pub async fn list(&self, category: Option<&str>) -> DatabaseResult<Vec<GalleryImage>> {
        let rows = sqlx::query(&format!(
            "{} WHERE ($1::TEXT IS NULL OR g.category = $1) ORDER BY g.created_at DESC",
            IMAGE_SELECT
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(gallery_image).collect())
    }

    /// One image by id
    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<GalleryImage>> {
        let row = sqlx::query(&format!("{} WHERE g.id = $1", IMAGE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(gallery_image))
    }

    /// Register an image already hosted by the media provider
    pub async fn create(&self, payload: &NewGalleryImage) -> DatabaseResult<GalleryImage> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO gallery_images (category, url, public_id, caption, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&payload.category)
        .bind(&payload.url)
        .bind(&payload.public_id)
        .bind(payload.caption.as_deref().filter(|c| !c.is_empty()))
        .bind(payload.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        info!("Registered gallery image {}", id);

        self.find_by_id(id)
            .await?
            .ok_or(DatabaseError::Query(sqlx::Error::RowNotFound))
    }

    /// Edit image metadata; `None` when the image does not exist.
    ///
    /// `caption` and `category_id` are only touched when present in the edit,
    /// and an empty caption is stored as `NULL`.
    pub async fn update(
        &self,
        id: i32,
        payload: &UpdateGalleryImage,
    ) -> DatabaseResult<Option<GalleryImage>> {
        let caption = payload
            .caption
            .as_ref()
            .map(|caption| caption.as_deref().filter(|c| !c.is_empty()));

        let result = sqlx::query(
            r#"
            UPDATE gallery_images SET
                category = COALESCE($2, category),
                caption = CASE WHEN $3 THEN $4 ELSE caption END,
                category_id = CASE WHEN $5 THEN $6 ELSE category_id END
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&payload.category)
        .bind(caption.is_some())
        .bind(caption.flatten())
        .bind(payload.category_id.is_some())
        .bind(payload.category_id.flatten())
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Remove an image record
    pub async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }
}
