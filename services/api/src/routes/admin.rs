//! Admin catalog management endpoints
//!
//! Every handler takes [`AdminAuth`] first, so an unauthorized caller is
//! rejected before the body is read.

use auth::AdminAuth;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
    routing::{get, put},
};
use common::error::DatabaseError;
use tracing::{error, info};

use super::json_body;
use crate::{
    error::ApiError,
    models::{
        DataResponse, MessageResponse, NewCategory, NewGalleryImage, NewPrice,
        UpdateCategoryRequest, UpdateGalleryImage,
    },
    state::AppState,
    validation,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/admin/categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/admin/prices", get(list_prices).post(create_price))
        .route("/api/admin/gallery", get(list_gallery).post(create_gallery_image))
        .route(
            "/api/admin/gallery/:id",
            put(update_gallery_image).delete(delete_gallery_image),
        )
}

fn write_error(action: &str, err: DatabaseError, conflict: &str) -> ApiError {
    if err.is_duplicate() {
        info!("{} rejected: {}", action, err);
        return ApiError::Conflict(conflict.to_string());
    }

    // The only foreign keys written from here point at room categories.
    if err.is_missing_reference() {
        info!("{} rejected: {}", action, err);
        return ApiError::NotFound("Category not found".to_string());
    }

    error!("Failed to {}: {}", action, err);
    ApiError::Internal
}

fn read_error(action: &str, err: DatabaseError) -> ApiError {
    error!("Failed to {}: {}", action, err);
    ApiError::Internal
}

/// All categories, as the dashboard shows them
pub async fn list_categories(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state
        .categories
        .list_with_details()
        .await
        .map_err(|e| read_error("fetch categories", e))?;

    Ok(Json(DataResponse::new(categories)))
}

/// Create a category with the default price tiers
pub async fn create_category(
    AdminAuth(admin): AdminAuth,
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    let slug = validation::validate_new_category(&payload).map_err(ApiError::BadRequest)?;

    let category = state
        .categories
        .create(&slug, &payload)
        .await
        .map_err(|e| write_error("create category", e, "A category with this slug already exists"))?;

    info!("Admin {} created category {}", admin.id, category.category.id);
    Ok(Json(DataResponse::new(category)))
}

/// One category by id
pub async fn get_category(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .categories
        .find_by_id(id)
        .await
        .map_err(|e| read_error("fetch category", e))?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(DataResponse::new(category)))
}

/// Partial category update, optionally replacing its prices
pub async fn update_category(
    AdminAuth(admin): AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateCategoryRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let update =
        validation::validate_category_update(json_body(payload)?).map_err(ApiError::BadRequest)?;

    let category = state
        .categories
        .update(id, &update)
        .await
        .map_err(|e| {
            write_error(
                "update category",
                e,
                "Slug or price tier already exists for this category",
            )
        })?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    info!("Admin {} updated category {}", admin.id, id);
    Ok(Json(DataResponse::new(category)))
}

/// Delete a category
pub async fn delete_category(
    AdminAuth(admin): AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .categories
        .delete(id)
        .await
        .map_err(|e| read_error("delete category", e))?;

    if !deleted {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    info!("Admin {} deleted category {}", admin.id, id);
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

/// All prices with their categories
pub async fn list_prices(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let prices = state
        .prices
        .list(None)
        .await
        .map_err(|e| read_error("fetch prices", e))?;

    Ok(Json(DataResponse::new(prices)))
}

/// Add a price tier to a category
pub async fn create_price(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
    payload: Result<Json<NewPrice>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    validation::validate_new_price(&payload).map_err(ApiError::BadRequest)?;

    let price = state
        .prices
        .create(&payload)
        .await
        .map_err(|e| {
            write_error(
                "create price",
                e,
                "A price for these hours already exists in this category",
            )
        })?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(DataResponse::new(price)))
}

/// Every gallery image
pub async fn list_gallery(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let images = state
        .gallery
        .list(None)
        .await
        .map_err(|e| read_error("fetch gallery images", e))?;

    Ok(Json(DataResponse::new(images)))
}

/// Register an image already hosted by the media provider
pub async fn create_gallery_image(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
    payload: Result<Json<NewGalleryImage>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    validation::validate_new_gallery_image(&payload).map_err(ApiError::BadRequest)?;

    let image = state
        .gallery
        .create(&payload)
        .await
        .map_err(|e| write_error("create gallery image", e, "Image already exists"))?;

    Ok(Json(DataResponse::new(image)))
}

/// Edit image category, caption or room category
pub async fn update_gallery_image(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<UpdateGalleryImage>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = json_body(payload)?;
    validation::validate_gallery_update(&payload).map_err(ApiError::BadRequest)?;

    let image = state
        .gallery
        .update(id, &payload)
        .await
        .map_err(|e| write_error("update gallery image", e, "Image already exists"))?
        .ok_or_else(|| ApiError::NotFound("Image not found".to_string()))?;

    Ok(Json(DataResponse::new(image)))
}

/// Remove an image record
pub async fn delete_gallery_image(
    AdminAuth(_admin): AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .gallery
        .delete(id)
        .await
        .map_err(|e| read_error("delete gallery image", e))?;

    if !deleted {
        return Err(ApiError::NotFound("Image not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Image deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_mapping() {
        let conflict = write_error(
            "create category",
            DatabaseError::Duplicate("hotel_categories_slug_key".into()),
            "A category with this slug already exists",
        );
        assert!(matches!(conflict, ApiError::Conflict(m) if m == "A category with this slug already exists"));

        let missing = write_error(
            "create gallery image",
            DatabaseError::MissingReference("gallery_images_category_id_fkey".into()),
            "Image already exists",
        );
        assert!(matches!(missing, ApiError::NotFound(m) if m == "Category not found"));

        let other = write_error(
            "create price",
            DatabaseError::Configuration("pool closed".into()),
            "unused",
        );
        assert!(matches!(other, ApiError::Internal));
        assert_eq!(other.to_string(), "Internal server error");
    }
}
