//! Public catalog endpoints

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    error::ApiError,
    models::{DataResponse, GalleryImage, gallery::PUBLIC_GALLERY_CATEGORIES},
    state::AppState,
};

/// Query for the public price list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    pub category_id: Option<i32>,
}

/// Query for the public gallery
#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

/// Gallery listing with the categories a visitor can filter by
#[derive(Serialize)]
pub struct GalleryResponse {
    pub success: bool,
    pub data: Vec<GalleryImage>,
    pub categories: [&'static str; 3],
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:slug", get(get_category))
        .route("/api/prices", get(list_prices))
        .route("/api/gallery", get(list_gallery))
        .route("/api/room-features", get(list_room_features))
}

/// All room categories with prices and images
pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories = state.categories.list_with_details().await.map_err(|e| {
        error!("Failed to fetch categories: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(DataResponse::new(categories)))
}

/// One room category by slug
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .categories
        .find_by_slug(&slug)
        .await
        .map_err(|e| {
            error!("Failed to fetch category {}: {}", slug, e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    Ok(Json(DataResponse::new(category)))
}

/// Price list, optionally for one category
pub async fn list_prices(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let prices = state.prices.list(query.category_id).await.map_err(|e| {
        error!("Failed to fetch prices: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(DataResponse::new(prices)))
}

/// Gallery images; an unknown category filter lists everything
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query
        .category
        .as_deref()
        .filter(|category| PUBLIC_GALLERY_CATEGORIES.contains(category));

    let images = state.gallery.list(filter).await.map_err(|e| {
        error!("Failed to fetch gallery images: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(GalleryResponse {
        success: true,
        data: images,
        categories: PUBLIC_GALLERY_CATEGORIES,
    }))
}

/// Active room features
pub async fn list_room_features(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let features = state.features.list_active().await.map_err(|e| {
        error!("Failed to fetch room features: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(DataResponse::new(features)))
}
