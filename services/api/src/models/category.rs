//! Room category models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Price;

/// Room category row
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub specs: serde_json::Value,
    pub essential_amenities: Vec<String>,
    pub bed_type: Option<String>,
    pub max_occupancy: Option<i32>,
    pub room_size: Option<String>,
    pub video_url: Option<String>,
    pub room_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image summary attached to a category
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryImage {
    pub id: i32,
    pub url: String,
    pub caption: Option<String>,
    #[serde(skip)]
    pub category_id: Option<i32>,
}

/// Category with its price tiers and images
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDetails {
    #[serde(flatten)]
    pub category: Category,
    pub prices: Vec<Price>,
    pub images: Vec<CategoryImage>,
}

/// Room amenity flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpecs {
    pub ac: bool,
    pub wifi: bool,
    pub tv: bool,
    pub geyser: bool,
    pub cctv: bool,
    pub parking: bool,
    pub attached: bool,
}

/// Partial amenity flags for updates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomSpecsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ac: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geyser: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cctv: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attached: Option<bool>,
}

/// New category payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub room_count: i32,
    pub bed_type: Option<String>,
    pub max_occupancy: Option<i32>,
    pub room_size: Option<String>,
    pub specs: Option<RoomSpecs>,
    #[serde(default)]
    pub essential_amenities: Vec<String>,
    pub video_url: Option<String>,
}

/// Price tier inside a category update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub hourly_hours: i32,
    pub rate_cents: i32,
    pub label: Option<String>,
}

/// Category update request: optional fields plus an optional price list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub room_count: Option<i32>,
    pub bed_type: Option<String>,
    pub max_occupancy: Option<i32>,
    pub room_size: Option<String>,
    pub specs: Option<RoomSpecsPatch>,
    pub essential_amenities: Option<Vec<String>>,
    pub video_url: Option<String>,
    pub prices: Option<Vec<PriceTier>>,
}

/// Validated category changes, ready for the repository
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub room_count: Option<i32>,
    pub bed_type: Option<String>,
    pub max_occupancy: Option<i32>,
    pub room_size: Option<String>,
    pub specs: Option<serde_json::Value>,
    pub essential_amenities: Option<Vec<String>>,
    pub video_url: Option<String>,
    pub prices: Option<Vec<PriceTier>>,
}

/// Room feature row
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoomFeature {
    pub id: i32,
    pub key: String,
    pub label: String,
    pub category: String,
    pub sort_order: i32,
    pub is_active: bool,
}
