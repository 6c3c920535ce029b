//! Price tier models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Price row
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: i32,
    pub category_id: i32,
    pub hourly_hours: i32,
    pub rate_cents: i32,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Category summary embedded in price listings
#[derive(Debug, Clone, Serialize)]
pub struct PriceCategoryRef {
    pub id: i32,
    pub title: String,
    pub slug: String,
}

/// Price joined with its category
#[derive(Debug, Clone, Serialize)]
pub struct PriceWithCategory {
    #[serde(flatten)]
    pub price: Price,
    pub category: PriceCategoryRef,
}

/// New price payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrice {
    pub category_id: i32,
    pub hourly_hours: i32,
    pub rate_cents: i32,
    pub label: Option<String>,
}
