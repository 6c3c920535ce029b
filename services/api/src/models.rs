//! API models for request and response payloads

use serde::Serialize;

pub mod category;
pub mod gallery;
pub mod price;

pub use category::{
    Category, CategoryDetails, CategoryImage, CategoryUpdate, NewCategory, PriceTier, RoomFeature,
    UpdateCategoryRequest,
};
pub use gallery::{GalleryCategoryRef, GalleryImage, NewGalleryImage, UpdateGalleryImage};
pub use price::{NewPrice, Price, PriceCategoryRef, PriceWithCategory};

/// Standard success envelope: `{success: true, data: ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Success envelope without data
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
