//! Gallery image models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Gallery categories shown on the public gallery page
pub const PUBLIC_GALLERY_CATEGORIES: [&str; 3] = ["Exterior", "Rooms", "Amenities"];

/// Categories an admin may file an image under
pub const GALLERY_CATEGORIES: [&str; 4] = ["Exterior", "Rooms", "Dining", "Amenities"];

/// Room category summary embedded in gallery listings
#[derive(Debug, Clone, Serialize)]
pub struct GalleryCategoryRef {
    pub id: i32,
    pub title: String,
    pub slug: String,
}

/// Gallery image with its optional room category
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i32,
    pub category: String,
    pub url: String,
    pub public_id: String,
    pub caption: Option<String>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub hotel_category: Option<GalleryCategoryRef>,
}

/// Registration of an image already hosted by the media provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGalleryImage {
    pub category: String,
    pub url: Option<String>,
    pub public_id: Option<String>,
    pub caption: Option<String>,
    pub category_id: Option<i32>,
}

/// Metadata edit of a gallery image.
///
/// For `caption` and `categoryId` an absent field keeps the stored value and
/// an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryImage {
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub caption: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<i32>>,
}

/// Marks a field that appeared in the body, `null` included
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateGalleryImage = serde_json::from_value(json!({"category": "Rooms"})).unwrap();
        assert_eq!(absent.caption, None);
        assert_eq!(absent.category_id, None);

        let cleared: UpdateGalleryImage =
            serde_json::from_value(json!({"caption": null, "categoryId": null})).unwrap();
        assert_eq!(cleared.caption, Some(None));
        assert_eq!(cleared.category_id, Some(None));

        let set: UpdateGalleryImage =
            serde_json::from_value(json!({"caption": "Lobby", "categoryId": 4})).unwrap();
        assert_eq!(set.caption, Some(Some("Lobby".to_string())));
        assert_eq!(set.category_id, Some(Some(4)));
    }
}
