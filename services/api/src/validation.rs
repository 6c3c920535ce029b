//! Input validation for catalog writes

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{
    CategoryUpdate, NewCategory, NewGalleryImage, NewPrice, UpdateCategoryRequest,
    UpdateGalleryImage, gallery::GALLERY_CATEGORIES,
};

/// Most price tiers a category update may carry
pub const MAX_PRICE_TIERS: usize = 4;

fn slug_pattern() -> &'static Regex {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    SLUG_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9-]+$").expect("Failed to compile slug regex"))
}

/// Derive a URL slug from a title
pub fn slugify(title: &str) -> String {
    static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATOR_REGEX
        .get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Failed to compile separator regex"));

    separators
        .replace_all(&title.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Validate slug
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("Slug is required".to_string());
    }

    if !slug_pattern().is_match(slug) {
        return Err(
            "Slug must contain only lowercase letters, numbers, and hyphens".to_string(),
        );
    }

    Ok(())
}

fn validate_room_count(room_count: i32) -> Result<(), String> {
    if room_count < 0 {
        return Err("Room count must be non-negative".to_string());
    }
    Ok(())
}

fn validate_max_occupancy(max_occupancy: Option<i32>) -> Result<(), String> {
    match max_occupancy {
        Some(n) if n < 1 => Err("Max occupancy must be at least 1".to_string()),
        _ => Ok(()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate a new category and resolve its slug
pub fn validate_new_category(payload: &NewCategory) -> Result<String, String> {
    if payload.title.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    let slug = match payload.slug.as_deref().filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(&payload.title),
    };

    validate_slug(&slug)?;
    validate_room_count(payload.room_count)?;
    validate_max_occupancy(payload.max_occupancy)?;

    Ok(slug)
}

/// Turn an update request into the changes to apply.
///
/// Blank strings and an empty `specs` object are treated as absent.
pub fn validate_category_update(payload: UpdateCategoryRequest) -> Result<CategoryUpdate, String> {
    let title = non_empty(payload.title);
    let slug = non_empty(payload.slug);

    if let Some(slug) = &slug {
        validate_slug(slug)?;
    }
    if let Some(room_count) = payload.room_count {
        validate_room_count(room_count)?;
    }
    validate_max_occupancy(payload.max_occupancy)?;

    let specs = match payload.specs {
        Some(patch) => {
            let value = serde_json::to_value(patch).map_err(|e| e.to_string())?;
            let is_empty = value.as_object().is_none_or(|map| map.is_empty());
            (!is_empty).then_some(value)
        }
        None => None,
    };

    let prices = match payload.prices {
        Some(mut tiers) => {
            tiers.truncate(MAX_PRICE_TIERS);
            for tier in &tiers {
                validate_tier(tier.hourly_hours, tier.rate_cents)?;
            }
            Some(tiers)
        }
        None => None,
    };

    Ok(CategoryUpdate {
        title,
        slug,
        description: non_empty(payload.description),
        room_count: payload.room_count,
        bed_type: non_empty(payload.bed_type),
        max_occupancy: payload.max_occupancy,
        room_size: non_empty(payload.room_size),
        specs,
        essential_amenities: payload.essential_amenities,
        video_url: non_empty(payload.video_url),
        prices,
    })
}

fn validate_tier(hourly_hours: i32, rate_cents: i32) -> Result<(), String> {
    if hourly_hours <= 0 {
        return Err("Hours must be positive".to_string());
    }
    if rate_cents <= 0 {
        return Err("Rate must be positive".to_string());
    }
    Ok(())
}

/// Validate a new price
pub fn validate_new_price(payload: &NewPrice) -> Result<(), String> {
    if payload.category_id <= 0 {
        return Err("Category ID must be positive".to_string());
    }
    validate_tier(payload.hourly_hours, payload.rate_cents)
}

/// Validate a gallery category name
pub fn validate_gallery_category(category: &str) -> Result<(), String> {
    if !GALLERY_CATEGORIES.contains(&category) {
        return Err(format!(
            "Category must be one of: {}",
            GALLERY_CATEGORIES.join(", ")
        ));
    }
    Ok(())
}

/// Validate an image registration
pub fn validate_new_gallery_image(payload: &NewGalleryImage) -> Result<(), String> {
    let has_url = payload.url.as_deref().is_some_and(|u| !u.is_empty());
    let has_public_id = payload.public_id.as_deref().is_some_and(|p| !p.is_empty());
    if !has_url || !has_public_id {
        return Err("URL and public ID are required".to_string());
    }

    validate_gallery_category(&payload.category)
}

/// Validate an image metadata edit
pub fn validate_gallery_update(payload: &UpdateGalleryImage) -> Result<(), String> {
    if let Some(category) = &payload.category {
        validate_gallery_category(category)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceTier;

    fn new_category(title: &str, slug: Option<&str>) -> NewCategory {
        NewCategory {
            title: title.to_string(),
            slug: slug.map(str::to_string),
            description: None,
            room_count: 3,
            bed_type: None,
            max_occupancy: Some(2),
            room_size: None,
            specs: None,
            essential_amenities: Vec::new(),
            video_url: None,
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Deluxe Room"), "deluxe-room");
        assert_eq!(slugify("  Suite #1 -- Sea View! "), "suite-1-sea-view");
        assert_eq!(slugify("ÉTAGE"), "tage");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("deluxe-room-2").is_ok());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Deluxe").is_err());
        assert!(validate_slug("deluxe room").is_err());
    }

    #[test]
    fn test_new_category_slug_resolution() {
        assert_eq!(
            validate_new_category(&new_category("Family Suite", None)),
            Ok("family-suite".to_string())
        );
        assert_eq!(
            validate_new_category(&new_category("Family Suite", Some("fam"))),
            Ok("fam".to_string())
        );
        assert_eq!(
            validate_new_category(&new_category("Family Suite", Some(""))),
            Ok("family-suite".to_string())
        );
    }

    #[test]
    fn test_new_category_rejections() {
        assert_eq!(
            validate_new_category(&new_category("  ", None)),
            Err("Title is required".to_string())
        );
        assert_eq!(
            validate_new_category(&new_category("***", None)),
            Err("Slug is required".to_string())
        );
        assert!(validate_new_category(&new_category("Suite", Some("Bad Slug"))).is_err());

        let mut negative = new_category("Suite", None);
        negative.room_count = -1;
        assert_eq!(
            validate_new_category(&negative),
            Err("Room count must be non-negative".to_string())
        );

        let mut empty = new_category("Suite", None);
        empty.max_occupancy = Some(0);
        assert_eq!(
            validate_new_category(&empty),
            Err("Max occupancy must be at least 1".to_string())
        );
    }

    #[test]
    fn test_category_update_drops_blank_fields() {
        let request = UpdateCategoryRequest {
            title: Some("".to_string()),
            description: Some("   ".to_string()),
            bed_type: Some("King".to_string()),
            specs: Some(Default::default()),
            ..Default::default()
        };

        let update = validate_category_update(request).unwrap();
        assert!(update.title.is_none());
        assert!(update.description.is_none());
        assert_eq!(update.bed_type.as_deref(), Some("King"));
        assert!(update.specs.is_none());
        assert!(update.prices.is_none());
    }

    #[test]
    fn test_category_update_specs_keep_only_given_keys() {
        let request: UpdateCategoryRequest =
            serde_json::from_value(serde_json::json!({"specs": {"wifi": true, "tv": false}}))
                .unwrap();

        let update = validate_category_update(request).unwrap();
        assert_eq!(
            update.specs,
            Some(serde_json::json!({"wifi": true, "tv": false}))
        );
    }

    #[test]
    fn test_category_update_caps_price_tiers() {
        let tiers = (1..=6)
            .map(|h| PriceTier {
                hourly_hours: h,
                rate_cents: 1000 * h,
                label: None,
            })
            .collect();
        let request = UpdateCategoryRequest {
            prices: Some(tiers),
            ..Default::default()
        };

        let update = validate_category_update(request).unwrap();
        let prices = update.prices.unwrap();
        assert_eq!(prices.len(), MAX_PRICE_TIERS);
        assert_eq!(prices[3].hourly_hours, 4);
    }

    #[test]
    fn test_category_update_rejects_bad_values() {
        let request = UpdateCategoryRequest {
            slug: Some("Not A Slug".to_string()),
            ..Default::default()
        };
        assert!(validate_category_update(request).is_err());

        let request = UpdateCategoryRequest {
            prices: Some(vec![PriceTier {
                hourly_hours: 0,
                rate_cents: 100,
                label: None,
            }]),
            ..Default::default()
        };
        assert_eq!(
            validate_category_update(request).unwrap_err(),
            "Hours must be positive"
        );
    }

    #[test]
    fn test_validate_new_price() {
        let price = |category_id, hourly_hours, rate_cents| NewPrice {
            category_id,
            hourly_hours,
            rate_cents,
            label: None,
        };

        assert!(validate_new_price(&price(1, 2, 50000)).is_ok());
        assert_eq!(
            validate_new_price(&price(0, 2, 50000)).unwrap_err(),
            "Category ID must be positive"
        );
        assert_eq!(
            validate_new_price(&price(1, 0, 50000)).unwrap_err(),
            "Hours must be positive"
        );
        assert_eq!(
            validate_new_price(&price(1, 2, -5)).unwrap_err(),
            "Rate must be positive"
        );
    }

    #[test]
    fn test_validate_gallery_images() {
        let image = |category: &str, url: Option<&str>, public_id: Option<&str>| NewGalleryImage {
            category: category.to_string(),
            url: url.map(str::to_string),
            public_id: public_id.map(str::to_string),
            caption: None,
            category_id: None,
        };

        assert!(validate_new_gallery_image(&image("Dining", Some("https://cdn/x.jpg"), Some("x"))).is_ok());
        assert_eq!(
            validate_new_gallery_image(&image("Rooms", None, Some("x"))).unwrap_err(),
            "URL and public ID are required"
        );
        assert_eq!(
            validate_new_gallery_image(&image("Rooms", Some("https://cdn/x.jpg"), Some(""))).unwrap_err(),
            "URL and public ID are required"
        );
        assert!(validate_new_gallery_image(&image("Lobby", Some("https://cdn/x.jpg"), Some("x"))).is_err());

        let update = UpdateGalleryImage {
            category: Some("Spa".to_string()),
            ..Default::default()
        };
        assert!(validate_gallery_update(&update).is_err());
        assert!(validate_gallery_update(&UpdateGalleryImage::default()).is_ok());
    }
}
