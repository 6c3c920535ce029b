//! Repositories for catalog database operations

pub mod category;
pub mod feature;
pub mod gallery;
pub mod price;

pub use category::CategoryRepository;
pub use feature::FeatureRepository;
pub use gallery::GalleryRepository;
pub use price::PriceRepository;
