//! Application state shared across handlers

use std::sync::Arc;

use auth::{AuthService, RouteGate};
use axum::extract::FromRef;
use sqlx::PgPool;

use crate::repositories::{
    CategoryRepository, FeatureRepository, GalleryRepository, PriceRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub gate: Arc<RouteGate>,
    pub categories: CategoryRepository,
    pub prices: PriceRepository,
    pub gallery: GalleryRepository,
    pub features: FeatureRepository,
}

impl AppState {
    /// Build the repositories around one pool
    pub fn new(db_pool: PgPool, auth: AuthService, gate: RouteGate) -> Self {
        Self {
            categories: CategoryRepository::new(db_pool.clone()),
            prices: PriceRepository::new(db_pool.clone()),
            gallery: GalleryRepository::new(db_pool.clone()),
            features: FeatureRepository::new(db_pool),
            gate: Arc::new(gate),
            auth,
        }
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
