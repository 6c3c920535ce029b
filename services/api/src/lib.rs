//! Hotel website backend: public catalog, admin catalog management and the
//! admin auth endpoints, composed into one axum router.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod scheduler;
pub mod state;
pub mod validation;
