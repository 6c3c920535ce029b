use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use auth::{
    AuthService, RouteGate,
    clock::SystemClock,
    config::{Environment, TokenConfig},
    jwt::TokenCodec,
    repositories::{PgAdminStore, PgSessionStore},
};
use common::{
    database::{DatabaseConfig, health_check, init_pool},
    error::DatabaseError,
    telemetry::init_tracing,
};
use sqlx::PgPool;
use tokio::net::TcpListener;

use api::{config::ServerConfig, routes, scheduler, state::AppState};

const DEFAULT_ADMIN_EMAIL: &str = "admin@hotel.local";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let environment = Environment::from_env();
    info!("Starting hotel API ({:?})", environment);

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    let token_config = TokenConfig::from_env(environment)?;
    let auth = build_auth_service(&pool, &token_config, environment);

    if std::env::args().nth(1).as_deref() == Some("seed") {
        return seed_admin(&auth).await;
    }

    let server_config = ServerConfig::from_env();
    let _sweeper = scheduler::start_session_sweep(auth.clone(), &server_config.sweep_schedule).await?;

    let app = routes::create_router(AppState::new(pool, auth, RouteGate::default()));

    let listener = TcpListener::bind(&server_config.addr).await?;
    info!("Hotel API listening on {}", server_config.addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_auth_service(pool: &PgPool, token_config: &TokenConfig, environment: Environment) -> AuthService {
    AuthService::new(
        Arc::new(PgAdminStore::new(pool.clone())),
        Arc::new(PgSessionStore::new(pool.clone())),
        TokenCodec::new(token_config),
        Arc::new(SystemClock),
        environment.is_production(),
    )
}

/// Provision the initial admin from `ADMIN_EMAIL` / `ADMIN_PASSWORD`
async fn seed_admin(auth: &AuthService) -> Result<()> {
    let email = std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| {
        warn!("ADMIN_EMAIL not set, using {}", DEFAULT_ADMIN_EMAIL);
        DEFAULT_ADMIN_EMAIL.to_string()
    });
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        warn!("ADMIN_PASSWORD not set, using the default password; change it before going live");
        DEFAULT_ADMIN_PASSWORD.to_string()
    });

    auth::validation::validate_email(&email).map_err(anyhow::Error::msg)?;
    auth::validation::validate_new_password(&password).map_err(anyhow::Error::msg)?;

    match auth.provision_admin(&email, &password).await? {
        Some(admin) => info!("Created admin {} ({})", admin.id, admin.email),
        None => info!("Admin {} already exists, nothing to do", email),
    }

    Ok(())
}
