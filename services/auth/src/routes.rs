//! `/api/auth` routes: login, logout and session probe

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    cookie::AuthCookie,
    error::AuthError,
    extract::AdminAuth,
    models::{AdminSummary, LoginCredentials},
    request::CookieAccess,
    service::AuthService,
    validation,
};

/// Response for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminSummary,
}

/// Response for logout
#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Response for the session probe
#[derive(Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub admin: AdminSummary,
}

/// Create the router for the auth endpoints
pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AuthService: axum::extract::FromRef<S>,
{
    Router::new().route("/api/auth", post(login).delete(logout).get(session))
}

/// Admin login endpoint
pub async fn login(
    State(auth): State<AuthService>,
    payload: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(credentials) = payload.map_err(|e| {
        warn!("Malformed login request: {}", e);
        AuthError::Internal
    })?;

    validation::validate_login(&credentials).map_err(|e| {
        warn!("Invalid login request: {}", e);
        AuthError::Internal
    })?;

    info!("Login attempt for admin: {}", credentials.email);

    let admin = auth
        .authenticate(&credentials.email, &credentials.password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let issued = auth.create_session(&admin).await?;

    let mut headers = HeaderMap::new();
    headers.set_cookie(&AuthCookie::issue(
        issued.token,
        auth.secure_cookies(),
        auth.session_ttl_seconds(),
    ));

    // Maintenance only; the response does not wait for it.
    auth.spawn_session_cleanup();

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse {
            success: true,
            admin: admin.summary(),
        }),
    ))
}

/// Logout endpoint. Always succeeds and clears the cookie.
pub async fn logout(State(auth): State<AuthService>, request_headers: HeaderMap) -> impl IntoResponse {
    let token = request_headers.auth_token();
    if let Ok(admin) = auth.authorize(token.as_deref()).await
        && let Err(e) = auth.invalidate_all_sessions(admin.id).await
    {
        error!("Logout could not invalidate sessions for admin {}: {}", admin.id, e);
    }

    let mut headers = HeaderMap::new();
    headers.set_cookie(&AuthCookie::cleared(auth.secure_cookies()));

    (
        StatusCode::OK,
        headers,
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// Report the admin behind the presented token
pub async fn session(AdminAuth(admin): AdminAuth) -> impl IntoResponse {
    Json(SessionResponse {
        authenticated: true,
        admin: admin.summary(),
    })
}
