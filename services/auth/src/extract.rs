//! Extractor giving privileged handlers a fully authorized admin

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    error::AuthError,
    request::CookieAccess,
    service::{AuthService, AuthenticatedAdmin},
};

/// Admin resolved through [`AuthService::authorize`]; rejects with 401
#[derive(Debug, Clone)]
pub struct AdminAuth(pub AuthenticatedAdmin);

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthService::from_ref(state);
        let token = parts.headers.auth_token();
        auth.authorize(token.as_deref()).await.map(AdminAuth)
    }
}
