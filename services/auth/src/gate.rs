//! Route gate: cookie-presence check in front of protected paths
//!
//! This is a shallow filter. It only keeps obviously unauthenticated
//! requests away from protected handlers; those handlers still call
//! [`crate::AuthService::authorize`] for the authoritative check.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::request::CookieAccess;

/// Route gate configuration
#[derive(Debug, Clone)]
pub struct RouteGateConfig {
    /// Path prefixes that require the auth cookie
    pub protected_prefixes: Vec<String>,
    /// Exact paths that always pass
    pub allow_list: Vec<String>,
    /// Where unauthenticated navigations are sent
    pub login_path: String,
}

impl Default for RouteGateConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/admin/dashboard".to_string(), "/api/admin".to_string()],
            allow_list: vec!["/admin/login".to_string(), "/api/auth".to_string()],
            login_path: "/admin/login".to_string(),
        }
    }
}

/// Outcome of gating one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Allow-listed or unprotected path
    Public,
    /// Protected path with the cookie present; the handler decides
    Deferred,
    /// Protected path without the cookie
    Redirect(String),
}

/// Route gate
#[derive(Debug, Clone, Default)]
pub struct RouteGate {
    config: RouteGateConfig,
}

impl RouteGate {
    pub fn new(config: RouteGateConfig) -> Self {
        Self { config }
    }

    /// Decide what happens to a request for `path`
    pub fn decide(&self, path: &str, request: &impl CookieAccess) -> GateDecision {
        if self.config.allow_list.iter().any(|allowed| allowed == path) {
            return GateDecision::Public;
        }

        let protected = self
            .config
            .protected_prefixes
            .iter()
            .any(|prefix| matches_prefix(path, prefix));
        if !protected {
            return GateDecision::Public;
        }

        match request.auth_cookie() {
            Some(_) => GateDecision::Deferred,
            None => GateDecision::Redirect(self.config.login_path.clone()),
        }
    }
}

/// Segment-aware prefix match: `/api/admin` covers `/api/admin` and
/// `/api/admin/...` but not `/api/administrator`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Axum middleware applying the route gate
pub async fn route_gate(State(gate): State<Arc<RouteGate>>, request: Request, next: Next) -> Response {
    match gate.decide(request.uri().path(), request.headers()) {
        GateDecision::Public | GateDecision::Deferred => next.run(request).await,
        GateDecision::Redirect(location) => {
            info!("Redirecting unauthenticated request for {}", request.uri().path());
            Redirect::temporary(&location).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_protected_without_cookie_redirects() {
        let gate = RouteGate::default();
        let none = HeaderMap::new();

        for path in ["/admin/dashboard", "/admin/dashboard/rooms", "/api/admin/categories"] {
            assert_eq!(
                gate.decide(path, &none),
                GateDecision::Redirect("/admin/login".to_string()),
                "{path}"
            );
        }
    }

    #[test]
    fn test_protected_with_cookie_is_deferred() {
        let gate = RouteGate::default();
        let headers = with_cookie("auth-token=anything");
        assert_eq!(gate.decide("/api/admin/prices", &headers), GateDecision::Deferred);
    }

    #[test]
    fn test_empty_cookie_counts_as_absent() {
        let gate = RouteGate::default();
        let headers = with_cookie("auth-token=");
        assert!(matches!(
            gate.decide("/admin/dashboard", &headers),
            GateDecision::Redirect(_)
        ));
    }

    #[test]
    fn test_allow_list_is_never_redirected() {
        let gate = RouteGate::new(RouteGateConfig {
            protected_prefixes: vec!["/admin".to_string(), "/api".to_string()],
            ..RouteGateConfig::default()
        });

        for headers in [HeaderMap::new(), with_cookie("auth-token=x")] {
            assert_eq!(gate.decide("/admin/login", &headers), GateDecision::Public);
            assert_eq!(gate.decide("/api/auth", &headers), GateDecision::Public);
        }
    }

    #[test]
    fn test_unprotected_paths_pass() {
        let gate = RouteGate::default();
        let none = HeaderMap::new();

        for path in ["/", "/rooms", "/api/categories", "/api/administrator", "/admin"] {
            assert_eq!(gate.decide(path, &none), GateDecision::Public, "{path}");
        }
    }
}
