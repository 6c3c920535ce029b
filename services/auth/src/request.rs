//! Narrow request/response surface used by the auth service and the route gate

use axum::http::{HeaderMap, HeaderValue, header};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use crate::cookie::{AUTH_COOKIE_NAME, AuthCookie};

/// Header and cookie access, independent of the web framework's request type
pub trait CookieAccess {
    fn header(&self, name: &str) -> Option<&str>;

    fn cookie(&self, name: &str) -> Option<String>;

    fn set_cookie(&mut self, cookie: &AuthCookie);

    /// Token from `Authorization: Bearer`, falling back to the auth cookie.
    /// Empty values count as absent.
    fn auth_token(&self) -> Option<String> {
        let bearer = self
            .header(header::AUTHORIZATION.as_str())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        bearer.or_else(|| self.auth_cookie())
    }

    /// Value of the auth cookie when present and non-empty
    fn auth_cookie(&self) -> Option<String> {
        self.cookie(AUTH_COOKIE_NAME).filter(|value| !value.is_empty())
    }
}

impl CookieAccess for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|value| value.to_str().ok())
    }

    fn cookie(&self, name: &str) -> Option<String> {
        CookieJar::from_headers(self)
            .get(name)
            .map(|cookie| cookie.value().to_string())
    }

    fn set_cookie(&mut self, cookie: &AuthCookie) {
        match HeaderValue::from_str(&cookie.header_value()) {
            Ok(value) => {
                self.append(header::SET_COOKIE, value);
            }
            Err(e) => error!("Refusing to emit invalid Set-Cookie header: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_cookie_lookup() {
        let map = headers(&[("cookie", "theme=dark; auth-token=tok123")]);
        assert_eq!(map.cookie("auth-token"), Some("tok123".to_string()));
        assert_eq!(map.cookie("missing"), None);
        assert_eq!(map.auth_token(), Some("tok123".to_string()));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let map = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "auth-token=from-cookie"),
        ]);
        assert_eq!(map.auth_token(), Some("from-header".to_string()));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let map = headers(&[("authorization", "Bearer "), ("cookie", "auth-token=")]);
        assert_eq!(map.auth_token(), None);
        assert_eq!(map.auth_cookie(), None);
    }

    #[test]
    fn test_non_bearer_authorization_is_ignored() {
        let map = headers(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(map.auth_token(), None);
    }

    #[test]
    fn test_set_cookie_appends_header() {
        let mut map = HeaderMap::new();
        map.set_cookie(&AuthCookie::issue("a", false, 10));
        map.set_cookie(&AuthCookie::cleared(false));
        assert_eq!(map.get_all(header::SET_COOKIE).iter().count(), 2);
    }
}
