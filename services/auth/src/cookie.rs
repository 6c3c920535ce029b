//! Auth cookie construction

/// Name of the cookie carrying the token
pub const AUTH_COOKIE_NAME: &str = "auth-token";

/// Transport wrapper for the token.
///
/// Always http-only, same-site lax, scoped to `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCookie {
    pub value: String,
    pub secure: bool,
    /// Seconds; 0 clears the cookie
    pub max_age: i64,
}

impl AuthCookie {
    /// Cookie carrying a freshly issued token
    pub fn issue(token: impl Into<String>, secure: bool, max_age: i64) -> Self {
        Self {
            value: token.into(),
            secure,
            max_age,
        }
    }

    /// Cookie instructing the browser to drop the token
    pub fn cleared(secure: bool) -> Self {
        Self {
            value: String::new(),
            secure,
            max_age: 0,
        }
    }

    /// `Set-Cookie` header value
    pub fn header_value(&self) -> String {
        let secure = if self.secure { "; Secure" } else { "" };
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
            AUTH_COOKIE_NAME, self.value, self.max_age, secure
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_cookie_attributes() {
        let cookie = AuthCookie::issue("abc.def.ghi", false, 28_800);
        assert_eq!(
            cookie.header_value(),
            "auth-token=abc.def.ghi; Path=/; Max-Age=28800; HttpOnly; SameSite=Lax"
        );
    }

    #[test]
    fn test_secure_flag() {
        let cookie = AuthCookie::issue("t", true, 28_800);
        assert!(cookie.header_value().ends_with("; Secure"));
    }

    #[test]
    fn test_cleared_cookie() {
        let cookie = AuthCookie::cleared(true);
        assert_eq!(
            cookie.header_value(),
            "auth-token=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax; Secure"
        );
    }
}
