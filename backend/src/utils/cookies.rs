//! Helpers for the `token` session cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Name of the cookie carrying the session token, shared with the client.
pub const TOKEN_COOKIE: &str = "token";

/// Builds the site-wide session cookie for a freshly issued token.
///
/// Not HttpOnly: the browser client overwrites this cookie itself after
/// every successful sign-in or sign-up.
pub fn token_cookie(token: String, max_age_seconds: u64) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    let max_age = i64::try_from(max_age_seconds).unwrap_or(i64::MAX);
    cookie.set_max_age(time::Duration::seconds(max_age));
    cookie
}

/// Builds the cookie that clears the session. The path must match the one
/// used on creation.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, "");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_cookie_attributes() {
        let cookie = token_cookie("abc".to_string(), 3600);
        let rendered = cookie.to_string();

        assert!(rendered.starts_with("token=abc"));
        assert!(rendered.contains("Path=/"));
        assert!(!rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Max-Age=3600"));
    }

    #[test]
    fn test_token_cookie_max_age_does_not_wrap() {
        let rendered = token_cookie("abc".to_string(), u64::MAX).to_string();
        assert!(!rendered.contains("Max-Age=-"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let rendered = removal_cookie().to_string();
        assert!(rendered.starts_with("token=;"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=0"));
    }
}
