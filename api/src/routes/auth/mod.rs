//! Session route handlers
//!
//! - Login (regular and admin client)
//! - Logout
//! - Refresh token rotation
//! - Access token reissue
//! - Session identity lookup

pub mod access;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod session;

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use ink_shared::config::CookieConfig;

fn parse_same_site(value: &str) -> SameSite {
    match value {
        "Lax" => SameSite::Lax,
        "None" => SameSite::None,
        _ => SameSite::Strict,
    }
}

/// Build the hardened cookie carrying a refresh token
pub(crate) fn refresh_cookie(config: &CookieConfig, token: &str) -> Cookie<'static> {
    Cookie::build(config.name.clone(), token.to_string())
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(parse_same_site(&config.same_site))
        .max_age(Duration::seconds(config.max_age))
        .finish()
}

/// Build an expired cookie that clears the refresh token
pub(crate) fn clear_refresh_cookie(config: &CookieConfig) -> Cookie<'static> {
    Cookie::build(config.name.clone(), String::new())
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(parse_same_site(&config.same_site))
        .max_age(Duration::ZERO)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_is_hardened() {
        let config = CookieConfig::default();
        let cookie = refresh_cookie(&config, "token-value");

        assert_eq!(cookie.name(), "inkwell_refresh");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let config = CookieConfig::default();
        let cookie = clear_refresh_cookie(&config);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
