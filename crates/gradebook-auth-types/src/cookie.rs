//! Access-token cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "gradebook_access_token";

/// Access-token lifetime in seconds (1 day). Also used as the cookie Max-Age.
pub const ACCESS_TOKEN_EXP: u64 = 86_400;

/// Set the access-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use gradebook_auth_types::cookie::{set_access_token_cookie, ACCESS_TOKEN_COOKIE};
///
/// let jar = set_access_token_cookie(CookieJar::new(), "token_value".to_string(), true);
/// let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86_400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_access_token_cookie(jar: CookieJar, value: String, secure: bool) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(ACCESS_TOKEN_EXP as i64))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Expire the access-token cookie.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use gradebook_auth_types::cookie::{
///     clear_access_token_cookie, set_access_token_cookie, ACCESS_TOKEN_COOKIE,
/// };
///
/// let jar = set_access_token_cookie(CookieJar::new(), "a".to_string(), false);
/// let jar = clear_access_token_cookie(jar, false);
/// let cookie = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.value(), "");
/// ```
pub fn clear_access_token_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
