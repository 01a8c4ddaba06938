//! Browser-client cookie: names the [`ClientId`] whose session a request acts on.
//!
//! The cookie carries a random id only; the Supabase session itself stays in
//! the server-side client. Requests without the cookie act as a fresh client
//! that has no session.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::supabase::types::ClientId;

pub const COOKIE_NAME: &str = "saferent_session";

/// Id from the request cookie, if present and non-empty.
#[must_use]
pub fn client_id(jar: &CookieJar) -> Option<ClientId> {
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(ClientId::new)
}

/// Id from the request cookie, or a new one for a first-time client.
#[must_use]
pub fn client_id_or_new(jar: &CookieJar) -> ClientId {
    client_id(jar).unwrap_or_else(ClientId::generate)
}

/// Attach the client cookie for `id`.
#[must_use]
pub fn remember(jar: CookieJar, id: &ClientId, secure: bool) -> CookieJar {
    let cookie = Cookie::build((COOKIE_NAME, id.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    jar.add(cookie)
}

/// Expire the client cookie.
#[must_use]
pub fn forget(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO);
    jar.add(cookie)
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
