//! Cookie jar for the three continuity tokens
//!
//! Reads the visitor, session, and location-hint cookies off an incoming
//! request and writes refreshed values onto the outgoing response. Any token
//! the decisioning service returns must reach the response before it is
//! sent; a dropped write desynchronizes the visitor from their assigned
//! experience on the next request.

use axum_extra::extract::cookie::{Cookie, CookieJar};
use cookie::time::Duration;

use crate::types::{RefreshedTokens, SessionTokens, TokenCookie};
use crate::{LOCATION_HINT_COOKIE_NAME, SESSION_COOKIE_NAME, VISITOR_COOKIE_PREFIX};

/// Cookie name for the visitor token, keyed by the organization id
///
/// The `@` in the organization id is carried percent-encoded, matching the
/// name the client-side visitor library writes.
pub fn visitor_cookie_name(organization_id: &str) -> String {
    format!(
        "{}{}",
        VISITOR_COOKIE_PREFIX,
        organization_id.replace('@', "%40")
    )
}

/// Read the three continuity tokens off an incoming request
///
/// Missing cookies yield `None` fields, never an error. Values are opaque
/// and pass through verbatim, malformed or not.
pub fn read_tokens(jar: &CookieJar, organization_id: &str) -> SessionTokens {
    SessionTokens {
        visitor: jar
            .get(&visitor_cookie_name(organization_id))
            .map(|c| c.value().to_string()),
        session: jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string()),
        location_hint: jar
            .get(LOCATION_HINT_COOKIE_NAME)
            .map(|c| c.value().to_string()),
    }
}

/// Write refreshed tokens onto the outgoing response
///
/// Each present token becomes one cookie with the lifetime the service
/// asked for. An absent token is a no-op: it never clears an existing
/// cookie.
pub fn write_tokens(
    mut jar: CookieJar,
    refreshed: &RefreshedTokens,
    organization_id: &str,
) -> CookieJar {
    jar = save_cookie(
        jar,
        visitor_cookie_name(organization_id),
        refreshed.visitor.as_ref(),
    );
    jar = save_cookie(jar, SESSION_COOKIE_NAME.to_string(), refreshed.session.as_ref());
    jar = save_cookie(
        jar,
        LOCATION_HINT_COOKIE_NAME.to_string(),
        refreshed.location_hint.as_ref(),
    );
    jar
}

fn save_cookie(jar: CookieJar, name: String, token: Option<&TokenCookie>) -> CookieJar {
    let Some(token) = token else {
        return jar;
    };

    let cookie = Cookie::build((name, token.value.clone()))
        .max_age(Duration::seconds(token.max_age_secs as i64))
        .path("/")
        .build();
    jar.add(cookie)
}
