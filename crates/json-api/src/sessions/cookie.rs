//! Session cookie construction.

use salvo::http::cookie::{Cookie, SameSite};

use crate::state::SessionSettings;

/// An HTTP-only, `SameSite=Lax` cookie carrying the session token.
pub(crate) fn session_cookie(settings: &SessionSettings, token: String) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build()
}

/// An empty, already-expired cookie that makes the browser drop the session.
pub(crate) fn cleared_cookie(settings: &SessionSettings) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .removal()
        .build()
}
