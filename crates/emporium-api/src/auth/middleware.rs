//! Admin session gate
//!
//! Session issuance lives elsewhere; this only checks the marker cookie it leaves behind.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use emporium_core::constants::ADMIN_SESSION_SENTINEL;
use emporium_core::AppError;

use crate::constants::UNAUTHORIZED_MESSAGE;
use crate::error::HttpAppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Authorized,
    Denied,
}

/// Read a cookie value from the `Cookie` headers
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim())
}

/// Authorized only when cookie `cookie_name` is present and equals the sentinel.
pub fn check_admin_session(headers: &HeaderMap, cookie_name: &str) -> AccessDecision {
    match cookie_value(headers, cookie_name) {
        Some(value) if value == ADMIN_SESSION_SENTINEL => AccessDecision::Authorized,
        _ => AccessDecision::Denied,
    }
}

/// Reject the request with 401 before the body is read unless the admin marker is set.
pub async fn require_admin_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let cookie_name = &state.upload_config.admin_session_cookie;

    match check_admin_session(request.headers(), cookie_name) {
        AccessDecision::Authorized => next.run(request).await,
        AccessDecision::Denied => {
            tracing::warn!(
                path = %request.uri().path(),
                cookie = %cookie_name,
                "Rejected request without admin session"
            );
            HttpAppError(AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_marker_true_is_authorized() {
        assert_eq!(
            check_admin_session(&headers("admin_authenticated=true"), "admin_authenticated"),
            AccessDecision::Authorized
        );
    }

    #[test]
    fn test_marker_among_other_cookies() {
        assert_eq!(
            check_admin_session(
                &headers("theme=dark; admin_authenticated=true; cart=3"),
                "admin_authenticated"
            ),
            AccessDecision::Authorized
        );
    }

    #[test]
    fn test_missing_or_mismatched_marker_is_denied() {
        assert_eq!(
            check_admin_session(&HeaderMap::new(), "admin_authenticated"),
            AccessDecision::Denied
        );
        assert_eq!(
            check_admin_session(&headers("admin_authenticated=false"), "admin_authenticated"),
            AccessDecision::Denied
        );
        assert_eq!(
            check_admin_session(&headers("admin_authenticated=TRUE"), "admin_authenticated"),
            AccessDecision::Denied
        );
        assert_eq!(
            check_admin_session(&headers("not_admin_authenticated=true"), "admin_authenticated"),
            AccessDecision::Denied
        );
    }
}
