//! Shared CORS header set for browser clients.
//!
//! Note:
//! - These headers are not applied as a router layer. The dispatcher answers
//!   preflight requests with them and error envelopes carry them, but success
//!   responses only get them when the function builds its response with
//!   [`json`].
//! - Origin is a wildcard and credentials are never allowed.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// The CORS headers every edge function response should carry.
pub fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers
}

/// Fixed answer to a CORS preflight (`OPTIONS`).
pub fn preflight() -> Response {
    (StatusCode::OK, cors_headers(), "ok").into_response()
}

/// `200 OK` JSON response with the CORS headers attached.
pub fn json<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, cors_headers(), Json(body)).into_response()
}
