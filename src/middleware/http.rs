//! Transport layers wrapped around every route, `/health` included.
//!
//! Every layer here is infallible, so the stack needs no `HandleErrorLayer`:
//! an oversized body is answered with 413 by the limit layer itself, and
//! function failures are rendered by the dispatcher before reaching this
//! stack. Outbound calls to GoTrue and upstream APIs have no deadline, so
//! there is no timeout layer either.

use axum::Router;
use axum::http::header::HeaderName;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const REQUEST_BODY_LIMIT: usize = 1024 * 1024;

/// Adds `x-request-id` (generated when absent, echoed on the response),
/// a 1 MiB request body limit and request tracing.
pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(REQUEST_BODY_LIMIT))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}
