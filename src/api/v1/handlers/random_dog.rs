/*
 * Responsibility
 * - /random-dog: forward one GET to the random-dog upstream and return its JSON as-is
 * - only GET is accepted (OPTIONS never reaches here)
 * - the upstream client is injected so tests can stub it
 */
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{http::Method, response::Response, routing::MethodRouter};
use serde_json::value::RawValue;
use url::Url;

use crate::edge::{RequestContext, ServeOptions, serve_edge_function};
use crate::error::FunctionError;
use crate::middleware::cors;
use crate::services::upstream::UpstreamClient;
use crate::state::AppState;

pub const ONLY_GET: &str = "only GET is supported";

pub fn route(upstream: Arc<dyn UpstreamClient>, upstream_url: Url) -> MethodRouter<AppState> {
    serve_edge_function(
        move |ctx| random_dog(ctx, upstream.clone(), upstream_url.clone()),
        ServeOptions::public(),
    )
}

pub async fn random_dog(
    ctx: RequestContext,
    upstream: Arc<dyn UpstreamClient>,
    upstream_url: Url,
) -> Result<Response, FunctionError> {
    let started_at = Instant::now();
    let method = ctx.request().method().clone();
    let request_uri = ctx.request().uri().to_string();

    if method != Method::GET {
        tracing::warn!(%method, uri = %request_uri, "random-dog: rejected non-GET request");
        return Err(FunctionError::invalid_request(ONLY_GET));
    }

    tracing::info!(
        upstream = %upstream_url,
        uri = %request_uri,
        %method,
        "random-dog: calling upstream"
    );

    let res = upstream.get(&upstream_url).await?;

    tracing::info!(
        status = res.status.as_u16(),
        ok = res.status.is_success(),
        elapsed_ms = started_at.elapsed().as_millis() as u64,
        "random-dog: upstream responded"
    );

    if !res.status.is_success() {
        return Err(FunctionError::UpstreamStatus {
            status: res.status.as_u16(),
        });
    }

    // Validated as JSON but forwarded byte for byte (key order, number formatting).
    let data: Box<RawValue> =
        serde_json::from_slice(&res.body).context("upstream returned invalid JSON")?;
    tracing::info!(payload = %data.get(), "random-dog: returning upstream payload");

    Ok(cors::json(data))
}
