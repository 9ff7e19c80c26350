//! Request dispatcher shared by every edge function.
//!
//! Per request:
//! 1. `OPTIONS` is answered with `ok` and the CORS headers; the function never runs.
//! 2. A service client is built from the state's factory.
//! 3. With `require_auth`, the auth guard must produce an identity first.
//! 4. The function runs with a [`RequestContext`].
//! 5. Any error from steps 2-4 (and any panic) is logged and rendered once
//!    as the JSON error envelope.
//!
//! Successful responses are passed through untouched; functions attach their
//! own CORS headers.

use std::any::Any;
use std::future::Future;

use axum::{
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
    routing::{MethodRouter, any},
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::edge::context::{AuthenticatedContext, PublicContext, RequestContext};
use crate::error::FunctionError;
use crate::middleware::cors;
use crate::services::auth::require_authenticated;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeOptions {
    pub require_auth: bool,
}

impl ServeOptions {
    pub fn public() -> Self {
        Self {
            require_auth: false,
        }
    }

    pub fn authenticated() -> Self {
        Self { require_auth: true }
    }
}

/// Wrap an edge function into a route accepting every method.
pub fn serve_edge_function<H, Fut>(handler: H, options: ServeOptions) -> MethodRouter<AppState>
where
    H: Fn(RequestContext) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, FunctionError>> + Send + 'static,
{
    any(move |State(state): State<AppState>, req: Request| {
        let handler = handler.clone();
        async move { dispatch(&state, handler, options, req).await }
    })
    .layer(CatchPanicLayer::custom(panic_response))
}

async fn dispatch<H, Fut>(
    state: &AppState,
    handler: H,
    options: ServeOptions,
    req: Request,
) -> Response
where
    H: Fn(RequestContext) -> Fut,
    Fut: Future<Output = Result<Response, FunctionError>>,
{
    if req.method() == Method::OPTIONS {
        return cors::preflight();
    }

    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match invoke(state, handler, options, req).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(%method, %path, error = %err, "edge function error");
            err.into_response()
        }
    }
}

async fn invoke<H, Fut>(
    state: &AppState,
    handler: H,
    options: ServeOptions,
    req: Request,
) -> Result<Response, FunctionError>
where
    H: Fn(RequestContext) -> Fut,
    Fut: Future<Output = Result<Response, FunctionError>>,
{
    let service = state.services.create();

    let ctx = if options.require_auth {
        let identity = require_authenticated(&service, req.headers()).await?;
        RequestContext::Authenticated(AuthenticatedContext {
            request: req,
            service,
            identity,
        })
    } else {
        RequestContext::Public(PublicContext {
            request: req,
            service,
        })
    };

    handler(ctx).await
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        Some(s.clone())
    } else {
        payload.downcast_ref::<&str>().map(|s| s.to_string())
    };

    let err = FunctionError::Unexpected(message);
    tracing::error!(error = %err, "edge function panicked");
    err.into_response()
}
