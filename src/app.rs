/*
 * Responsibility
 * - tracing / panic hook setup
 * - load Config -> build dependencies (reqwest client, service factory, upstream)
 * - assemble the Router and apply transport middleware
 * - start axum::serve()
 */
use std::{panic, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, v1::handlers::health::health};
use crate::config::Config;
use crate::middleware;
use crate::services::SupabaseServiceFactory;
use crate::services::upstream::HttpUpstream;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,edge_functions=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook() {
    let default_hook = panic::take_hook();

    // Panics inside a function are turned into an error envelope by the
    // dispatcher; the hook only makes sure they show up in the logs.
    panic::set_hook(Box::new(move |info| {
        tracing::error!(%info, "panic");
        default_hook(info);
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    init_panic_hook();

    let config = Config::from_env()?;
    tracing::info!(
        addr = %config.addr,
        supabase_url = %config.supabase_url,
        "starting edge functions"
    );

    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    // One connection pool shared by every per-request service client and the upstream client.
    let http = reqwest::Client::builder().build()?;

    let services = SupabaseServiceFactory::from_config(http.clone(), config);
    let upstream = HttpUpstream::new(http);

    Ok(AppState::new(
        Arc::new(services),
        Arc::new(upstream),
        config.random_dog_url.clone(),
    ))
}

fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .nest("/functions/v1", api::v1::routes(&state))
        .with_state(state);

    middleware::http::apply(router)
}
