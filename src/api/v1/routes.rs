/*
 * Responsibility
 * - URL layout of the edge functions (mounted under /functions/v1 by app.rs)
 * - which functions require authentication is decided here via ServeOptions
 */
use axum::Router;

use crate::api::v1::handlers::{
    hello_world::hello_world, hello_world_auth::hello_world_auth, random_dog,
};
use crate::edge::{ServeOptions, serve_edge_function};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/hello-world",
            serve_edge_function(hello_world, ServeOptions::public()),
        )
        .route(
            "/hello-world-auth",
            serve_edge_function(hello_world_auth, ServeOptions::authenticated()),
        )
        .route(
            "/random-dog",
            random_dog::route(state.upstream.clone(), state.random_dog_url.clone()),
        )
}
