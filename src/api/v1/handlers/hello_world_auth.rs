/*
 * Responsibility
 * - /hello-world-auth: greeting for a signed-in user
 * - mounted with ServeOptions::authenticated(); without an identity it fails
 */
use axum::response::Response;

use crate::api::v1::dto::greeting::GreetingResponse;
use crate::edge::RequestContext;
use crate::error::FunctionError;
use crate::middleware::cors;

pub async fn hello_world_auth(ctx: RequestContext) -> Result<Response, FunctionError> {
    let identity = ctx.identity().ok_or_else(FunctionError::login_required)?;
    let email = identity.email.as_deref().unwrap_or_default();

    Ok(cors::json(GreetingResponse {
        message: format!("Hello (auth), {email}!"),
    }))
}
