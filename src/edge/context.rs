/*
 * Responsibility
 * - the per-request context an edge function receives
 * - identity exists only on the Authenticated variant, so a function that
 *   did not ask for authentication has no identity field to read
 */
use axum::extract::Request;

use crate::services::ServiceClient;
use crate::services::auth::Identity;

#[derive(Debug)]
pub struct PublicContext {
    pub request: Request,
    pub service: ServiceClient,
}

#[derive(Debug)]
pub struct AuthenticatedContext {
    pub request: Request,
    pub service: ServiceClient,
    pub identity: Identity,
}

#[derive(Debug)]
pub enum RequestContext {
    Public(PublicContext),
    Authenticated(AuthenticatedContext),
}

impl RequestContext {
    pub fn request(&self) -> &Request {
        match self {
            Self::Public(ctx) => &ctx.request,
            Self::Authenticated(ctx) => &ctx.request,
        }
    }

    pub fn service(&self) -> &ServiceClient {
        match self {
            Self::Public(ctx) => &ctx.service,
            Self::Authenticated(ctx) => &ctx.service,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Public(_) => None,
            Self::Authenticated(ctx) => Some(&ctx.identity),
        }
    }

    /// First value of query parameter `key`, percent-decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        let query = self.request().uri().query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}
