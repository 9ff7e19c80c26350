/*
 * Responsibility
 * - soft authentication check: Authorization header -> token -> identity backend
 * - never fails; every outcome is an AuthOutcome
 * - backend detail is logged, callers only see a generic reason
 */
use axum::http::{HeaderMap, header};

use crate::error::{AUTHENTICATION_FAILED, LOGIN_REQUIRED};
use crate::services::auth::identity::{Identity, IdentityError};
use crate::services::service_client::ServiceClient;

const BEARER_PREFIX: &str = "Bearer ";

/// Result of one authentication attempt.
///
/// `is_authenticated()` is true exactly when `identity()` is `Some`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    identity: Option<Identity>,
    authenticated: bool,
    failure_reason: Option<String>,
}

impl AuthOutcome {
    pub fn success(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            authenticated: true,
            failure_reason: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            identity: None,
            authenticated: false,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    pub fn into_identity(self) -> Option<Identity> {
        self.identity
    }
}

/// Verify the request's bearer token against the service client's identity backend.
pub async fn authenticate(service: &ServiceClient, headers: &HeaderMap) -> AuthOutcome {
    let Some(token) = bearer_token(headers) else {
        return AuthOutcome::failure(LOGIN_REQUIRED);
    };

    let backend = service.identity();
    match backend.get_user(token).await {
        Ok(Some(identity)) => AuthOutcome::success(identity),
        Ok(None) => {
            tracing::error!(
                backend = backend.backend_name(),
                "authentication error: identity backend returned no user"
            );
            AuthOutcome::failure(LOGIN_REQUIRED)
        }
        Err(err @ IdentityError::Rejected { .. }) => {
            tracing::error!(
                backend = backend.backend_name(),
                error = %err,
                "authentication error"
            );
            AuthOutcome::failure(LOGIN_REQUIRED)
        }
        Err(err) => {
            tracing::error!(
                backend = backend.backend_name(),
                error = %err,
                "authentication exception"
            );
            AuthOutcome::failure(AUTHENTICATION_FAILED)
        }
    }
}

/// Token from `Authorization: Bearer <token>`.
///
/// A missing, empty or unreadable header yields `None`. Without the `Bearer `
/// prefix the whole header value is used as the token.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?;
    let value = match value.to_str() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!("authorization header is not visible ASCII");
            return None;
        }
    };

    if value.is_empty() {
        return None;
    }

    Some(value.strip_prefix(BEARER_PREFIX).unwrap_or(value))
}
