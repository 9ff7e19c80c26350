use axum::http::HeaderMap;

use crate::error::{FunctionError, LOGIN_REQUIRED};
use crate::services::auth::authenticator::authenticate;
use crate::services::auth::identity::Identity;
use crate::services::service_client::ServiceClient;

/// Hard authentication check: an identity or an `Unauthenticated` error.
pub async fn require_authenticated(
    service: &ServiceClient,
    headers: &HeaderMap,
) -> Result<Identity, FunctionError> {
    let outcome = authenticate(service, headers).await;

    if !outcome.is_authenticated() {
        let reason = outcome.failure_reason().unwrap_or(LOGIN_REQUIRED);
        return Err(FunctionError::unauthenticated(reason));
    }

    outcome.into_identity().ok_or_else(FunctionError::login_required)
}
