//! Identity backend interface and the identity record it returns.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A verified user as reported by the identity backend.
///
/// Unknown fields in the backend payload are ignored; everything except `id`
/// has a default so sparse records still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub app_metadata: serde_json::Value,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// Identity-backend errors.
///
/// `Rejected` means the backend answered and refused the token; the other
/// variants mean the verification call itself did not complete.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("token rejected by identity backend ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("identity backend transport error: {0}")]
    Transport(String),
    #[error("identity backend returned an invalid user record: {0}")]
    InvalidRecord(String),
}

/// Verifies bearer tokens.
///
/// Returns:
/// - `Ok(Some(identity))` when the token is valid
/// - `Ok(None)` when the backend succeeded but returned no user
/// - `Err(_)` when the backend reported an error or could not be reached
#[async_trait]
pub trait IdentityBackend: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn get_user(&self, token: &str) -> Result<Option<Identity>, IdentityError>;
}
