use async_trait::async_trait;
use axum::http::header;
use url::Url;

use crate::services::auth::identity::{Identity, IdentityBackend, IdentityError};

const USER_PATH: &str = "auth/v1/user";

/// GoTrue (Supabase Auth) backed identity verification.
///
/// `GET {base}/auth/v1/user` with the service role key as `apikey` and the
/// caller's token as bearer credentials.
#[derive(Clone, Debug)]
pub struct GoTrueClient {
    http: reqwest::Client,
    user_endpoint: Url,
    api_key: String,
}

impl GoTrueClient {
    pub fn new(http: reqwest::Client, base_url: &Url, api_key: impl Into<String>) -> Self {
        Self {
            http,
            user_endpoint: user_endpoint(base_url),
            api_key: api_key.into(),
        }
    }
}

/// Resolve the user endpoint relative to the project URL, keeping any path
/// prefix the base already has (`http://host/prefix` -> `.../prefix/auth/v1/user`).
pub fn user_endpoint(base_url: &Url) -> Url {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    // Joining a relative path onto a base URL cannot fail.
    base.join(USER_PATH).unwrap_or(base)
}

#[async_trait]
impl IdentityBackend for GoTrueClient {
    fn backend_name(&self) -> &'static str {
        "gotrue"
    }

    async fn get_user(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        let res = self
            .http
            .get(self.user_endpoint.clone())
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        decode_user(&body)
    }
}

/// Decode a successful `/user` body. Empty or `null` bodies mean "no user".
pub fn decode_user(body: &[u8]) -> Result<Option<Identity>, IdentityError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| IdentityError::InvalidRecord(e.to_string()))?;
    if value.is_null() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| IdentityError::InvalidRecord(e.to_string()))
}

/// Pull a human-readable message out of a GoTrue error payload.
///
/// GoTrue has used `msg`, `message`, `error_description` and `error` across
/// versions; the first non-empty string wins.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
