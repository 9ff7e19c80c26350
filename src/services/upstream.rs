//! Outbound HTTP capability for functions that forward to third-party APIs.
use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{StatusCode, header};
use thiserror::Error;
use url::Url;

pub const USER_AGENT: &str = "Supabase-EdgeFunction/RandomDog";

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(String),
}

/// A single-shot GET against an upstream API. No retries, no timeout.
#[async_trait]
pub trait UpstreamClient: Send + Sync + 'static {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, UpstreamError>;
}

/// reqwest-backed upstream client. Compression is negotiated by reqwest.
#[derive(Clone, Debug)]
pub struct HttpUpstream {
    http: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstream {
    async fn get(&self, url: &Url) -> Result<UpstreamResponse, UpstreamError> {
        let res = self
            .http
            .get(url.clone())
            .header(header::ACCEPT, "*/*")
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(UpstreamResponse { status, body })
    }
}
