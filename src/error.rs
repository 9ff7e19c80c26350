/*
 * Responsibility
 * - FunctionError: the one error type edge functions and the auth guard return
 * - IntoResponse: uniform JSON envelope {"error":{"message":...}}
 * - status is always 200; clients inspect the body, not the status code
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::middleware::cors;
use crate::services::upstream::UpstreamError;

pub const LOGIN_REQUIRED: &str = "please log in";
pub const AUTHENTICATION_FAILED: &str = "authentication failed";
pub const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("upstream service returned error status: {status}")]
    UpstreamStatus { status: u16 },
    #[error("upstream service unavailable: {0}")]
    Upstream(#[from] UpstreamError),
    #[error("{}", .0.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Unexpected(Option<String>),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FunctionError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn login_required() -> Self {
        Self::unauthenticated(LOGIN_REQUIRED)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                message: self.to_string(),
            },
        };

        (StatusCode::OK, cors::cors_headers(), Json(body)).into_response()
    }
}
