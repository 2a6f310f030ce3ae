use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::generator::GeneratorError;
use crate::rate_limit::RateLimited;
use crate::store::StoreError;
use crate::validation::ValidationError;

pub const NOT_FOUND_MESSAGE: &str = "Resource not found";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";
pub const INTERNAL_MESSAGE: &str = "Internal server error. Please try again later.";

// One entry of the 422 `details` array
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequestIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
}

/// Every way a request can fail, mapped onto a status code and body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    ClientInput(#[from] ValidationError),
    #[error("invalid request body")]
    InvalidRequest(Vec<RequestIssue>),
    #[error("rate limit exceeded")]
    RateLimited(RateLimited),
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<GeneratorError> for ApiError {
    fn from(err: GeneratorError) -> Self {
        Self::Internal(format!("model invocation failed: {err}"))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(format!("log store failed: {err}"))
    }
}

impl From<RateLimited> for ApiError {
    fn from(err: RateLimited) -> Self {
        Self::RateLimited(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ClientInput(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::ClientInput(err) => {
                (status, Json(json!({ "error": err.to_string() }))).into_response()
            }
            Self::InvalidRequest(details) => (
                status,
                Json(json!({ "error": "Invalid request", "details": details })),
            )
                .into_response(),
            Self::RateLimited(limited) => {
                let retry_after = limited.retry_after_secs().to_string();
                let mut response = (
                    status,
                    format!(
                        "Rate limit exceeded: {} per {}",
                        limited.limit,
                        describe_window(limited.window.as_secs())
                    ),
                )
                    .into_response();
                if let Ok(value) = HeaderValue::from_str(&retry_after) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                response
            }
            Self::NotFound => {
                (status, Json(json!({ "error": NOT_FOUND_MESSAGE }))).into_response()
            }
            Self::MethodNotAllowed => {
                (status, Json(json!({ "error": METHOD_NOT_ALLOWED_MESSAGE }))).into_response()
            }
            Self::Internal(cause) => {
                tracing::error!(%cause, "request failed");
                (status, Json(json!({ "error": INTERNAL_MESSAGE }))).into_response()
            }
        }
    }
}

// "1 minute", "90 seconds", "2 hours"
fn describe_window(secs: u64) -> String {
    let (amount, unit) = match secs {
        s if s >= 3600 && s % 3600 == 0 => (s / 3600, "hour"),
        s if s >= 60 && s % 60 == 0 => (s / 60, "minute"),
        s => (s, "second"),
    };
    if amount == 1 {
        format!("1 {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}
