use crate::profile::ProfileGenerator;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Body of every 500 response
pub const INTERNAL_ERROR_BODY: &str = "Error!";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ProfileGenerator>,
}

impl AppState {
    pub fn new(generator: ProfileGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

/// Inputs of `POST /business-data`
#[derive(Debug, Default, PartialEq)]
pub struct BusinessDataRequest {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl BusinessDataRequest {
    /// Parse a JSON body. A blank body, or one that is not an object, carries
    /// no inputs. Falsy values (`null`, `false`, `0`, `""`) count as absent.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)?;
        Ok(Self {
            name: field_text(&value, "name"),
            location: field_text(&value, "location"),
        })
    }
}

fn field_text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub headlines: usize,
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Malformed JSON body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Unreadable request body: {0}")]
    UnreadableBody(#[from] BytesRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        internal_error_response()
    }
}

/// Opaque plain-text 500, shared by handler errors and caught panics
pub fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}
