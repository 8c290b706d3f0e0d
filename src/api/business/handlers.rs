use crate::api::models::*;
use crate::profile::BusinessProfile;
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::BytesRejection},
    http::{HeaderMap, header::CONTENT_TYPE},
};
use std::collections::HashMap;
use tracing::info;

pub async fn get_business_data_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<BusinessProfile> {
    let name = params.get("name").map(String::as_str);
    let location = params.get("location").map(String::as_str);

    info!(?name, ?location, "Generating business data");

    Json(state.generator.generate(name, location))
}

pub async fn post_business_data_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<BusinessProfile>, AppError> {
    let body = body?;

    // Only JSON bodies are read; anything else carries no inputs
    let request = if is_json(&headers) {
        BusinessDataRequest::from_json(&body)?
    } else {
        BusinessDataRequest::default()
    };

    info!(body = %String::from_utf8_lossy(&body), "Received business data request");

    Ok(Json(state.generator.generate(
        request.name.as_deref(),
        request.location.as_deref(),
    )))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
