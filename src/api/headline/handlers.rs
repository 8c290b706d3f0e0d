use crate::api::models::AppState;
use crate::profile::HeadlineUpdate;
use axum::{Json, extract::State};
use tracing::info;

/// Query parameters are accepted but do not influence the pick
pub async fn regenerate_headline_handler(State(state): State<AppState>) -> Json<HeadlineUpdate> {
    let update = state.generator.regenerate();
    info!(headline = %update.headline, "Regenerated headline");
    Json(update)
}
