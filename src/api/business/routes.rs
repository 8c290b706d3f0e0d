use crate::api::business::handlers::{get_business_data_handler, post_business_data_handler};
use crate::api::models::AppState;
use axum::{Router, routing::get};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/business-data",
        get(get_business_data_handler).post(post_business_data_handler),
    )
}
