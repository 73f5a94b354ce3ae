use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    path_mode: &'static str,
    locales: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        path_mode: state.seo_service.mode().as_str(),
        locales: state.seo_service.locales().locales().len(),
    })
}
