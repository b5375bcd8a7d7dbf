use axum::{Json, Router, extract::State, routing::get};

use crate::{error::AppResult, response::ApiResponse, services::seed_service, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(execute_seed))
}

#[utoipa::path(
    get,
    path = "/api/seed",
    responses(
        (status = 200, description = "Catalog reset and reseeded", body = ApiResponse<String>),
        (status = 500, description = "Internal Server Error"),
    ),
    tag = "Seed"
)]
pub async fn execute_seed(State(state): State<AppState>) -> AppResult<Json<ApiResponse<String>>> {
    let message = seed_service::run_seed(&state).await?;
    Ok(Json(ApiResponse::success(message, message.to_string(), None)))
}
