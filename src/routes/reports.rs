use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::report_service::{self, StatusReport},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(status))
}

#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Aggregate counts and revenue windows (admin only)", body = ApiResponse<StatusReport>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn status(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<StatusReport>>> {
    let resp = report_service::status_report(&state, &user).await?;
    Ok(Json(resp))
}
