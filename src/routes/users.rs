use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{delete, get, put},
};

use crate::{
    dto::users::{
        ProfileResponse, UpdateEmailQuery, UpdatePasswordRequest, UpdateUserInfoQuery,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::user_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile))
        .route("/update_password", put(update_password))
        .route("/update_email", put(update_email))
        .route("/update_user_info", put(update_user_info))
        .route("/delete_user", delete(delete_user))
}

#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Caller profile with orders", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<ProfileResponse>>> {
    let resp = user_service::profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/update_password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Old password is incorrect")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdatePasswordRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::update_password(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/update_email",
    params(
        ("new_email" = String, Query, description = "New email address")
    ),
    responses(
        (status = 200, description = "Email updated"),
        (status = 400, description = "Email is used by another account")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_email(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UpdateEmailQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::update_email(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/update_user_info",
    params(
        ("new_name" = Option<String>, Query, description = "New first name"),
        ("new_surname" = Option<String>, Query, description = "New surname"),
        ("new_email" = Option<String>, Query, description = "New email address"),
        ("new_phone_number" = Option<String>, Query, description = "New phone number")
    ),
    responses(
        (status = 200, description = "User info updated"),
        (status = 400, description = "Email is used by another account")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user_info(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UpdateUserInfoQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::update_user_info(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/delete_user",
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = user_service::delete_self(&state, &user).await?;
    Ok(Json(resp))
}
