use axum::{
    Form, Json, Router,
    extract::{Query, State},
    response::Html,
    routing::{get, post},
};

use crate::{
    dto::auth::{
        LoginRequest, LoginResponse, RegisterRequest, TokenRequest, TokenResponse,
        VerificationQuery,
    },
    error::AppResult,
    models::User,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/token", post(token))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/verification", get(verification))
}

#[utoipa::path(
    post,
    path = "/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Issue bearer token", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn token(
    State(state): State<AppState>,
    Form(payload): Form<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let resp = auth_service::issue_token(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Register user", body = ApiResponse<User>),
        (status = 400, description = "Email or phone already taken")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::register_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let resp = auth_service::login_user(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/verification",
    params(
        ("token" = String, Query, description = "Emailed verification token")
    ),
    responses(
        (status = 200, description = "Account verified", content_type = "text/html"),
        (status = 401, description = "Invalid or already used token")
    ),
    tag = "Auth"
)]
pub async fn verification(
    State(state): State<AppState>,
    Query(query): Query<VerificationQuery>,
) -> AppResult<Html<String>> {
    let name = auth_service::verify_email(&state, &query.token).await?;
    Ok(Html(format!(
        "<!DOCTYPE html>\n<html>\n  <body>\n    <h3>Account Verified</h3>\n    <p>Welcome {name}, your account is now verified.</p>\n  </body>\n</html>"
    )))
}
