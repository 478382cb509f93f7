use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
};

use crate::{
    dto::coupons::{
        AdminCouponList, CouponCodeQuery, CouponList, CreateCouponRequest, UpdateCouponRequest,
        ValidateCouponResponse,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Coupon,
    response::ApiResponse,
    services::coupon_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/coupons", get(user_coupons).post(create_coupon))
        .route("/coupons/all", get(all_coupons))
        .route(
            "/coupons/{coupon_code}",
            put(update_coupon).delete(delete_coupon),
        )
        .route("/add_coupon", post(add_coupon))
        .route("/validate_coupon", post(validate_coupon))
        .route("/remove_coupon", delete(remove_coupon))
}

#[utoipa::path(
    post,
    path = "/coupons",
    request_body = CreateCouponRequest,
    responses(
        (status = 200, description = "Create coupon and assign users (admin only)", body = ApiResponse<Coupon>),
        (status = 400, description = "Invalid validity window"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn create_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCouponRequest>,
) -> AppResult<Json<ApiResponse<Coupon>>> {
    let resp = coupon_service::create_coupon(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/coupons",
    responses(
        (status = 200, description = "Caller's coupons with refreshed activity", body = ApiResponse<CouponList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn user_coupons(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CouponList>>> {
    let resp = coupon_service::user_coupons(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/coupons/all",
    responses(
        (status = 200, description = "All coupons with holders (admin only)", body = ApiResponse<AdminCouponList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn all_coupons(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AdminCouponList>>> {
    let resp = coupon_service::all_coupons(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/add_coupon",
    params(
        ("coupon_code" = String, Query, description = "Coupon code to redeem")
    ),
    responses(
        (status = 200, description = "Coupon associated with the caller"),
        (status = 400, description = "Already a participant"),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn add_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CouponCodeQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = coupon_service::add_coupon(&state, &user, &query.coupon_code).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/validate_coupon",
    params(
        ("coupon_code" = String, Query, description = "Coupon code to validate")
    ),
    responses(
        (status = 200, description = "Coupon validity for the caller", body = ApiResponse<ValidateCouponResponse>),
        (status = 400, description = "Outside validity window"),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn validate_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CouponCodeQuery>,
) -> AppResult<Json<ApiResponse<ValidateCouponResponse>>> {
    let resp = coupon_service::validate_coupon(&state, &user, &query.coupon_code).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/remove_coupon",
    params(
        ("coupon_code" = String, Query, description = "Coupon code to revoke")
    ),
    responses(
        (status = 200, description = "Coupon removed from the caller"),
        (status = 400, description = "Caller does not hold the coupon"),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn remove_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CouponCodeQuery>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = coupon_service::remove_coupon(&state, &user, &query.coupon_code).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/coupons/{coupon_code}",
    params(
        ("coupon_code" = String, Path, description = "Coupon code")
    ),
    request_body = UpdateCouponRequest,
    responses(
        (status = 200, description = "Update coupon (admin only)", body = ApiResponse<Coupon>),
        (status = 400, description = "Invalid date"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn update_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(coupon_code): Path<String>,
    Json(payload): Json<UpdateCouponRequest>,
) -> AppResult<Json<ApiResponse<Coupon>>> {
    let resp = coupon_service::update_coupon(&state, &user, &coupon_code, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/coupons/{coupon_code}",
    params(
        ("coupon_code" = String, Path, description = "Coupon code")
    ),
    responses(
        (status = 200, description = "Delete coupon (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Coupon not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Coupons"
)]
pub async fn delete_coupon(
    State(state): State<AppState>,
    user: AuthUser,
    Path(coupon_code): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = coupon_service::delete_coupon(&state, &user, &coupon_code).await?;
    Ok(Json(resp))
}
