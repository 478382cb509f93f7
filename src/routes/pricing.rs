use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Feature, Price},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct PricePayload {
    pub price_name: String,
    pub price_description: String,
    pub price_value: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeaturePayload {
    pub feature_name: String,
    pub feature_logo: String,
    pub feature_description: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prices", get(list_prices).post(create_price))
        .route("/prices/id/{id}", get(get_price_by_id))
        .route("/prices/name/{name}", get(get_price_by_name))
        .route("/prices/{id}", put(update_price).delete(delete_price))
        .route("/features", get(list_features).post(create_feature))
        .route("/features/id/{id}", get(get_feature_by_id))
        .route("/features/name/{name}", get(get_feature_by_name))
        .route("/feature/{id}", put(update_feature).delete(delete_feature))
}

#[utoipa::path(
    post,
    path = "/prices",
    request_body = PricePayload,
    responses(
        (status = 200, description = "Create price entry (admin only)", body = ApiResponse<Price>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_price(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PricePayload>,
) -> AppResult<Json<ApiResponse<Price>>> {
    ensure_admin(&user)?;
    let price = sqlx::query_as::<_, Price>(
        "INSERT INTO prices (id, price_name, price_description, price_value) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.price_name)
    .bind(payload.price_description)
    .bind(payload.price_value)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("Price created", price, None)))
}

#[utoipa::path(
    get,
    path = "/prices",
    responses(
        (status = 200, description = "List price entries", body = ApiResponse<Vec<Price>>)
    ),
    tag = "Catalog"
)]
pub async fn list_prices(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Price>>>> {
    let items = sqlx::query_as::<_, Price>("SELECT * FROM prices ORDER BY price_name")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/prices/id/{id}",
    params(
        ("id" = Uuid, Path, description = "Price ID")
    ),
    responses(
        (status = 200, description = "Get price by id (admin only)", body = ApiResponse<Price>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_price_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Price>>> {
    ensure_admin(&user)?;
    let price = sqlx::query_as::<_, Price>("SELECT * FROM prices WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", price, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/prices/name/{name}",
    params(
        ("name" = String, Path, description = "Price name")
    ),
    responses(
        (status = 200, description = "Get price by name (admin only)", body = ApiResponse<Price>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_price_by_name(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<Price>>> {
    ensure_admin(&user)?;
    let price = sqlx::query_as::<_, Price>("SELECT * FROM prices WHERE price_name = $1")
        .bind(name)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", price, Some(Meta::empty()))))
}

#[utoipa::path(
    put,
    path = "/prices/{id}",
    params(
        ("id" = Uuid, Path, description = "Price ID")
    ),
    request_body = PricePayload,
    responses(
        (status = 200, description = "Update price entry (admin only)", body = ApiResponse<Price>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_price(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PricePayload>,
) -> AppResult<Json<ApiResponse<Price>>> {
    ensure_admin(&user)?;
    let price = sqlx::query_as::<_, Price>(
        r#"
        UPDATE prices
        SET price_name = $2, price_description = $3, price_value = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.price_name)
    .bind(payload.price_description)
    .bind(payload.price_value)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "Price updated",
        price,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/prices/{id}",
    params(
        ("id" = Uuid, Path, description = "Price ID")
    ),
    responses(
        (status = 200, description = "Delete price entry (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_price(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let result = sqlx::query("DELETE FROM prices WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success(
        "Price deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    post,
    path = "/features",
    request_body = FeaturePayload,
    responses(
        (status = 200, description = "Create feature entry (admin only)", body = ApiResponse<Feature>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_feature(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FeaturePayload>,
) -> AppResult<Json<ApiResponse<Feature>>> {
    ensure_admin(&user)?;
    let feature = sqlx::query_as::<_, Feature>(
        "INSERT INTO features (id, feature_name, feature_logo, feature_description) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.feature_name)
    .bind(payload.feature_logo)
    .bind(payload.feature_description)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("Feature created", feature, None)))
}

#[utoipa::path(
    get,
    path = "/features",
    responses(
        (status = 200, description = "List feature entries", body = ApiResponse<Vec<Feature>>)
    ),
    tag = "Catalog"
)]
pub async fn list_features(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Feature>>>> {
    let items = sqlx::query_as::<_, Feature>("SELECT * FROM features ORDER BY feature_name")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/features/id/{id}",
    params(
        ("id" = Uuid, Path, description = "Feature ID")
    ),
    responses(
        (status = 200, description = "Get feature by id (admin only)", body = ApiResponse<Feature>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_feature_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Feature>>> {
    ensure_admin(&user)?;
    let feature = sqlx::query_as::<_, Feature>("SELECT * FROM features WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", feature, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/features/name/{name}",
    params(
        ("name" = String, Path, description = "Feature name")
    ),
    responses(
        (status = 200, description = "Get feature by name (admin only)", body = ApiResponse<Feature>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_feature_by_name(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> AppResult<Json<ApiResponse<Feature>>> {
    ensure_admin(&user)?;
    let feature = sqlx::query_as::<_, Feature>("SELECT * FROM features WHERE feature_name = $1")
        .bind(name)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", feature, Some(Meta::empty()))))
}

#[utoipa::path(
    put,
    path = "/feature/{id}",
    params(
        ("id" = Uuid, Path, description = "Feature ID")
    ),
    request_body = FeaturePayload,
    responses(
        (status = 200, description = "Update feature entry (admin only)", body = ApiResponse<Feature>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_feature(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FeaturePayload>,
) -> AppResult<Json<ApiResponse<Feature>>> {
    ensure_admin(&user)?;
    let feature = sqlx::query_as::<_, Feature>(
        r#"
        UPDATE features
        SET feature_name = $2, feature_logo = $3, feature_description = $4, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.feature_name)
    .bind(payload.feature_logo)
    .bind(payload.feature_description)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "Feature updated",
        feature,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/feature/{id}",
    params(
        ("id" = Uuid, Path, description = "Feature ID")
    ),
    responses(
        (status = 200, description = "Delete feature entry (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_feature(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let result = sqlx::query("DELETE FROM features WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success(
        "Feature deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
