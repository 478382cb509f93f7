use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{EnvelopeColor, EnvelopeSmell, PaperColor, ShipmentType},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ColorPayload {
    pub color_name: String,
    pub color_code: String,
    pub color_price: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SmellPayload {
    pub smell_name: String,
    pub smell_price: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShipmentTypePayload {
    pub type_name: String,
    pub type_description: String,
    pub shipment_price: i64,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/envelope_colors",
            get(list_envelope_colors).post(create_envelope_color),
        )
        .route(
            "/envelope_colors/{id}",
            get(get_envelope_color)
                .put(update_envelope_color)
                .delete(delete_envelope_color),
        )
        .route(
            "/paper_colors",
            get(list_paper_colors).post(create_paper_color),
        )
        .route(
            "/paper_colors/{id}",
            get(get_paper_color)
                .put(update_paper_color)
                .delete(delete_paper_color),
        )
        .route(
            "/envelope_smell",
            get(list_envelope_smells).post(create_envelope_smell),
        )
        .route(
            "/shipment_type",
            get(list_shipment_types).post(create_shipment_type),
        )
}

#[utoipa::path(
    get,
    path = "/envelope_colors",
    responses(
        (status = 200, description = "List envelope colors", body = ApiResponse<Vec<EnvelopeColor>>)
    ),
    tag = "Catalog"
)]
pub async fn list_envelope_colors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<EnvelopeColor>>>> {
    let items = sqlx::query_as::<_, EnvelopeColor>("SELECT * FROM envelope_colors")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/envelope_colors/{id}",
    params(
        ("id" = Uuid, Path, description = "Envelope color ID")
    ),
    responses(
        (status = 200, description = "Get envelope color (admin only)", body = ApiResponse<EnvelopeColor>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_envelope_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<EnvelopeColor>>> {
    ensure_admin(&user)?;
    let color = sqlx::query_as::<_, EnvelopeColor>("SELECT * FROM envelope_colors WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", color, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/envelope_colors",
    request_body = ColorPayload,
    responses(
        (status = 200, description = "Create envelope color (admin only)", body = ApiResponse<EnvelopeColor>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_envelope_color(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ColorPayload>,
) -> AppResult<Json<ApiResponse<EnvelopeColor>>> {
    ensure_admin(&user)?;
    let color = sqlx::query_as::<_, EnvelopeColor>(
        "INSERT INTO envelope_colors (id, color_name, color_code, color_price) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.color_name)
    .bind(payload.color_code)
    .bind(payload.color_price)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("Envelope color created", color, None)))
}

#[utoipa::path(
    put,
    path = "/envelope_colors/{id}",
    params(
        ("id" = Uuid, Path, description = "Envelope color ID")
    ),
    request_body = ColorPayload,
    responses(
        (status = 200, description = "Update envelope color (admin only)", body = ApiResponse<EnvelopeColor>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_envelope_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ColorPayload>,
) -> AppResult<Json<ApiResponse<EnvelopeColor>>> {
    ensure_admin(&user)?;
    let color = sqlx::query_as::<_, EnvelopeColor>(
        "UPDATE envelope_colors SET color_name = $2, color_code = $3, color_price = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(payload.color_name)
    .bind(payload.color_code)
    .bind(payload.color_price)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "Envelope color updated",
        color,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/envelope_colors/{id}",
    params(
        ("id" = Uuid, Path, description = "Envelope color ID")
    ),
    responses(
        (status = 200, description = "Delete envelope color (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_envelope_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let result = sqlx::query("DELETE FROM envelope_colors WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success(
        "Envelope color deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/paper_colors",
    responses(
        (status = 200, description = "List paper colors", body = ApiResponse<Vec<PaperColor>>)
    ),
    tag = "Catalog"
)]
pub async fn list_paper_colors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<PaperColor>>>> {
    let items = sqlx::query_as::<_, PaperColor>("SELECT * FROM paper_colors")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/paper_colors/{id}",
    params(
        ("id" = Uuid, Path, description = "Paper color ID")
    ),
    responses(
        (status = 200, description = "Get paper color (admin only)", body = ApiResponse<PaperColor>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn get_paper_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PaperColor>>> {
    ensure_admin(&user)?;
    let color = sqlx::query_as::<_, PaperColor>("SELECT * FROM paper_colors WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", color, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/paper_colors",
    request_body = ColorPayload,
    responses(
        (status = 200, description = "Create paper color (admin only)", body = ApiResponse<PaperColor>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_paper_color(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ColorPayload>,
) -> AppResult<Json<ApiResponse<PaperColor>>> {
    ensure_admin(&user)?;
    let color = sqlx::query_as::<_, PaperColor>(
        "INSERT INTO paper_colors (id, color_name, color_code, color_price) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.color_name)
    .bind(payload.color_code)
    .bind(payload.color_price)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("Paper color created", color, None)))
}

#[utoipa::path(
    put,
    path = "/paper_colors/{id}",
    params(
        ("id" = Uuid, Path, description = "Paper color ID")
    ),
    request_body = ColorPayload,
    responses(
        (status = 200, description = "Update paper color (admin only)", body = ApiResponse<PaperColor>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_paper_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ColorPayload>,
) -> AppResult<Json<ApiResponse<PaperColor>>> {
    ensure_admin(&user)?;
    let color = sqlx::query_as::<_, PaperColor>(
        "UPDATE paper_colors SET color_name = $2, color_code = $3, color_price = $4 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(payload.color_name)
    .bind(payload.color_code)
    .bind(payload.color_price)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "Paper color updated",
        color,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/paper_colors/{id}",
    params(
        ("id" = Uuid, Path, description = "Paper color ID")
    ),
    responses(
        (status = 200, description = "Delete paper color (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_paper_color(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let result = sqlx::query("DELETE FROM paper_colors WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success(
        "Paper color deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/envelope_smell",
    responses(
        (status = 200, description = "List envelope smells", body = ApiResponse<Vec<EnvelopeSmell>>)
    ),
    tag = "Catalog"
)]
pub async fn list_envelope_smells(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<EnvelopeSmell>>>> {
    let items = sqlx::query_as::<_, EnvelopeSmell>("SELECT * FROM envelope_smells")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/envelope_smell",
    request_body = SmellPayload,
    responses(
        (status = 200, description = "Create envelope smell (admin only)", body = ApiResponse<EnvelopeSmell>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_envelope_smell(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SmellPayload>,
) -> AppResult<Json<ApiResponse<EnvelopeSmell>>> {
    ensure_admin(&user)?;
    let smell = sqlx::query_as::<_, EnvelopeSmell>(
        "INSERT INTO envelope_smells (id, smell_name, smell_price) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.smell_name)
    .bind(payload.smell_price)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("Envelope smell created", smell, None)))
}

#[utoipa::path(
    get,
    path = "/shipment_type",
    responses(
        (status = 200, description = "List shipment types", body = ApiResponse<Vec<ShipmentType>>)
    ),
    tag = "Catalog"
)]
pub async fn list_shipment_types(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ShipmentType>>>> {
    let items = sqlx::query_as::<_, ShipmentType>("SELECT * FROM shipment_types")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/shipment_type",
    request_body = ShipmentTypePayload,
    responses(
        (status = 200, description = "Create shipment type (admin only)", body = ApiResponse<ShipmentType>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_shipment_type(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ShipmentTypePayload>,
) -> AppResult<Json<ApiResponse<ShipmentType>>> {
    ensure_admin(&user)?;
    let shipment_type = sqlx::query_as::<_, ShipmentType>(
        "INSERT INTO shipment_types (id, type_name, type_description, shipment_price) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.type_name)
    .bind(payload.type_description)
    .bind(payload.shipment_price)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success(
        "Shipment type created",
        shipment_type,
        None,
    )))
}
