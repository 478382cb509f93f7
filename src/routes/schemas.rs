use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::content::EnvelopeSchemaPayload,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::EnvelopeSchema,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schemas", get(list_schemas).post(create_schema))
        .route("/schemas/{id}", put(update_schema).delete(delete_schema))
}

#[utoipa::path(
    get,
    path = "/schemas",
    responses(
        (status = 200, description = "List envelope schemas", body = ApiResponse<Vec<EnvelopeSchema>>)
    ),
    tag = "Catalog"
)]
pub async fn list_schemas(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<EnvelopeSchema>>>> {
    let items = sqlx::query_as::<_, EnvelopeSchema>(
        "SELECT * FROM envelope_schemas ORDER BY created_at",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/schemas",
    request_body = EnvelopeSchemaPayload,
    responses(
        (status = 200, description = "Create envelope schema (admin only)", body = ApiResponse<EnvelopeSchema>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_schema(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<EnvelopeSchemaPayload>,
) -> AppResult<Json<ApiResponse<EnvelopeSchema>>> {
    ensure_admin(&user)?;

    let schema = sqlx::query_as::<_, EnvelopeSchema>(
        "INSERT INTO envelope_schemas (id, title, text) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(payload.title)
    .bind(payload.text)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success("Schema created", schema, None)))
}

#[utoipa::path(
    put,
    path = "/schemas/{id}",
    params(
        ("id" = Uuid, Path, description = "Schema ID")
    ),
    request_body = EnvelopeSchemaPayload,
    responses(
        (status = 200, description = "Update envelope schema (admin only)", body = ApiResponse<EnvelopeSchema>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn update_schema(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EnvelopeSchemaPayload>,
) -> AppResult<Json<ApiResponse<EnvelopeSchema>>> {
    ensure_admin(&user)?;

    let schema = sqlx::query_as::<_, EnvelopeSchema>(
        "UPDATE envelope_schemas SET title = $2, text = $3, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(payload.title)
    .bind(payload.text)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::success(
        "Schema updated",
        schema,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/schemas/{id}",
    params(
        ("id" = Uuid, Path, description = "Schema ID")
    ),
    responses(
        (status = 200, description = "Delete envelope schema (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn delete_schema(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;

    let result = sqlx::query("DELETE FROM envelope_schemas WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Schema deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
