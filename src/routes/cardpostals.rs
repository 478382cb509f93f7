use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tokio::fs;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Category,
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryQuery {
    pub name: String,
}

/// Listing view: the image is exposed through the image endpoint, never as a
/// raw filesystem path.
#[derive(Debug, Serialize, ToSchema)]
pub struct CardpostalView {
    pub id: Uuid,
    pub name: String,
    pub image_path: String,
    pub category: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct CardpostalRow {
    id: Uuid,
    name: String,
    category: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cardpostals", get(list_cardpostals))
        .route("/cardpostals/images/{cardpostal_id}", get(cardpostal_image))
        .route("/cardpostals/{category_id}", get(cardpostals_by_category))
        .route("/categories", get(list_categories).post(create_category))
}

#[utoipa::path(
    get,
    path = "/cardpostals",
    responses(
        (status = 200, description = "List cardpostals with category names", body = ApiResponse<Vec<CardpostalView>>)
    ),
    tag = "Cardpostals"
)]
pub async fn list_cardpostals(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CardpostalView>>>> {
    let rows = sqlx::query_as::<_, CardpostalRow>(
        r#"
        SELECT c.id, c.name, cat.name AS category
        FROM cardpostals c
        LEFT JOIN categories cat ON cat.id = c.category_id
        ORDER BY c.name
        "#,
    )
    .fetch_all(&state.pool)
    .await?;

    let items = rows.into_iter().map(view_from_row).collect();
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/cardpostals/images/{cardpostal_id}",
    params(
        ("cardpostal_id" = Uuid, Path, description = "Cardpostal ID")
    ),
    responses(
        (status = 200, description = "Cardpostal image bytes"),
        (status = 404, description = "Image not found")
    ),
    tag = "Cardpostals"
)]
pub async fn cardpostal_image(
    State(state): State<AppState>,
    Path(cardpostal_id): Path<Uuid>,
) -> AppResult<Response> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT image_path FROM cardpostals WHERE id = $1")
            .bind(cardpostal_id)
            .fetch_optional(&state.pool)
            .await?;
    let (image_path,) = row.ok_or(AppError::NotFound)?;

    let bytes = fs::read(&image_path).await.map_err(|_| AppError::NotFound)?;
    let content_type = match image_path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

#[utoipa::path(
    get,
    path = "/cardpostals/{category_id}",
    params(
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Cardpostals in a category", body = ApiResponse<Vec<CardpostalView>>),
        (status = 404, description = "Category not found")
    ),
    tag = "Cardpostals"
)]
pub async fn cardpostals_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<CardpostalView>>>> {
    let category: Option<Category> = sqlx::query_as("SELECT * FROM categories WHERE id = $1")
        .bind(category_id)
        .fetch_optional(&state.pool)
        .await?;
    let category = category.ok_or(AppError::NotFound)?;

    let rows = sqlx::query_as::<_, CardpostalRow>(
        r#"
        SELECT c.id, c.name, cat.name AS category
        FROM cardpostals c
        LEFT JOIN categories cat ON cat.id = c.category_id
        WHERE c.category_id = $1
        ORDER BY c.name
        "#,
    )
    .bind(category.id)
    .fetch_all(&state.pool)
    .await?;

    let items = rows.into_iter().map(view_from_row).collect();
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/categories",
    params(
        ("name" = String, Query, description = "Category name")
    ),
    responses(
        (status = 200, description = "Create cardpostal category (admin only)", body = ApiResponse<Category>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Cardpostals"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<ApiResponse<Category>>> {
    ensure_admin(&user)?;

    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(query.name)
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(ApiResponse::success("Category created", category, None)))
}

#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "List categories", body = ApiResponse<Vec<Category>>)
    ),
    tag = "Cardpostals"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let items = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

fn view_from_row(row: CardpostalRow) -> CardpostalView {
    CardpostalView {
        image_path: format!("/cardpostals/images/{}", row.id),
        id: row.id,
        name: row.name,
        category: row.category,
    }
}
