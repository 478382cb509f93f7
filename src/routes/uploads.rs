use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{
    dto::uploads::{FileUploadResponse, MediaQuery, MediaUploadResponse, OrderIdQuery, PhotoUploadResponse},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    services::{content_service, upload_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/photo", post(upload_photos))
        .route("/photos/{order_id}", get(list_photos))
        .route("/photos/{order_id}/{photo_name}", delete(delete_photo))
        .route("/file", post(upload_files))
        .route("/files/{order_id}", get(list_files))
        .route("/files/{order_id}/{file_name}", delete(delete_file))
        .route("/upload/media", post(upload_media).delete(delete_media))
}

async fn collect_uploads(multipart: &mut Multipart) -> AppResult<Vec<(Option<String>, Vec<u8>)>> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let filename = field.file_name().map(ToOwned::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        uploads.push((filename, bytes.to_vec()));
    }

    if uploads.is_empty() {
        return Err(AppError::BadRequest("no files supplied".into()));
    }
    Ok(uploads)
}

#[utoipa::path(
    post,
    path = "/photo",
    params(
        ("order_id" = Uuid, Query, description = "Order to attach photos to")
    ),
    responses(
        (status = 200, description = "Upload photos for an order", body = ApiResponse<PhotoUploadResponse>),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn upload_photos(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderIdQuery>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<PhotoUploadResponse>>> {
    let uploads = collect_uploads(&mut multipart).await?;
    let resp = upload_service::upload_photos(&state, &user, query.order_id, uploads).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/photos/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Photo paths of an order", body = ApiResponse<Vec<String>>),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn list_photos(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let resp = upload_service::list_photos(&state, &user, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/photos/{order_id}/{photo_name}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID"),
        ("photo_name" = String, Path, description = "Stored photo name")
    ),
    responses(
        (status = 200, description = "Delete one photo of an order"),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Order or photo not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn delete_photo(
    State(state): State<AppState>,
    user: AuthUser,
    Path((order_id, photo_name)): Path<(Uuid, String)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = upload_service::delete_photo(&state, &user, order_id, &photo_name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/file",
    params(
        ("order_id" = Uuid, Query, description = "Order to attach files to")
    ),
    responses(
        (status = 200, description = "Upload document files for an order", body = ApiResponse<FileUploadResponse>),
        (status = 400, description = "Disallowed file type"),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn upload_files(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderIdQuery>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<FileUploadResponse>>> {
    let uploads = collect_uploads(&mut multipart).await?;
    let resp = upload_service::upload_files(&state, &user, query.order_id, uploads).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/files/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "File paths of an order", body = ApiResponse<Vec<String>>),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn list_files(
    State(state): State<AppState>,
    user: AuthUser,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<String>>>> {
    let resp = upload_service::list_files(&state, &user, order_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/files/{order_id}/{file_name}",
    params(
        ("order_id" = Uuid, Path, description = "Order ID"),
        ("file_name" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "Delete one file of an order"),
        (status = 403, description = "Not owner or admin"),
        (status = 404, description = "Order or file not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn delete_file(
    State(state): State<AppState>,
    user: AuthUser,
    Path((order_id, file_name)): Path<(Uuid, String)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = upload_service::delete_file(&state, &user, order_id, &file_name).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/upload/media",
    params(
        ("model_type" = String, Query, description = "'blog' or 'content'"),
        ("field_name" = String, Query, description = "'main_photo' or 'other_photos'"),
        ("record_id" = Uuid, Query, description = "Target record ID")
    ),
    responses(
        (status = 200, description = "Upload media into a blog or content record", body = ApiResponse<MediaUploadResponse>),
        (status = 400, description = "Invalid model_type or field_name"),
        (status = 404, description = "Record not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn upload_media(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MediaQuery>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<MediaUploadResponse>>> {
    content_service::validate_media_query(&query)?;

    let uploads = collect_uploads(&mut multipart).await?;
    let dir = format!("{}/{}", state.config.upload_dir, query.model_type);

    let mut saved_files = Vec::new();
    for (filename, bytes) in uploads {
        let name = upload_service::unique_name(user.user_id, filename.as_deref());
        let path = upload_service::save_upload(&dir, &name, &bytes).await?;
        saved_files.push(path);
    }

    content_service::attach_media(&state, &query, &saved_files).await?;

    Ok(Json(ApiResponse::success(
        "Media uploaded",
        MediaUploadResponse { saved_files },
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/upload/media",
    params(
        ("model_type" = String, Query, description = "'content'"),
        ("field_name" = String, Query, description = "'main_photo' or 'other_photos'"),
        ("record_id" = Uuid, Query, description = "Target record ID")
    ),
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Detach and remove media files (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Record not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Uploads"
)]
pub async fn delete_media(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MediaQuery>,
    Json(photos_to_delete): Json<Vec<String>>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;

    content_service::remove_media(&state, &query, &photos_to_delete).await?;

    for path in &photos_to_delete {
        upload_service::remove_file(path).await;
    }

    Ok(Json(ApiResponse::success(
        "Media deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
