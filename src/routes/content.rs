use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::content::{BlogPayload, ContentPayload, FaqPayload},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Blog, Content, Faq},
    response::ApiResponse,
    services::{content_service, upload_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs).post(create_blog))
        .route("/blogs/{id}", put(update_blog).delete(delete_blog))
        .route("/sss", get(list_faqs).post(create_faq))
        .route("/sss/{id}", put(update_faq).delete(delete_faq))
        .route("/content", get(list_contents).post(create_content))
        .route("/content/{id}", put(update_content).delete(delete_content))
}

#[utoipa::path(
    post,
    path = "/blogs",
    responses(
        (status = 200, description = "Create blog from multipart form (admin only)", body = ApiResponse<Blog>),
        (status = 400, description = "Malformed form"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn create_blog(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<Blog>>> {
    ensure_admin(&user)?;

    let mut title = String::new();
    let mut text = String::new();
    let mut icon: Option<(String, Vec<u8>)> = None;
    let mut main_photo: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "text" => {
                text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "icon" | "main_photo" => {
                let filename = field.file_name().unwrap_or(name.as_str()).to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?
                    .to_vec();
                if name == "icon" {
                    icon = Some((filename, bytes));
                } else {
                    main_photo = Some((filename, bytes));
                }
            }
            _ => {}
        }
    }

    if title.is_empty() {
        return Err(AppError::BadRequest("title is required".into()));
    }

    let slug = content_service::slugify(&title);
    let dir = format!("{}/blogs", state.config.upload_dir);

    let icon_path = match icon {
        Some((filename, bytes)) => Some(
            upload_service::save_upload(&dir, &format!("{slug}_icon_{filename}"), &bytes).await?,
        ),
        None => None,
    };
    let main_photo_path = match main_photo {
        Some((filename, bytes)) => Some(
            upload_service::save_upload(&dir, &format!("{slug}_main_{filename}"), &bytes).await?,
        ),
        None => None,
    };

    let resp = content_service::create_blog(
        &state,
        BlogPayload { title, text },
        icon_path,
        main_photo_path,
    )
    .await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/blogs",
    responses(
        (status = 200, description = "List blogs", body = ApiResponse<Vec<Blog>>)
    ),
    tag = "Content"
)]
pub async fn list_blogs(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Blog>>>> {
    let resp = content_service::list_blogs(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/blogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Blog ID")
    ),
    request_body = BlogPayload,
    responses(
        (status = 200, description = "Update blog, re-slugging from the title (admin only)", body = ApiResponse<Blog>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn update_blog(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BlogPayload>,
) -> AppResult<Json<ApiResponse<Blog>>> {
    ensure_admin(&user)?;
    let resp = content_service::update_blog(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Blog ID")
    ),
    responses(
        (status = 200, description = "Delete blog (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn delete_blog(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let resp = content_service::delete_blog(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/sss",
    responses(
        (status = 200, description = "List FAQ entries", body = ApiResponse<Vec<Faq>>)
    ),
    tag = "Content"
)]
pub async fn list_faqs(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Faq>>>> {
    let resp = content_service::list_faqs(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/sss",
    request_body = FaqPayload,
    responses(
        (status = 200, description = "Create FAQ entry (admin only)", body = ApiResponse<Faq>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn create_faq(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<FaqPayload>,
) -> AppResult<Json<ApiResponse<Faq>>> {
    ensure_admin(&user)?;
    let resp = content_service::create_faq(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/sss/{id}",
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    request_body = FaqPayload,
    responses(
        (status = 200, description = "Update FAQ entry (admin only)", body = ApiResponse<Faq>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn update_faq(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FaqPayload>,
) -> AppResult<Json<ApiResponse<Faq>>> {
    ensure_admin(&user)?;
    let resp = content_service::update_faq(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/sss/{id}",
    params(
        ("id" = Uuid, Path, description = "FAQ ID")
    ),
    responses(
        (status = 200, description = "Delete FAQ entry (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn delete_faq(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let resp = content_service::delete_faq(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/content",
    responses(
        (status = 200, description = "List content pages", body = ApiResponse<Vec<Content>>)
    ),
    tag = "Content"
)]
pub async fn list_contents(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Content>>>> {
    let resp = content_service::list_contents(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/content",
    request_body = ContentPayload,
    responses(
        (status = 200, description = "Create content page (admin only)", body = ApiResponse<Content>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn create_content(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ContentPayload>,
) -> AppResult<Json<ApiResponse<Content>>> {
    ensure_admin(&user)?;
    let resp = content_service::create_content(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    request_body = ContentPayload,
    responses(
        (status = 200, description = "Update content page (admin only)", body = ApiResponse<Content>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn update_content(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ContentPayload>,
) -> AppResult<Json<ApiResponse<Content>>> {
    ensure_admin(&user)?;
    let resp = content_service::update_content(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/content/{id}",
    params(
        ("id" = Uuid, Path, description = "Content ID")
    ),
    responses(
        (status = 200, description = "Delete content page (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn delete_content(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let resp = content_service::delete_content(&state, id).await?;
    Ok(Json(resp))
}
