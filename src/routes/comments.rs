use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::comments::{AdminCommentPayload, CommentPayload},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Comment,
    response::ApiResponse,
    services::comment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comments", get(list_comments).post(create_comment))
        .route("/admin/comments", post(admin_create_comment))
        .route(
            "/admin/comments/{id}",
            put(admin_update_comment).delete(admin_delete_comment),
        )
}

#[utoipa::path(
    post,
    path = "/comments",
    request_body = CommentPayload,
    responses(
        (status = 200, description = "Create comment", body = ApiResponse<Comment>),
        (status = 403, description = "Caller has no order past the pending status")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CommentPayload>,
) -> AppResult<Json<ApiResponse<Comment>>> {
    let resp = comment_service::create_comment(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/comments",
    responses(
        (status = 200, description = "List comments", body = ApiResponse<Vec<Comment>>)
    ),
    tag = "Comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Comment>>>> {
    let resp = comment_service::list_comments(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/comments",
    request_body = AdminCommentPayload,
    responses(
        (status = 200, description = "Create comment with explicit customer (admin only)", body = ApiResponse<Comment>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn admin_create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AdminCommentPayload>,
) -> AppResult<Json<ApiResponse<Comment>>> {
    let resp = comment_service::admin_create_comment(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/comments/{id}",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = AdminCommentPayload,
    responses(
        (status = 200, description = "Update comment (admin only)", body = ApiResponse<Comment>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn admin_update_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdminCommentPayload>,
) -> AppResult<Json<ApiResponse<Comment>>> {
    let resp = comment_service::admin_update_comment(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/comments/{id}",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Delete comment (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Comments"
)]
pub async fn admin_delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = comment_service::admin_delete_comment(&state, &user, id).await?;
    Ok(Json(resp))
}
