use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::content::MenuLinkPayload,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::MenuLink,
    response::ApiResponse,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu_links", get(list_menu_links).post(create_menu_link))
        .route(
            "/menu_links/{id}",
            get(get_menu_link)
                .put(update_menu_link)
                .delete(delete_menu_link),
        )
}

#[utoipa::path(
    post,
    path = "/menu_links",
    request_body = MenuLinkPayload,
    responses(
        (status = 200, description = "Create menu link (admin only)", body = ApiResponse<MenuLink>),
        (status = 400, description = "Dropdown without items"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn create_menu_link(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<MenuLinkPayload>,
) -> AppResult<Json<ApiResponse<MenuLink>>> {
    ensure_admin(&user)?;
    let resp = content_service::create_menu_link(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/menu_links",
    responses(
        (status = 200, description = "List menu links", body = ApiResponse<Vec<MenuLink>>)
    ),
    tag = "Content"
)]
pub async fn list_menu_links(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MenuLink>>>> {
    let resp = content_service::list_menu_links(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/menu_links/{id}",
    params(
        ("id" = Uuid, Path, description = "Menu link ID")
    ),
    responses(
        (status = 200, description = "Get menu link", body = ApiResponse<MenuLink>),
        (status = 404, description = "Not Found")
    ),
    tag = "Content"
)]
pub async fn get_menu_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<MenuLink>>> {
    let resp = content_service::get_menu_link(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/menu_links/{id}",
    params(
        ("id" = Uuid, Path, description = "Menu link ID")
    ),
    request_body = MenuLinkPayload,
    responses(
        (status = 200, description = "Update menu link (admin only)", body = ApiResponse<MenuLink>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn update_menu_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MenuLinkPayload>,
) -> AppResult<Json<ApiResponse<MenuLink>>> {
    ensure_admin(&user)?;
    let resp = content_service::update_menu_link(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/menu_links/{id}",
    params(
        ("id" = Uuid, Path, description = "Menu link ID")
    ),
    responses(
        (status = 200, description = "Delete menu link (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Content"
)]
pub async fn delete_menu_link(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let resp = content_service::delete_menu_link(&state, id).await?;
    Ok(Json(resp))
}
