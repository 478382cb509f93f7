use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    dto::comments::{AdminCommentPayload, CommentPayload},
    entity::{
        comments::{ActiveModel as CommentActive, Entity as Comments, Model as CommentModel},
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Comment,
    response::{ApiResponse, Meta},
    services::order_service::STATUS_PENDING,
    state::AppState,
};

/// Commenting requires at least one order that has moved past the pending
/// status.
pub async fn create_comment(
    state: &AppState,
    user: &AuthUser,
    payload: CommentPayload,
) -> AppResult<ApiResponse<Comment>> {
    let eligible = Orders::find()
        .filter(OrderCol::CustomerId.eq(user.user_id))
        .filter(OrderCol::Status.ne(STATUS_PENDING))
        .count(&state.orm)
        .await?;

    if eligible == 0 {
        return Err(AppError::Forbidden);
    }

    let comment = CommentActive {
        id: Set(Uuid::new_v4()),
        created_at: NotSet,
        title: Set(payload.title),
        text: Set(payload.text),
        star: Set(payload.star),
        customer_name: Set(user.name.clone()),
        customer_id: Set(Some(user.user_id)),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Comment created",
        comment_from_entity(comment),
        None,
    ))
}

pub async fn list_comments(state: &AppState) -> AppResult<ApiResponse<Vec<Comment>>> {
    let comments = Comments::find()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(comment_from_entity)
        .collect();
    Ok(ApiResponse::success("OK", comments, Some(Meta::empty())))
}

pub async fn admin_create_comment(
    state: &AppState,
    user: &AuthUser,
    payload: AdminCommentPayload,
) -> AppResult<ApiResponse<Comment>> {
    ensure_admin(user)?;

    let comment = CommentActive {
        id: Set(Uuid::new_v4()),
        created_at: NotSet,
        title: Set(payload.title),
        text: Set(payload.text),
        star: Set(payload.star),
        customer_name: Set(payload.customer_name),
        customer_id: Set(payload.customer_id),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Comment created",
        comment_from_entity(comment),
        None,
    ))
}

pub async fn admin_update_comment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AdminCommentPayload,
) -> AppResult<ApiResponse<Comment>> {
    ensure_admin(user)?;

    let existing = Comments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: CommentActive = existing.into();
    active.title = Set(payload.title);
    active.text = Set(payload.text);
    active.star = Set(payload.star);
    active.customer_name = Set(payload.customer_name);
    active.customer_id = Set(payload.customer_id);
    let comment = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Comment updated",
        comment_from_entity(comment),
        Some(Meta::empty()),
    ))
}

pub async fn admin_delete_comment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    Comments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Comments::delete_by_id(id).exec(&state.orm).await?;

    Ok(ApiResponse::success(
        "Comment deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn comment_from_entity(model: CommentModel) -> Comment {
    Comment {
        id: model.id,
        created_at: model.created_at.with_timezone(&chrono::Utc),
        title: model.title,
        text: model.text,
        star: model.star,
        customer_name: model.customer_name,
        customer_id: model.customer_id,
    }
}
