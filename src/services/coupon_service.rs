use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::coupons::{
        AdminCouponList, CouponList, CouponUserRef, CouponWithUsers, CreateCouponRequest,
        UpdateCouponRequest, ValidateCouponResponse,
    },
    entity::{
        coupon_users::{ActiveModel as CouponUserActive, Column as CouponUserCol, Entity as CouponUsers},
        coupons::{ActiveModel as CouponActive, Column as CouponCol, Entity as Coupons, Model as CouponModel},
        users::{Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Coupon,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Inclusive validity-window check against an absolute instant.
pub fn window_contains(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start <= now && now <= end
}

/// Lazy deactivation: recompute the active flag on read and persist it only
/// when it changed. Idempotent under repeated calls for a stable clock.
async fn refresh_active(state: &AppState, model: CouponModel) -> AppResult<CouponModel> {
    let now = Utc::now();
    let active = window_contains(
        now,
        model.start_date.with_timezone(&Utc),
        model.end_date.with_timezone(&Utc),
    );

    if model.is_active == active {
        return Ok(model);
    }

    let mut patch: CouponActive = model.into();
    patch.is_active = Set(active);
    Ok(patch.update(&state.orm).await?)
}

async fn find_by_code(state: &AppState, code: &str) -> AppResult<CouponModel> {
    Coupons::find()
        .filter(CouponCol::CouponCode.eq(code))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)
}

async fn association_exists(state: &AppState, coupon_id: Uuid, user_id: Uuid) -> AppResult<bool> {
    let existing = CouponUsers::find_by_id((coupon_id, user_id))
        .one(&state.orm)
        .await?;
    Ok(existing.is_some())
}

async fn assign_users(state: &AppState, coupon_id: Uuid, user_ids: &[Uuid]) -> AppResult<()> {
    // Unknown user ids are silently skipped.
    let existing: Vec<Uuid> = Users::find()
        .filter(UserCol::Id.is_in(user_ids.to_vec()))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();

    for user_id in existing {
        CouponUserActive {
            coupon_id: Set(coupon_id),
            user_id: Set(user_id),
        }
        .insert(&state.orm)
        .await?;
    }

    Ok(())
}

pub async fn create_coupon(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCouponRequest,
) -> AppResult<ApiResponse<Coupon>> {
    ensure_admin(user)?;

    let now = Utc::now();
    if payload.coupon.start_date < now {
        return Err(AppError::BadRequest(
            "Start date cannot be in the past".into(),
        ));
    }
    if payload.coupon.end_date < payload.coupon.start_date {
        return Err(AppError::BadRequest(
            "End date cannot be earlier than start date".into(),
        ));
    }

    let coupon = CouponActive {
        id: Set(Uuid::new_v4()),
        coupon_code: Set(payload.coupon.coupon_code),
        discount_rate: Set(payload.coupon.discount_rate),
        smell_discount: Set(payload.coupon.smell_discount.unwrap_or(false)),
        photo_discount: Set(payload.coupon.photo_discount.unwrap_or(0)),
        cardpostal_discount: Set(payload.coupon.cardpostal_discount.unwrap_or(0)),
        discount_description: Set(payload.coupon.discount_description.unwrap_or_default()),
        is_active: Set(true),
        start_date: Set(payload.coupon.start_date.into()),
        end_date: Set(payload.coupon.end_date.into()),
    }
    .insert(&state.orm)
    .await?;

    assign_users(state, coupon.id, &payload.user_ids).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "coupon_create",
        Some("coupons"),
        Some(serde_json::json!({ "coupon_code": coupon.coupon_code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Coupon created",
        coupon_from_entity(coupon),
        None,
    ))
}

pub async fn user_coupons(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CouponList>> {
    let coupon_ids: Vec<Uuid> = CouponUsers::find()
        .filter(CouponUserCol::UserId.eq(user.user_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|row| row.coupon_id)
        .collect();

    let mut coupons = Vec::new();
    for model in Coupons::find()
        .filter(CouponCol::Id.is_in(coupon_ids))
        .all(&state.orm)
        .await?
    {
        let refreshed = refresh_active(state, model).await?;
        coupons.push(coupon_from_entity(refreshed));
    }

    Ok(ApiResponse::success(
        "OK",
        CouponList { coupons },
        Some(Meta::empty()),
    ))
}

pub async fn all_coupons(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AdminCouponList>> {
    ensure_admin(user)?;

    let mut coupons = Vec::new();
    for model in Coupons::find().all(&state.orm).await? {
        let refreshed = refresh_active(state, model).await?;

        let user_ids: Vec<Uuid> = CouponUsers::find()
            .filter(CouponUserCol::CouponId.eq(refreshed.id))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|row| row.user_id)
            .collect();

        let users = Users::find()
            .filter(UserCol::Id.is_in(user_ids))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|u| CouponUserRef {
                id: u.id,
                email: u.email,
            })
            .collect();

        coupons.push(CouponWithUsers {
            coupon: coupon_from_entity(refreshed),
            users,
        });
    }

    Ok(ApiResponse::success(
        "OK",
        AdminCouponList { coupons },
        Some(Meta::empty()),
    ))
}

pub async fn add_coupon(
    state: &AppState,
    user: &AuthUser,
    code: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let coupon = find_by_code(state, code).await?;

    if association_exists(state, coupon.id, user.user_id).await? {
        return Err(AppError::BadRequest(
            "You are already a participant of this coupon".into(),
        ));
    }

    CouponUserActive {
        coupon_id: Set(coupon.id),
        user_id: Set(user.user_id),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "coupon_redeem",
        Some("coupons"),
        Some(serde_json::json!({ "coupon_code": code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "You have been added to the coupon",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// Report coupon validity for the caller without mutating anything.
pub async fn validate_coupon(
    state: &AppState,
    user: &AuthUser,
    code: &str,
) -> AppResult<ApiResponse<ValidateCouponResponse>> {
    let coupon = find_by_code(state, code).await?;

    let now = Utc::now();
    if !window_contains(
        now,
        coupon.start_date.with_timezone(&Utc),
        coupon.end_date.with_timezone(&Utc),
    ) {
        return Err(AppError::BadRequest(
            "Coupon is not valid at this time".into(),
        ));
    }

    let data = if association_exists(state, coupon.id, user.user_id).await? {
        ValidateCouponResponse {
            status: "exists".into(),
            detail: "You already have this coupon".into(),
            coupon: coupon_from_entity(coupon),
        }
    } else {
        ValidateCouponResponse {
            status: "valid".into(),
            detail: "Coupon is valid and you do not have it yet".into(),
            coupon: coupon_from_entity(coupon),
        }
    };

    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

pub async fn remove_coupon(
    state: &AppState,
    user: &AuthUser,
    code: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let coupon = find_by_code(state, code).await?;

    if !association_exists(state, coupon.id, user.user_id).await? {
        return Err(AppError::BadRequest("You do not have this coupon".into()));
    }

    CouponUsers::delete_by_id((coupon.id, user.user_id))
        .exec(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Coupon has been removed from your account",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_coupon(
    state: &AppState,
    user: &AuthUser,
    code: &str,
    payload: UpdateCouponRequest,
) -> AppResult<ApiResponse<Coupon>> {
    ensure_admin(user)?;

    let existing = find_by_code(state, code).await?;
    let coupon_id = existing.id;
    let mut active: CouponActive = existing.into();

    let patch = payload.coupon;
    if let Some(v) = patch.coupon_code {
        active.coupon_code = Set(v);
    }
    if let Some(v) = patch.discount_rate {
        active.discount_rate = Set(v);
    }
    if let Some(v) = patch.smell_discount {
        active.smell_discount = Set(v);
    }
    if let Some(v) = patch.photo_discount {
        active.photo_discount = Set(v);
    }
    if let Some(v) = patch.cardpostal_discount {
        active.cardpostal_discount = Set(v);
    }
    if let Some(v) = patch.discount_description {
        active.discount_description = Set(v);
    }
    if let Some(v) = patch.is_active {
        active.is_active = Set(v);
    }
    if let Some(v) = patch.start_date {
        active.start_date = Set(parse_coupon_date(&v)?);
    }
    if let Some(v) = patch.end_date {
        active.end_date = Set(parse_coupon_date(&v)?);
    }

    let updated = active.update(&state.orm).await?;

    // Clear-then-add: the supplied set replaces the association wholesale.
    if let Some(user_ids) = payload.user_ids {
        CouponUsers::delete_many()
            .filter(CouponUserCol::CouponId.eq(coupon_id))
            .exec(&state.orm)
            .await?;
        if !user_ids.is_empty() {
            assign_users(state, coupon_id, &user_ids).await?;
        }
    }

    Ok(ApiResponse::success(
        "Coupon updated",
        coupon_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_coupon(
    state: &AppState,
    user: &AuthUser,
    code: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let coupon = find_by_code(state, code).await?;

    CouponUsers::delete_many()
        .filter(CouponUserCol::CouponId.eq(coupon.id))
        .exec(&state.orm)
        .await?;
    Coupons::delete_by_id(coupon.id).exec(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "coupon_delete",
        Some("coupons"),
        Some(serde_json::json!({ "coupon_code": code })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Coupon deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

/// ISO-8601 with a trailing `Z` treated as the UTC offset.
fn parse_coupon_date(raw: &str) -> AppResult<chrono::DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid date: {e}")))
}

fn coupon_from_entity(model: CouponModel) -> Coupon {
    Coupon {
        coupon_code: model.coupon_code,
        discount_rate: model.discount_rate,
        smell_discount: model.smell_discount,
        photo_discount: model.photo_discount,
        cardpostal_discount: model.cardpostal_discount,
        discount_description: model.discount_description,
        is_active: model.is_active,
        start_date: model.start_date.with_timezone(&Utc),
        end_date: model.end_date.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::window_contains;
    use chrono::{Duration, Utc};

    #[test]
    fn window_contains_is_inclusive() {
        let now = Utc::now();
        assert!(window_contains(now, now, now));
        assert!(window_contains(
            now,
            now - Duration::hours(1),
            now + Duration::hours(1)
        ));
    }

    #[test]
    fn window_rejects_instants_outside() {
        let now = Utc::now();
        assert!(!window_contains(
            now,
            now + Duration::hours(1),
            now + Duration::hours(2)
        ));
        assert!(!window_contains(
            now,
            now - Duration::hours(2),
            now - Duration::hours(1)
        ));
    }
}
