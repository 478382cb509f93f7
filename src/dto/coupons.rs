use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Coupon;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CouponPayload {
    pub coupon_code: String,
    pub discount_rate: i32,
    pub smell_discount: Option<bool>,
    pub photo_discount: Option<i32>,
    pub cardpostal_discount: Option<i32>,
    pub discount_description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCouponRequest {
    pub coupon: CouponPayload,
    pub user_ids: Vec<Uuid>,
}

/// Admin patch. Date fields arrive as ISO-8601 strings; a trailing `Z` is
/// treated as the UTC offset.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CouponPatch {
    pub coupon_code: Option<String>,
    pub discount_rate: Option<i32>,
    pub smell_discount: Option<bool>,
    pub photo_discount: Option<i32>,
    pub cardpostal_discount: Option<i32>,
    pub discount_description: Option<String>,
    pub is_active: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCouponRequest {
    pub coupon: CouponPatch,
    /// Replaces the full association set when present (clear-then-add).
    pub user_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CouponCodeQuery {
    pub coupon_code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponList {
    pub coupons: Vec<Coupon>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponUserRef {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CouponWithUsers {
    pub coupon: Coupon,
    pub users: Vec<CouponUserRef>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminCouponList {
    pub coupons: Vec<CouponWithUsers>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidateCouponResponse {
    pub status: String,
    pub detail: String,
    pub coupon: Coupon,
}
