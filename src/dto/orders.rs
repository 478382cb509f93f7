use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Order;

/// Create/update payload. Every field is independently present-or-absent;
/// customer identity and order date are stamped server-side and never
/// accepted from the caller.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderPayload {
    pub sender_name: Option<String>,
    pub sender_surname: Option<String>,
    pub sender_city: Option<String>,
    pub sender_district: Option<String>,
    pub sender_address: Option<String>,
    pub receiver_name: Option<String>,
    pub receiver_surname: Option<String>,
    pub receiver_city: Option<String>,
    pub receiver_phone: Option<String>,
    pub jail_name: Option<String>,
    pub jail_address: Option<String>,
    pub father_name: Option<String>,
    pub ward_id: Option<String>,
    pub letter_type: Option<String>,
    pub order_price: Option<i64>,
    pub status: Option<String>,
    pub envelope_text: Option<String>,
    pub envelope_color: Option<String>,
    pub paper_color: Option<String>,
    pub cardpostals: Option<Vec<String>>,
    pub smell: Option<String>,
    pub shipment_type: Option<String>,
    pub tax: Option<i64>,
    pub discount: Option<i64>,
    pub shipment_date: Option<String>,
    pub add_date: Option<i32>,
    pub track_id: Option<String>,
    pub track_link: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingStatusResponse {
    pub not_send: bool,
}
