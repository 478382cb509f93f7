use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_verified: bool,
    pub join_date: DateTime<Utc>,
    pub privilege: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_id: Uuid,
    pub sender_name: String,
    pub sender_surname: String,
    pub sender_city: String,
    pub sender_district: String,
    pub sender_address: String,
    pub receiver_name: String,
    pub receiver_surname: String,
    pub receiver_city: String,
    pub receiver_phone: String,
    pub jail_name: String,
    pub jail_address: String,
    pub father_name: String,
    pub ward_id: String,
    pub letter_type: String,
    pub order_price: i64,
    pub status: String,
    pub envelope_text: String,
    pub envelope_color: String,
    pub paper_color: String,
    pub cardpostals: Vec<String>,
    pub photos: Vec<String>,
    pub files: Vec<String>,
    pub smell: String,
    pub shipment_type: String,
    pub tax: i64,
    pub discount: i64,
    pub shipment_date: String,
    pub add_date: i32,
    pub track_id: String,
    pub track_link: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Photo {
    pub id: Uuid,
    pub order_id: Uuid,
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileRecord {
    pub id: Uuid,
    pub order_id: Uuid,
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Coupon {
    pub coupon_code: String,
    pub discount_rate: i32,
    pub smell_discount: bool,
    pub photo_discount: i32,
    pub cardpostal_discount: i32,
    pub discount_description: String,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub text: String,
    pub star: i32,
    pub customer_name: String,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct City {
    pub city_id: i32,
    pub country_id: i32,
    pub city_name: String,
    pub plate_no: i32,
    pub phone_code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Town {
    pub town_id: i32,
    pub city_id: i32,
    pub town_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Jail {
    pub id: i32,
    pub city_id: i32,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub jail_type: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Cardpostal {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub image_path: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub icon: Option<String>,
    pub main_photo: Option<String>,
    pub other_photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Faq {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Content {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub text: String,
    pub main_photo: Option<String>,
    pub other_photos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuLink {
    pub id: Uuid,
    pub menu_name: String,
    pub menu_url: String,
    pub target_window: String,
    pub menu_group: String,
    pub is_dropdown: bool,
    pub dropdown_items: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct EnvelopeSchema {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct EnvelopeColor {
    pub id: Uuid,
    pub color_name: String,
    pub color_code: String,
    pub color_price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct PaperColor {
    pub id: Uuid,
    pub color_name: String,
    pub color_code: String,
    pub color_price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct EnvelopeSmell {
    pub id: Uuid,
    pub smell_name: String,
    pub smell_price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ShipmentType {
    pub id: Uuid,
    pub type_name: String,
    pub type_description: String,
    pub shipment_price: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Price {
    pub id: Uuid,
    pub price_name: String,
    pub price_description: String,
    pub price_value: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Feature {
    pub id: Uuid,
    pub feature_name: String,
    pub feature_logo: String,
    pub feature_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
