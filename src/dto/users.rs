use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Order, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmailQuery {
    pub new_email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserInfoQuery {
    pub new_name: Option<String>,
    pub new_surname: Option<String>,
    pub new_email: Option<String>,
    pub new_phone_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub is_verified: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub join_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub user: ProfileUser,
    pub orders: Vec<Order>,
}
