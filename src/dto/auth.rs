use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::User;

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// OAuth2 password form posted to `/token`.
#[derive(Deserialize, Debug, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Bearer token payload. Carries no expiry claim.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
}

/// Payload of the emailed verification link token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct VerifyClaims {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerificationQuery {
    pub token: String,
}
