use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, models::User, services::auth_service, state::AppState};

pub const PRIVILEGE_CUSTOMER: &str = "Müşteri";
pub const PRIVILEGE_ADMIN: &str = "Admin";

/// Caller identity resolved from the bearer token. Every failure mode
/// (missing header, malformed token, bad signature, unknown user) collapses
/// into `Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub privilege: String,
    pub is_verified: bool,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.privilege == PRIVILEGE_ADMIN
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_customer(user: &AuthUser) -> Result<(), AppError> {
    if user.privilege != PRIVILEGE_CUSTOMER && user.privilege != PRIVILEGE_ADMIN {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?;

        let auth_str = auth_header.to_str().map_err(|_| AppError::Unauthorized)?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?
            .trim();

        let claims = auth_service::decode_token(token, &state.config.jwt_secret)?;

        let user: User = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(claims.id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser {
            user_id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            privilege: user.privilege,
            is_verified: user.is_verified,
        })
    }
}
