use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::auth::{
        Claims, LoginRequest, LoginResponse, RegisterRequest, TokenRequest, TokenResponse,
        VerifyClaims,
    },
    error::{AppError, AppResult},
    middleware::auth::PRIVILEGE_CUSTOMER,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let digest = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(digest)
}

pub fn verify_password(plain: &str, digest: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed_hash)
        .is_ok()
}

pub fn encode_token(claims: &Claims, secret: &str) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Decode and signature-verify a bearer token. Tokens carry no expiry claim,
/// so expiry validation is disabled.
pub fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

pub fn encode_verify_token(claims: &VerifyClaims, secret: &str) -> AppResult<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_verify_token(token: &str, secret: &str) -> AppResult<VerifyClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<VerifyClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

async fn authenticate(state: &AppState, email: &str, password: &str) -> AppResult<User> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&state.pool)
        .await?;

    let user = user.ok_or(AppError::Unauthorized)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    Ok(user)
}

pub async fn issue_token(state: &AppState, payload: TokenRequest) -> AppResult<TokenResponse> {
    let user = authenticate(state, &payload.username, &payload.password).await?;

    let token = encode_token(
        &Claims {
            id: user.id,
            email: user.email.clone(),
        },
        &state.config.jwt_secret,
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
    })
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let user = authenticate(state, &payload.email, &payload.password).await?;

    let token = encode_token(
        &Claims {
            id: user.id,
            email: user.email.clone(),
        },
        &state.config.jwt_secret,
    )?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token, user },
        Some(Meta::empty()),
    ))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(payload.email.as_str())
        .fetch_optional(&state.pool)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE phone_number = $1")
        .bind(payload.phone_number.as_str())
        .fetch_optional(&state.pool)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest(
            "Phone number is already taken".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let id = Uuid::new_v4();

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, surname, email, phone_number, password_hash, is_verified, privilege)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.name.as_str())
    .bind(payload.surname.as_str())
    .bind(payload.email.as_str())
    .bind(payload.phone_number.as_str())
    .bind(password_hash)
    .bind(PRIVILEGE_CUSTOMER)
    .fetch_one(&state.pool)
    .await?;

    send_verification_mail(state, &user)?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User created, please check your email for the verification link",
        user,
        None,
    ))
}

fn send_verification_mail(state: &AppState, user: &User) -> AppResult<()> {
    let Some(mailer) = state.mailer.clone() else {
        tracing::warn!(user_id = %user.id, "no mailer configured, skipping verification mail");
        return Ok(());
    };

    let token = encode_verify_token(
        &VerifyClaims {
            id: user.id,
            username: user.name.clone(),
        },
        &state.config.jwt_secret,
    )?;
    let link = format!(
        "{}/verification?token={}",
        state.config.public_base_url, token
    );

    let email = user.email.clone();
    let name = user.name.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_verification(&email, &name, &link).await {
            tracing::warn!(error = %err, "verification mail failed");
        }
    });

    Ok(())
}

/// Resolve the emailed verification token and flag the account as verified.
/// Returns the user's name for the confirmation page.
pub async fn verify_email(state: &AppState, token: &str) -> AppResult<String> {
    let claims = decode_verify_token(token, &state.config.jwt_secret)?;

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(claims.id)
        .fetch_optional(&state.pool)
        .await?;
    let user = user.ok_or(AppError::Unauthorized)?;

    if user.is_verified {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("UPDATE users SET is_verified = TRUE WHERE id = $1")
        .bind(user.id)
        .execute(&state.pool)
        .await?;

    Ok(user.name)
}
