use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::users::{
        CreateUserRequest, ProfileResponse, ProfileUser, UpdateEmailQuery, UpdatePasswordRequest,
        UpdateUserInfoQuery, UpdateUserRequest, UserList,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::User,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    services::auth_service,
    services::order_service,
    state::AppState,
};

async fn fetch_user(state: &AppState, id: Uuid) -> AppResult<User> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    user.ok_or(AppError::NotFound)
}

async fn email_taken(state: &AppState, email: &str, exclude: Option<Uuid>) -> AppResult<bool> {
    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&state.pool)
        .await?;
    Ok(match existing {
        Some((id,)) => exclude != Some(id),
        None => false,
    })
}

pub async fn profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<ProfileResponse>> {
    let row = fetch_user(state, user.user_id).await?;
    let orders = order_service::orders_for_customer(state, row.id).await?;

    let data = ProfileResponse {
        user: ProfileUser {
            name: row.name,
            surname: row.surname,
            email: row.email,
            phone_number: row.phone_number,
            join_date: row.join_date,
        },
        orders,
    };

    Ok(ApiResponse::success("OK", data, Some(Meta::empty())))
}

pub async fn update_password(
    state: &AppState,
    user: &AuthUser,
    payload: UpdatePasswordRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let row = fetch_user(state, user.user_id).await?;

    if !auth_service::verify_password(&payload.old_password, &row.password_hash) {
        return Err(AppError::BadRequest("Old password is incorrect".into()));
    }

    let password_hash = auth_service::hash_password(&payload.new_password)?;
    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
        .bind(row.id)
        .bind(password_hash)
        .execute(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Password updated",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_email(
    state: &AppState,
    user: &AuthUser,
    query: UpdateEmailQuery,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if email_taken(state, &query.new_email, Some(user.user_id)).await? {
        return Err(AppError::BadRequest(
            "Email is used by another account".into(),
        ));
    }

    sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
        .bind(user.user_id)
        .bind(query.new_email.as_str())
        .execute(&state.pool)
        .await?;

    Ok(ApiResponse::success(
        "Email updated",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn update_user_info(
    state: &AppState,
    user: &AuthUser,
    query: UpdateUserInfoQuery,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let existing = fetch_user(state, user.user_id).await?;

    if let Some(new_email) = query.new_email.as_ref() {
        if email_taken(state, new_email, Some(user.user_id)).await? {
            return Err(AppError::BadRequest(
                "Email is used by another account".into(),
            ));
        }
    }

    let name = query.new_name.unwrap_or(existing.name);
    let surname = query.new_surname.unwrap_or(existing.surname);
    let email = query.new_email.unwrap_or(existing.email);
    let phone_number = query.new_phone_number.unwrap_or(existing.phone_number);

    sqlx::query(
        "UPDATE users SET name = $2, surname = $3, email = $4, phone_number = $5 WHERE id = $1",
    )
    .bind(user.user_id)
    .bind(name)
    .bind(surname)
    .bind(email)
    .bind(phone_number)
    .execute(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "User info updated",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn delete_self(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.user_id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<UserList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = pagination.normalize();

    let items = sqlx::query_as::<_, User>(
        "SELECT * FROM users ORDER BY join_date DESC LIMIT $1 OFFSET $2",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    let total: (i64,) = sqlx::query_as("SELECT count(*) FROM users")
        .fetch_one(&state.pool)
        .await?;

    let meta = Meta::new(page, limit, total.0);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn get_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let row = fetch_user(state, id).await?;
    Ok(ApiResponse::success("User found", row, Some(Meta::empty())))
}

pub async fn create_user(
    state: &AppState,
    user: &AuthUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;

    let password_hash = auth_service::hash_password(&payload.password)?;
    let is_verified = payload.is_verified.unwrap_or(false);
    let id = Uuid::new_v4();

    let created: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, surname, email, phone_number, password_hash, is_verified)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(payload.name.as_str())
    .bind(payload.surname.as_str())
    .bind(payload.email.as_str())
    .bind(payload.phone_number.as_str())
    .bind(password_hash)
    .bind(is_verified)
    .fetch_one(&state.pool)
    .await
    .map_err(|_| {
        AppError::BadRequest("This email or phone number is already registered".into())
    })?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "admin_user_create",
        Some("users"),
        Some(serde_json::json!({ "created_id": created.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("User created", created, None))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    ensure_admin(user)?;
    let existing = fetch_user(state, id).await?;

    if let Some(new_email) = payload.email.as_ref() {
        if email_taken(state, new_email, Some(id)).await? {
            return Err(AppError::BadRequest("Email already in use".into()));
        }
    }

    let password_hash = match payload.password {
        Some(password) => auth_service::hash_password(&password)?,
        None => existing.password_hash,
    };

    let name = payload.name.unwrap_or(existing.name);
    let surname = payload.surname.unwrap_or(existing.surname);
    let email = payload.email.unwrap_or(existing.email);
    let phone_number = payload.phone_number.unwrap_or(existing.phone_number);
    let is_verified = payload.is_verified.unwrap_or(existing.is_verified);

    let updated: User = sqlx::query_as(
        r#"
        UPDATE users
        SET name = $2, surname = $3, email = $4, phone_number = $5, password_hash = $6, is_verified = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(surname)
    .bind(email)
    .bind(phone_number)
    .bind(password_hash)
    .bind(is_verified)
    .fetch_one(&state.pool)
    .await?;

    Ok(ApiResponse::success(
        "User updated",
        updated,
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "admin_user_delete",
        Some("users"),
        Some(serde_json::json!({ "deleted_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "User deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
