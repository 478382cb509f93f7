use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{City, Jail, Town},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CityPayload {
    pub country_id: i32,
    pub city_name: String,
    pub plate_no: i32,
    pub phone_code: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TownPayload {
    pub city_id: i32,
    pub town_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JailPayload {
    pub city_id: i32,
    pub name: String,
    pub address: String,
    #[serde(rename = "type")]
    pub jail_type: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities).post(create_city))
        .route(
            "/cities/{city_id}",
            get(get_city).put(update_city).delete(delete_city),
        )
        .route("/towns", get(list_towns).post(create_town))
        .route("/towns/city/{city_id}", get(towns_by_city))
        .route(
            "/towns/{town_id}",
            get(get_town).put(update_town).delete(delete_town),
        )
        .route("/jails", get(list_jails).post(create_jail))
        .route("/jails/city/{city_id}", get(jails_by_city))
        .route(
            "/jails/{jail_id}",
            get(get_jail).put(update_jail).delete(delete_jail),
        )
}

#[utoipa::path(
    get,
    path = "/cities",
    responses(
        (status = 200, description = "List cities", body = ApiResponse<Vec<City>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn list_cities(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<City>>>> {
    let items = sqlx::query_as::<_, City>("SELECT * FROM cities ORDER BY city_id")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/cities/{city_id}",
    params(
        ("city_id" = i32, Path, description = "City ID")
    ),
    responses(
        (status = 200, description = "Get city", body = ApiResponse<City>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn get_city(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(city_id): Path<i32>,
) -> AppResult<Json<ApiResponse<City>>> {
    let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE city_id = $1")
        .bind(city_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", city, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/cities",
    request_body = CityPayload,
    responses(
        (status = 200, description = "Create city", body = ApiResponse<City>)
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn create_city(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<CityPayload>,
) -> AppResult<Json<ApiResponse<City>>> {
    let city = sqlx::query_as::<_, City>(
        "INSERT INTO cities (country_id, city_name, plate_no, phone_code) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(payload.country_id)
    .bind(payload.city_name)
    .bind(payload.plate_no)
    .bind(payload.phone_code)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("City created", city, None)))
}

#[utoipa::path(
    put,
    path = "/cities/{city_id}",
    params(
        ("city_id" = i32, Path, description = "City ID")
    ),
    request_body = CityPayload,
    responses(
        (status = 200, description = "Update city", body = ApiResponse<City>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn update_city(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(city_id): Path<i32>,
    Json(payload): Json<CityPayload>,
) -> AppResult<Json<ApiResponse<City>>> {
    let city = sqlx::query_as::<_, City>(
        "UPDATE cities SET country_id = $2, city_name = $3, plate_no = $4, phone_code = $5 WHERE city_id = $1 RETURNING *",
    )
    .bind(city_id)
    .bind(payload.country_id)
    .bind(payload.city_name)
    .bind(payload.plate_no)
    .bind(payload.phone_code)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "City updated",
        city,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/cities/{city_id}",
    params(
        ("city_id" = i32, Path, description = "City ID")
    ),
    responses(
        (status = 200, description = "Delete city and its towns"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn delete_city(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(city_id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let city: Option<City> = sqlx::query_as("SELECT * FROM cities WHERE city_id = $1")
        .bind(city_id)
        .fetch_optional(&state.pool)
        .await?;
    if city.is_none() {
        return Err(AppError::NotFound);
    }

    // Towns cascade with the city; jails referencing it are left in place.
    sqlx::query("DELETE FROM towns WHERE city_id = $1")
        .bind(city_id)
        .execute(&state.pool)
        .await?;
    sqlx::query("DELETE FROM cities WHERE city_id = $1")
        .bind(city_id)
        .execute(&state.pool)
        .await?;

    Ok(Json(ApiResponse::success(
        "City and its towns deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/towns",
    responses(
        (status = 200, description = "List towns", body = ApiResponse<Vec<Town>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn list_towns(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Town>>>> {
    let items = sqlx::query_as::<_, Town>("SELECT * FROM towns ORDER BY town_id")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/towns/city/{city_id}",
    params(
        ("city_id" = i32, Path, description = "City ID")
    ),
    responses(
        (status = 200, description = "Towns of a city", body = ApiResponse<Vec<Town>>),
        (status = 404, description = "No towns for this city")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn towns_by_city(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(city_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<Town>>>> {
    let items = sqlx::query_as::<_, Town>("SELECT * FROM towns WHERE city_id = $1")
        .bind(city_id)
        .fetch_all(&state.pool)
        .await?;
    if items.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/towns/{town_id}",
    params(
        ("town_id" = i32, Path, description = "Town ID")
    ),
    responses(
        (status = 200, description = "Get town", body = ApiResponse<Town>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn get_town(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(town_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Town>>> {
    let town = sqlx::query_as::<_, Town>("SELECT * FROM towns WHERE town_id = $1")
        .bind(town_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", town, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/towns",
    request_body = TownPayload,
    responses(
        (status = 200, description = "Create town", body = ApiResponse<Town>)
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn create_town(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<TownPayload>,
) -> AppResult<Json<ApiResponse<Town>>> {
    let town = sqlx::query_as::<_, Town>(
        "INSERT INTO towns (city_id, town_name) VALUES ($1, $2) RETURNING *",
    )
    .bind(payload.city_id)
    .bind(payload.town_name)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("Town created", town, None)))
}

#[utoipa::path(
    put,
    path = "/towns/{town_id}",
    params(
        ("town_id" = i32, Path, description = "Town ID")
    ),
    request_body = TownPayload,
    responses(
        (status = 200, description = "Update town", body = ApiResponse<Town>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn update_town(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(town_id): Path<i32>,
    Json(payload): Json<TownPayload>,
) -> AppResult<Json<ApiResponse<Town>>> {
    let town = sqlx::query_as::<_, Town>(
        "UPDATE towns SET city_id = $2, town_name = $3 WHERE town_id = $1 RETURNING *",
    )
    .bind(town_id)
    .bind(payload.city_id)
    .bind(payload.town_name)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "Town updated",
        town,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/towns/{town_id}",
    params(
        ("town_id" = i32, Path, description = "Town ID")
    ),
    responses(
        (status = 200, description = "Delete town"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn delete_town(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(town_id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let result = sqlx::query("DELETE FROM towns WHERE town_id = $1")
        .bind(town_id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success(
        "Town deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    get,
    path = "/jails",
    responses(
        (status = 200, description = "List jails", body = ApiResponse<Vec<Jail>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn list_jails(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<Jail>>>> {
    let items = sqlx::query_as::<_, Jail>("SELECT * FROM jails ORDER BY id")
        .fetch_all(&state.pool)
        .await?;
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/jails/city/{city_id}",
    params(
        ("city_id" = i32, Path, description = "City ID")
    ),
    responses(
        (status = 200, description = "Jails of a city", body = ApiResponse<Vec<Jail>>),
        (status = 404, description = "No jails for this city")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn jails_by_city(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(city_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Vec<Jail>>>> {
    let items = sqlx::query_as::<_, Jail>("SELECT * FROM jails WHERE city_id = $1")
        .bind(city_id)
        .fetch_all(&state.pool)
        .await?;
    if items.is_empty() {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success("OK", items, Some(Meta::empty()))))
}

#[utoipa::path(
    get,
    path = "/jails/{jail_id}",
    params(
        ("jail_id" = i32, Path, description = "Jail ID")
    ),
    responses(
        (status = 200, description = "Get jail", body = ApiResponse<Jail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn get_jail(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(jail_id): Path<i32>,
) -> AppResult<Json<ApiResponse<Jail>>> {
    let jail = sqlx::query_as::<_, Jail>("SELECT * FROM jails WHERE id = $1")
        .bind(jail_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success("OK", jail, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/jails",
    request_body = JailPayload,
    responses(
        (status = 200, description = "Create jail (admin only)", body = ApiResponse<Jail>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn create_jail(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<JailPayload>,
) -> AppResult<Json<ApiResponse<Jail>>> {
    ensure_admin(&user)?;
    let jail = sqlx::query_as::<_, Jail>(
        "INSERT INTO jails (city_id, name, address, type) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(payload.city_id)
    .bind(payload.name)
    .bind(payload.address)
    .bind(payload.jail_type)
    .fetch_one(&state.pool)
    .await?;
    Ok(Json(ApiResponse::success("Jail created", jail, None)))
}

#[utoipa::path(
    put,
    path = "/jails/{jail_id}",
    params(
        ("jail_id" = i32, Path, description = "Jail ID")
    ),
    request_body = JailPayload,
    responses(
        (status = 200, description = "Update jail (admin only)", body = ApiResponse<Jail>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn update_jail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(jail_id): Path<i32>,
    Json(payload): Json<JailPayload>,
) -> AppResult<Json<ApiResponse<Jail>>> {
    ensure_admin(&user)?;
    let jail = sqlx::query_as::<_, Jail>(
        "UPDATE jails SET city_id = $2, name = $3, address = $4, type = $5 WHERE id = $1 RETURNING *",
    )
    .bind(jail_id)
    .bind(payload.city_id)
    .bind(payload.name)
    .bind(payload.address)
    .bind(payload.jail_type)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(
        "Jail updated",
        jail,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/jails/{jail_id}",
    params(
        ("jail_id" = i32, Path, description = "Jail ID")
    ),
    responses(
        (status = 200, description = "Delete jail (admin only)"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Geo"
)]
pub async fn delete_jail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(jail_id): Path<i32>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    ensure_admin(&user)?;
    let result = sqlx::query("DELETE FROM jails WHERE id = $1")
        .bind(jail_id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }
    Ok(Json(ApiResponse::success(
        "Jail deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
