use axum_mailorder_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
    middleware::auth::AuthUser,
    state::AppState,
};
use sea_orm::{ConnectionTrait, Statement};
use uuid::Uuid;

/// Build an `AppState` against the test database, or `None` (skip) when no
/// database is configured in the environment.
pub async fn setup_state() -> anyhow::Result<Option<AppState>> {
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration tests."
                );
                return Ok(None);
            }
        };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE coupon_users, coupons, comments, photos, files, orders, audit_logs, \
         towns, jails, cities, categories, cardpostals, blogs, faqs, contents, menu_links, \
         envelope_schemas, envelope_colors, paper_colors, envelope_smells, shipment_types, \
         prices, features, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    let config = AppConfig {
        database_url: database_url.clone(),
        host: "127.0.0.1".to_string(),
        port: 8000,
        jwt_secret: "test-secret".to_string(),
        upload_dir: "static/uploads".to_string(),
        public_base_url: "http://localhost:8000".to_string(),
        mail_host: "smtp.gmail.com".to_string(),
        mail_username: String::new(),
        mail_password: String::new(),
    };

    Ok(Some(AppState {
        pool,
        orm,
        config,
        mailer: None,
    }))
}

pub async fn create_user(
    state: &AppState,
    privilege: &str,
    email: &str,
) -> anyhow::Result<AuthUser> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO users (id, name, surname, email, phone_number, password_hash, is_verified, privilege)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
        "#,
    )
    .bind(id)
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(format!("+90-{id}"))
    .bind("dummy")
    .bind(privilege)
    .execute(&state.pool)
    .await?;

    Ok(AuthUser {
        user_id: id,
        name: "Test".to_string(),
        surname: "User".to_string(),
        email: email.to_string(),
        privilege: privilege.to_string(),
        is_verified: true,
    })
}
