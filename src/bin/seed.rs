use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_mailorder_api::config::AppConfig;
use axum_mailorder_api::db::create_pool;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_user(
        &pool,
        "admin@example.com",
        "+90 555 000 0001",
        "admin123",
        "Admin",
    )
    .await?;
    let customer_id = ensure_user(
        &pool,
        "musteri@example.com",
        "+90 555 000 0002",
        "musteri123",
        "Müşteri",
    )
    .await?;

    seed_catalog(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, Customer ID: {customer_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    phone_number: &str,
    password: &str,
    privilege: &str,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, surname, email, phone_number, password_hash, is_verified, privilege)
        VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7)
        ON CONFLICT (email) DO UPDATE SET privilege = EXCLUDED.privilege
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind("Seed")
    .bind("User")
    .bind(email)
    .bind(phone_number)
    .bind(password_hash)
    .bind(privilege)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (privilege={privilege})");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let (existing,): (i64,) = sqlx::query_as("SELECT count(*) FROM envelope_colors")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        println!("Catalog already seeded");
        return Ok(());
    }

    let envelope_colors = [
        ("Beyaz", "#ffffff", 0),
        ("Krem", "#f5f0dc", 500),
        ("Mavi", "#8fb8de", 500),
    ];
    for (name, code, price) in envelope_colors {
        sqlx::query(
            "INSERT INTO envelope_colors (id, color_name, color_code, color_price) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(code)
        .bind(price as i64)
        .execute(pool)
        .await?;
    }

    let paper_colors = [("Beyaz", "#ffffff", 0), ("Sarı", "#f7e8a4", 300)];
    for (name, code, price) in paper_colors {
        sqlx::query(
            "INSERT INTO paper_colors (id, color_name, color_code, color_price) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(code)
        .bind(price as i64)
        .execute(pool)
        .await?;
    }

    let smells = [("Lavanta", 750), ("Gül", 750)];
    for (name, price) in smells {
        sqlx::query("INSERT INTO envelope_smells (id, smell_name, smell_price) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(price as i64)
            .execute(pool)
            .await?;
    }

    let shipment_types = [
        ("Standart", "PTT standart gönderi", 2000),
        ("Hızlı", "Kargo ile hızlı gönderi", 4500),
    ];
    for (name, description, price) in shipment_types {
        sqlx::query(
            "INSERT INTO shipment_types (id, type_name, type_description, shipment_price) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price as i64)
        .execute(pool)
        .await?;
    }

    let prices = [
        ("mektup_baz", "Mektup baz fiyatı", 1500),
        ("fotograf", "Fotoğraf başına fiyat", 500),
        ("kartpostal", "Kartpostal başına fiyat", 800),
    ];
    for (name, description, value) in prices {
        sqlx::query(
            r#"
            INSERT INTO prices (id, price_name, price_description, price_value)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (price_name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(value as i64)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}
