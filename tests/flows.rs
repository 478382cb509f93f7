mod common;

use axum::extract::{Path, State};
use axum_mailorder_api::{
    dto::auth::{RegisterRequest, TokenRequest},
    dto::comments::CommentPayload,
    dto::content::{FaqPayload, MenuLinkPayload},
    dto::coupons::{CouponPayload, CreateCouponRequest},
    dto::orders::OrderPayload,
    entity::coupons::ActiveModel as CouponActive,
    error::AppError,
    routes::geo,
    services::{
        auth_service, comment_service, content_service, coupon_service, order_service,
        report_service,
    },
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Set};
use tokio::sync::Mutex;
use uuid::Uuid;

// Integration tests share one database; serialize them within this binary.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

#[tokio::test]
async fn issued_tokens_resolve_to_the_registered_user() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let registered = auth_service::register_user(
        &state,
        RegisterRequest {
            name: "Çağrı".into(),
            surname: "Öğüt".into(),
            email: "cagri@example.com".into(),
            phone_number: "+90 555 111 2233".into(),
            password: "cok-gizli".into(),
        },
    )
    .await?;
    let user = registered.data.expect("user");
    assert!(!user.is_verified);
    assert_eq!(user.privilege, "Müşteri");

    let token = auth_service::issue_token(
        &state,
        TokenRequest {
            username: "cagri@example.com".into(),
            password: "cok-gizli".into(),
        },
    )
    .await?;

    let claims = auth_service::decode_token(&token.access_token, &state.config.jwt_secret)?;
    assert_eq!(claims.id, user.id);
    assert_eq!(claims.email, user.email);

    // Bad credentials never issue a token.
    let denied = auth_service::issue_token(
        &state,
        TokenRequest {
            username: "cagri@example.com".into(),
            password: "yanlis".into(),
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Unauthorized)));

    Ok(())
}

#[tokio::test]
async fn order_ownership_and_admin_asymmetry() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let customer = common::create_user(&state, "Müşteri", "owner@example.com").await?;
    let other = common::create_user(&state, "Müşteri", "other@example.com").await?;
    let admin = common::create_user(&state, "Admin", "admin@example.com").await?;

    let created = order_service::create_order(
        &state,
        &customer,
        OrderPayload {
            receiver_name: Some("Ali".into()),
            order_price: Some(2500),
            ..OrderPayload::default()
        },
    )
    .await?;
    let order = created.data.expect("order data");

    // Identity is stamped from the caller.
    assert_eq!(order.customer_id, customer.user_id);
    assert_eq!(order.customer_name, "Test User");
    assert_eq!(order.status, "Sipariş Bekleniyor");

    // Another customer can neither read, update nor delete it.
    let read = order_service::get_order(&state, &other, order.id).await;
    assert!(matches!(read, Err(AppError::Forbidden)));
    let update = order_service::update_order(
        &state,
        &other,
        order.id,
        OrderPayload {
            status: Some("Kargoya Verildi".into()),
            ..OrderPayload::default()
        },
    )
    .await;
    assert!(matches!(update, Err(AppError::Forbidden)));
    let delete = order_service::delete_order(&state, &other, order.id).await;
    assert!(matches!(delete, Err(AppError::Forbidden)));

    // Admins get no bypass on the customer update path, only on the admin one.
    let admin_update = order_service::update_order(
        &state,
        &admin,
        order.id,
        OrderPayload {
            status: Some("Kargoya Verildi".into()),
            ..OrderPayload::default()
        },
    )
    .await;
    assert!(matches!(admin_update, Err(AppError::Forbidden)));

    let via_admin_path = order_service::admin_update_order(
        &state,
        &admin,
        order.id,
        OrderPayload {
            status: Some("Kargoya Verildi".into()),
            ..OrderPayload::default()
        },
    )
    .await?;
    assert_eq!(via_admin_path.data.expect("order").status, "Kargoya Verildi");

    order_service::admin_delete_order(&state, &admin, order.id).await?;
    let gone = order_service::admin_get_order(&state, &admin, order.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    Ok(())
}

#[tokio::test]
async fn pending_status_reflects_order_statuses() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let customer = common::create_user(&state, "Müşteri", "pending@example.com").await?;
    let admin = common::create_user(&state, "Admin", "admin2@example.com").await?;

    let empty = order_service::has_pending_orders(&state, &customer).await?;
    assert!(!empty.data.expect("data").not_send);

    let created = order_service::create_order(&state, &customer, OrderPayload::default()).await?;
    let order = created.data.expect("order");

    let pending = order_service::has_pending_orders(&state, &customer).await?;
    assert!(pending.data.expect("data").not_send);

    order_service::admin_update_order(
        &state,
        &admin,
        order.id,
        OrderPayload {
            status: Some("Gönderildi".into()),
            ..OrderPayload::default()
        },
    )
    .await?;

    let after = order_service::has_pending_orders(&state, &customer).await?;
    assert!(!after.data.expect("data").not_send);

    Ok(())
}

#[tokio::test]
async fn comment_requires_an_order_past_pending() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let customer = common::create_user(&state, "Müşteri", "reviewer@example.com").await?;
    let admin = common::create_user(&state, "Admin", "admin3@example.com").await?;

    let payload = || CommentPayload {
        title: "Harika hizmet".into(),
        text: "Mektup zamanında ulaştı".into(),
        star: 5,
    };

    // No orders at all.
    let none = comment_service::create_comment(&state, &customer, payload()).await;
    assert!(matches!(none, Err(AppError::Forbidden)));

    // Only a pending order.
    let created = order_service::create_order(&state, &customer, OrderPayload::default()).await?;
    let order = created.data.expect("order");
    let still_pending = comment_service::create_comment(&state, &customer, payload()).await;
    assert!(matches!(still_pending, Err(AppError::Forbidden)));

    // Once one order moves on, commenting opens up.
    order_service::admin_update_order(
        &state,
        &admin,
        order.id,
        OrderPayload {
            status: Some("Gönderildi".into()),
            ..OrderPayload::default()
        },
    )
    .await?;

    let comment = comment_service::create_comment(&state, &customer, payload()).await?;
    let comment = comment.data.expect("comment");
    assert_eq!(comment.customer_id, Some(customer.user_id));
    assert_eq!(comment.customer_name, "Test");

    Ok(())
}

#[tokio::test]
async fn coupon_windows_and_lazy_deactivation() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let customer = common::create_user(&state, "Müşteri", "kupon@example.com").await?;
    let admin = common::create_user(&state, "Admin", "admin4@example.com").await?;

    let future_coupon = |code: &str| CreateCouponRequest {
        coupon: CouponPayload {
            coupon_code: code.into(),
            discount_rate: 10,
            smell_discount: None,
            photo_discount: None,
            cardpostal_discount: None,
            discount_description: None,
            start_date: Utc::now() + Duration::hours(1),
            end_date: Utc::now() + Duration::days(7),
        },
        user_ids: vec![customer.user_id],
    };

    // Start in the past is rejected.
    let mut past = future_coupon("GECMIS");
    past.coupon.start_date = Utc::now() - Duration::hours(1);
    let rejected = coupon_service::create_coupon(&state, &admin, past).await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    // End before start is rejected.
    let mut inverted = future_coupon("TERS");
    inverted.coupon.end_date = inverted.coupon.start_date - Duration::days(1);
    let rejected = coupon_service::create_coupon(&state, &admin, inverted).await;
    assert!(matches!(rejected, Err(AppError::BadRequest(_))));

    // A valid coupon gets created and assigned.
    coupon_service::create_coupon(&state, &admin, future_coupon("HOSGELDIN")).await?;
    let listed = coupon_service::user_coupons(&state, &customer).await?;
    let coupons = listed.data.expect("coupons").coupons;
    assert_eq!(coupons.len(), 1);
    // Not yet inside the window, so the read deactivates it.
    assert!(!coupons[0].is_active);

    // Redeeming again is rejected.
    let dup = coupon_service::add_coupon(&state, &customer, "HOSGELDIN").await;
    assert!(matches!(dup, Err(AppError::BadRequest(_))));

    // Validation outside the window is a 400, unknown codes are 404.
    let outside = coupon_service::validate_coupon(&state, &customer, "HOSGELDIN").await;
    assert!(matches!(outside, Err(AppError::BadRequest(_))));
    let unknown = coupon_service::validate_coupon(&state, &customer, "YOK").await;
    assert!(matches!(unknown, Err(AppError::NotFound)));

    // A currently valid coupon flips back to active on read, idempotently.
    CouponActive {
        id: Set(Uuid::new_v4()),
        coupon_code: Set("AKTIF".into()),
        discount_rate: Set(20),
        smell_discount: Set(false),
        photo_discount: Set(0),
        cardpostal_discount: Set(0),
        discount_description: Set(String::new()),
        is_active: Set(false),
        start_date: Set((Utc::now() - Duration::days(1)).into()),
        end_date: Set((Utc::now() + Duration::days(1)).into()),
    }
    .insert(&state.orm)
    .await?;

    coupon_service::add_coupon(&state, &customer, "AKTIF").await?;
    for _ in 0..2 {
        let listed = coupon_service::user_coupons(&state, &customer).await?;
        let active = listed
            .data
            .expect("coupons")
            .coupons
            .into_iter()
            .find(|c| c.coupon_code == "AKTIF")
            .expect("AKTIF coupon");
        assert!(active.is_active);
    }

    let valid = coupon_service::validate_coupon(&state, &customer, "AKTIF").await?;
    assert_eq!(valid.data.expect("data").status, "exists");

    // Revoking works once, then reports the missing association.
    coupon_service::remove_coupon(&state, &customer, "AKTIF").await?;
    let again = coupon_service::remove_coupon(&state, &customer, "AKTIF").await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    Ok(())
}

#[tokio::test]
async fn deleting_a_city_cascades_to_towns_but_not_jails() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let user = common::create_user(&state, "Müşteri", "geo@example.com").await?;

    let (city_id,): (i32,) = sqlx::query_as(
        "INSERT INTO cities (country_id, city_name, plate_no, phone_code) VALUES (90, 'Ankara', 6, '312') RETURNING city_id",
    )
    .fetch_one(&state.pool)
    .await?;

    sqlx::query("INSERT INTO towns (city_id, town_name) VALUES ($1, 'Çankaya'), ($1, 'Keçiören')")
        .bind(city_id)
        .execute(&state.pool)
        .await?;
    sqlx::query("INSERT INTO jails (city_id, name, address, type) VALUES ($1, 'Sincan', 'Sincan, Ankara', 1)")
        .bind(city_id)
        .execute(&state.pool)
        .await?;

    geo::delete_city(State(state.clone()), user.clone(), Path(city_id)).await?;

    let (towns,): (i64,) = sqlx::query_as("SELECT count(*) FROM towns WHERE city_id = $1")
        .bind(city_id)
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(towns, 0);

    // Jails referencing the deleted city stay queryable.
    let (jails,): (i64,) = sqlx::query_as("SELECT count(*) FROM jails WHERE city_id = $1")
        .bind(city_id)
        .fetch_one(&state.pool)
        .await?;
    assert_eq!(jails, 1);

    Ok(())
}

#[tokio::test]
async fn content_slugs_and_menu_link_validation() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let created = content_service::create_faq(
        &state,
        FaqPayload {
            title: "Sıkça Sorulan Sorular".into(),
            text: "Cevaplar".into(),
        },
    )
    .await?;
    let faq = created.data.expect("faq");
    assert_eq!(faq.slug, "sikca-sorulan-sorular");

    let updated = content_service::update_faq(
        &state,
        faq.id,
        FaqPayload {
            title: "Gönderim Şartları".into(),
            text: "Cevaplar".into(),
        },
    )
    .await?;
    assert_eq!(updated.data.expect("faq").slug, "gonderim-sartlari");

    let dropdown_without_items = content_service::create_menu_link(
        &state,
        MenuLinkPayload {
            menu_name: "Hizmetler".into(),
            menu_url: "/hizmetler".into(),
            target_window: None,
            menu_group: None,
            is_dropdown: Some(true),
            dropdown_items: None,
        },
    )
    .await;
    assert!(matches!(dropdown_without_items, Err(AppError::BadRequest(_))));

    let ok = content_service::create_menu_link(
        &state,
        MenuLinkPayload {
            menu_name: "Hizmetler".into(),
            menu_url: "/hizmetler".into(),
            target_window: None,
            menu_group: None,
            is_dropdown: Some(true),
            dropdown_items: Some(vec!["Mektup".into(), "Kartpostal".into()]),
        },
    )
    .await?;
    let link = ok.data.expect("menu link");
    assert!(link.is_dropdown);
    assert_eq!(link.dropdown_items.len(), 2);
    assert_eq!(link.target_window, "this_window");
    assert_eq!(link.menu_group, "navbar");

    Ok(())
}

#[tokio::test]
async fn status_report_counts_and_revenue() -> anyhow::Result<()> {
    let _guard = DB_LOCK.lock().await;
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };

    let customer = common::create_user(&state, "Müşteri", "report@example.com").await?;
    let admin = common::create_user(&state, "Admin", "admin5@example.com").await?;

    for price in [1000_i64, 2500, 4000] {
        order_service::create_order(
            &state,
            &customer,
            OrderPayload {
                order_price: Some(price),
                ..OrderPayload::default()
            },
        )
        .await?;
    }

    let forbidden = report_service::status_report(&state, &customer).await;
    assert!(matches!(forbidden, Err(AppError::Forbidden)));

    let report = report_service::status_report(&state, &admin).await?;
    let report = report.data.expect("report");

    assert_eq!(report.total_users, 2);
    assert_eq!(report.total_orders, 3);
    assert_eq!(report.new_orders_today, 3);
    assert_eq!(report.revenue_this_week, 7500);
    assert_eq!(report.revenue_current_month, 7500);
    // No revenue in the preceding windows yields a flat 0 percent change.
    assert_eq!(report.revenue_week_percentage, 0.0);
    assert_eq!(report.revenue_month_percentage, 0.0);

    Ok(())
}
