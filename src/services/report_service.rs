use chrono::{DateTime, Datelike, Duration, Months, Utc};
use chrono_tz::Europe::Istanbul;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusReport {
    pub total_users: i64,
    pub total_orders: i64,
    pub total_cities: i64,
    pub total_towns: i64,
    pub total_jails: i64,
    pub total_photos: i64,
    pub active_coupons: i64,
    pub average_star_rating: f64,

    pub new_users_today: i64,
    pub new_users_this_week: i64,
    pub new_users_this_month: i64,
    pub new_users_this_year: i64,

    pub new_orders_today: i64,
    pub new_orders_this_week: i64,
    pub new_orders_this_month: i64,
    pub new_orders_this_year: i64,

    pub revenue_current_month: i64,
    pub revenue_last_month: i64,
    pub revenue_this_week: i64,
    pub revenue_last_week: i64,
    pub revenue_current_year: i64,
    pub revenue_last_year: i64,

    pub revenue_month_percentage: f64,
    pub revenue_week_percentage: f64,
    pub revenue_year_percentage: f64,
}

/// Percentage change between adjacent windows, 0 when the previous window
/// had no revenue.
pub fn percent_change(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current - previous) as f64 / previous as f64 * 100.0
}

struct ReportWindows {
    today_start: DateTime<Utc>,
    week_start: DateTime<Utc>,
    month_start: DateTime<Utc>,
    year_start: DateTime<Utc>,
    last_week_start: DateTime<Utc>,
    last_month_start: DateTime<Utc>,
    last_year_start: DateTime<Utc>,
}

/// Window boundaries anchored to local wall-clock time; the week starts on
/// Monday, the day window at local midnight.
fn report_windows(now: DateTime<Utc>) -> AppResult<ReportWindows> {
    let local = now.with_timezone(&Istanbul);
    let midnight = local
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("invalid local midnight")))?;
    let today_start = midnight
        .and_local_timezone(Istanbul)
        .single()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("ambiguous local midnight")))?
        .with_timezone(&Utc);

    let week_start = today_start - Duration::days(local.weekday().num_days_from_monday() as i64);
    let month_start = today_start - Duration::days(i64::from(local.day()) - 1);
    let year_start = today_start - Duration::days(i64::from(local.ordinal()) - 1);

    let last_week_start = week_start - Duration::days(7);
    let last_month_start = month_start
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("month window underflow")))?;
    let last_year_start = year_start
        .checked_sub_months(Months::new(12))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("year window underflow")))?;

    Ok(ReportWindows {
        today_start,
        week_start,
        month_start,
        year_start,
        last_week_start,
        last_month_start,
        last_year_start,
    })
}

async fn count_total(pool: &DbPool, sql: &str) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as(sql).fetch_one(pool).await?;
    Ok(count)
}

async fn count_since(pool: &DbPool, sql: &str, since: DateTime<Utc>) -> AppResult<i64> {
    let (count,): (i64,) = sqlx::query_as(sql).bind(since).fetch_one(pool).await?;
    Ok(count)
}

async fn revenue_since(pool: &DbPool, since: DateTime<Utc>) -> AppResult<i64> {
    let (sum,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(order_price), 0)::bigint FROM orders WHERE date >= $1",
    )
    .bind(since)
    .fetch_one(pool)
    .await?;
    Ok(sum)
}

async fn revenue_between(
    pool: &DbPool,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> AppResult<i64> {
    let (sum,): (i64,) = sqlx::query_as(
        "SELECT COALESCE(SUM(order_price), 0)::bigint FROM orders WHERE date >= $1 AND date < $2",
    )
    .bind(from)
    .bind(until)
    .fetch_one(pool)
    .await?;
    Ok(sum)
}

pub async fn status_report(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<StatusReport>> {
    ensure_admin(user)?;

    let pool = &state.pool;
    let windows = report_windows(Utc::now())?;

    let total_users = count_total(pool, "SELECT count(*) FROM users").await?;
    let total_orders = count_total(pool, "SELECT count(*) FROM orders").await?;
    let total_cities = count_total(pool, "SELECT count(*) FROM cities").await?;
    let total_towns = count_total(pool, "SELECT count(*) FROM towns").await?;
    let total_jails = count_total(pool, "SELECT count(*) FROM jails").await?;
    let total_photos = count_total(pool, "SELECT count(*) FROM photos").await?;
    let active_coupons =
        count_total(pool, "SELECT count(*) FROM coupons WHERE is_active = TRUE").await?;

    let (average_star_rating,): (Option<f64>,) =
        sqlx::query_as("SELECT AVG(star)::float8 FROM comments")
            .fetch_one(pool)
            .await?;

    const USERS_SINCE: &str = "SELECT count(*) FROM users WHERE join_date >= $1";
    let new_users_today = count_since(pool, USERS_SINCE, windows.today_start).await?;
    let new_users_this_week = count_since(pool, USERS_SINCE, windows.week_start).await?;
    let new_users_this_month = count_since(pool, USERS_SINCE, windows.month_start).await?;
    let new_users_this_year = count_since(pool, USERS_SINCE, windows.year_start).await?;

    const ORDERS_SINCE: &str = "SELECT count(*) FROM orders WHERE date >= $1";
    let new_orders_today = count_since(pool, ORDERS_SINCE, windows.today_start).await?;
    let new_orders_this_week = count_since(pool, ORDERS_SINCE, windows.week_start).await?;
    let new_orders_this_month = count_since(pool, ORDERS_SINCE, windows.month_start).await?;
    let new_orders_this_year = count_since(pool, ORDERS_SINCE, windows.year_start).await?;

    let revenue_current_month = revenue_since(pool, windows.month_start).await?;
    let revenue_last_month =
        revenue_between(pool, windows.last_month_start, windows.month_start).await?;
    let revenue_this_week = revenue_since(pool, windows.week_start).await?;
    let revenue_last_week =
        revenue_between(pool, windows.last_week_start, windows.week_start).await?;
    let revenue_current_year = revenue_since(pool, windows.year_start).await?;
    let revenue_last_year =
        revenue_between(pool, windows.last_year_start, windows.year_start).await?;

    let report = StatusReport {
        total_users,
        total_orders,
        total_cities,
        total_towns,
        total_jails,
        total_photos,
        active_coupons,
        average_star_rating: average_star_rating.unwrap_or(0.0),
        new_users_today,
        new_users_this_week,
        new_users_this_month,
        new_users_this_year,
        new_orders_today,
        new_orders_this_week,
        new_orders_this_month,
        new_orders_this_year,
        revenue_current_month,
        revenue_last_month,
        revenue_this_week,
        revenue_last_week,
        revenue_current_year,
        revenue_last_year,
        revenue_month_percentage: percent_change(revenue_current_month, revenue_last_month),
        revenue_week_percentage: percent_change(revenue_this_week, revenue_last_week),
        revenue_year_percentage: percent_change(revenue_current_year, revenue_last_year),
    };

    Ok(ApiResponse::success("OK", report, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::{percent_change, report_windows};
    use chrono::{Datelike, TimeZone, Utc, Weekday};

    #[test]
    fn percent_change_is_zero_for_empty_previous_window() {
        assert_eq!(percent_change(5000, 0), 0.0);
    }

    #[test]
    fn percent_change_computes_signed_ratio() {
        assert_eq!(percent_change(150, 100), 50.0);
        assert_eq!(percent_change(50, 100), -50.0);
    }

    #[test]
    fn week_window_starts_on_monday() {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 30, 0).single();
        let now = now.expect("valid instant");
        let windows = report_windows(now).expect("windows");
        assert_eq!(
            windows
                .week_start
                .with_timezone(&chrono_tz::Europe::Istanbul)
                .weekday(),
            Weekday::Mon
        );
        assert!(windows.week_start <= now);
        assert_eq!(windows.last_week_start, windows.week_start - chrono::Duration::days(7));
    }

    #[test]
    fn month_and_year_windows_anchor_to_first_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 30, 0).single();
        let now = now.expect("valid instant");
        let windows = report_windows(now).expect("windows");
        let month_local = windows.month_start.with_timezone(&chrono_tz::Europe::Istanbul);
        assert_eq!(month_local.day(), 1);
        assert_eq!(month_local.month(), 6);
        let year_local = windows.year_start.with_timezone(&chrono_tz::Europe::Istanbul);
        assert_eq!(year_local.month(), 1);
        assert_eq!(year_local.day(), 1);
    }
}
