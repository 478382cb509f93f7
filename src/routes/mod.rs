use axum::Router;

use crate::state::AppState;

pub mod admin_orders;
pub mod admin_users;
pub mod auth;
pub mod cardpostals;
pub mod catalog;
pub mod comments;
pub mod content;
pub mod coupons;
pub mod doc;
pub mod geo;
pub mod health;
pub mod menu_links;
pub mod orders;
pub mod params;
pub mod pricing;
pub mod reports;
pub mod schemas;
pub mod uploads;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(users::router())
        .merge(admin_users::router())
        .merge(orders::router())
        .merge(admin_orders::router())
        .merge(coupons::router())
        .merge(comments::router())
        .merge(content::router())
        .merge(menu_links::router())
        .merge(schemas::router())
        .merge(catalog::router())
        .merge(pricing::router())
        .merge(geo::router())
        .merge(cardpostals::router())
        .merge(uploads::router())
        .merge(reports::router())
}
