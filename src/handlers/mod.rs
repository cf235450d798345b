pub mod admin;
pub mod context;
pub mod dev;
pub mod health;
pub mod pages;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// All site routes. The dev store, when enabled, is nested separately.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(pages::landing))
        .route("/book", get(pages::book_page).post(pages::submit_booking))
        .route("/booking-confirmation", get(pages::booking_confirmation))
        .route("/admin/login", get(admin::login_page).post(admin::login))
        .route("/admin/dashboard", get(admin::dashboard_page))
        .route("/admin/dashboard/refresh", post(admin::refresh))
        .route("/admin/bookings/:id/status", post(admin::update_status))
        .route("/admin/logout", post(admin::logout))
        .with_state(state)
}
