use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::models::{NewBooking, ServiceType};
use crate::services::{booking_form, confirmation};
use crate::state::AppState;
use crate::views;

// GET /
pub async fn landing(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(views::landing::landing_page(&state.config))
}

// GET /book
#[derive(Deserialize)]
pub struct BookQuery {
    pub service: Option<String>,
}

pub async fn book_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookQuery>,
) -> Html<String> {
    let mut form = NewBooking::default();
    if let Some(service) = query.service.as_deref().and_then(ServiceType::from_query) {
        form.service_type = service;
    }
    Html(views::book::book_page(&state.config, &form, None))
}

// POST /book
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewBooking>,
) -> Response {
    match booking_form::submit(state.api.as_ref(), &form).await {
        Ok(id) => {
            let target = format!("/booking-confirmation?bookingId={}", urlencoding::encode(&id));
            Redirect::to(&target).into_response()
        }
        Err(e) => Html(views::book::book_page(&state.config, &form, Some(&e.to_string()))).into_response(),
    }
}

// GET /booking-confirmation
#[derive(Deserialize)]
pub struct ConfirmationQuery {
    #[serde(rename = "bookingId")]
    pub booking_id: Option<String>,
}

pub async fn booking_confirmation(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConfirmationQuery>,
) -> Html<String> {
    let view = confirmation::load(state.api.as_ref(), query.booking_id.as_deref()).await;
    Html(views::confirmation::confirmation_page(&state.config, &view))
}
