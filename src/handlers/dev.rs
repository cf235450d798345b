//! In-memory stand-in for the booking store, mounted at `/api` when
//! `DEV_API` is set so the site can run without a backend.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::models::{Booking, BookingStatus, NewBooking};

/// Issued tokens, like the bookings, live until the process exits.
pub struct DevApiState {
    bookings: Mutex<Vec<Booking>>,
    tokens: Mutex<HashSet<String>>,
    admin_email: String,
    admin_password: String,
}

impl DevApiState {
    pub fn new(admin_email: String, admin_password: String) -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
            tokens: Mutex::new(HashSet::new()),
            admin_email,
            admin_password,
        }
    }

    fn bookings(&self) -> MutexGuard<'_, Vec<Booking>> {
        self.bookings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tokens(&self) -> MutexGuard<'_, HashSet<String>> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn router(state: Arc<DevApiState>) -> Router {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/:id", get(get_booking))
        .route("/admin/login", post(login))
        .route("/admin/bookings", get(list_bookings))
        .route("/admin/bookings/:id", axum::routing::put(update_booking))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[allow(clippy::result_large_err)]
fn check_auth(headers: &HeaderMap, state: &DevApiState) -> Result<(), Response> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || !state.tokens().contains(token) {
        return Err(error(StatusCode::UNAUTHORIZED, "unauthorized"));
    }
    Ok(())
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<DevApiState>>,
    Json(body): Json<NewBooking>,
) -> Response {
    if !body.has_required_fields() {
        return error(StatusCode::BAD_REQUEST, "name, phone and address are required");
    }

    let booking = Booking {
        id: uuid::Uuid::new_v4().simple().to_string(),
        service_type: body.service_type,
        name: body.name,
        phone: body.phone,
        address: body.address,
        area: non_empty(body.area),
        description: non_empty(body.description),
        preferred_date: non_empty(body.preferred_date),
        preferred_time: non_empty(body.preferred_time),
        status: BookingStatus::Unassigned,
        created_at: Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
    };
    let id = booking.id.clone();
    state.bookings().push(booking);

    tracing::info!(booking_id = %id, "dev store: booking created");
    (StatusCode::CREATED, Json(json!({ "bookingId": id }))).into_response()
}

// GET /api/bookings/:id
async fn get_booking(State(state): State<Arc<DevApiState>>, Path(id): Path<String>) -> Response {
    let found = state.bookings().iter().find(|b| b.id == id).cloned();
    match found {
        Some(booking) => Json(json!({ "booking": booking })).into_response(),
        None => error(StatusCode::NOT_FOUND, "booking not found"),
    }
}

// POST /api/admin/login
#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn login(State(state): State<Arc<DevApiState>>, Json(body): Json<LoginRequest>) -> Response {
    if body.email != state.admin_email || body.password != state.admin_password {
        return error(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }

    let token = uuid::Uuid::new_v4().to_string();
    state.tokens().insert(token.clone());

    Json(json!({
        "token": token,
        "user": { "email": state.admin_email, "name": "Admin" },
    }))
    .into_response()
}

// GET /api/admin/bookings
async fn list_bookings(State(state): State<Arc<DevApiState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = check_auth(&headers, &state) {
        return resp;
    }

    let mut bookings = state.bookings().clone();
    bookings.sort_by_key(|b| std::cmp::Reverse(b.created_at_time()));
    Json(json!({ "bookings": bookings })).into_response()
}

// PUT /api/admin/bookings/:id
#[derive(Deserialize)]
struct StatusBody {
    status: String,
}

async fn update_booking(
    State(state): State<Arc<DevApiState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Response {
    if let Err(resp) = check_auth(&headers, &state) {
        return resp;
    }

    let status = BookingStatus::parse(&body.status);
    let mut bookings = state.bookings();
    match bookings.iter_mut().find(|b| b.id == id) {
        Some(booking) => {
            booking.status = status;
            Json(json!({ "ok": true })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "booking not found"),
    }
}
