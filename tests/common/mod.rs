#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Response};

use zletto::config::AppConfig;
use zletto::db;
use zletto::errors::ApiError;
use zletto::models::{AdminSession, Booking, BookingStatus, NewBooking, ServiceType};
use zletto::services::dashboard::DashboardRegistry;
use zletto::services::store::BookingApi;
use zletto::state::AppState;

// ── Mock store ──

#[derive(Default)]
pub struct MockApi {
    pub created: Mutex<VecDeque<Result<String, ApiError>>>,
    pub fetched: Mutex<VecDeque<Result<Option<Booking>, ApiError>>>,
    pub logins: Mutex<VecDeque<Result<AdminSession, ApiError>>>,
    pub lists: Mutex<VecDeque<Result<Vec<Booking>, ApiError>>>,
    pub updates: Mutex<VecDeque<Result<(), ApiError>>>,
    pub calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub fetched_ids: Mutex<Vec<String>>,
    pub sent_bookings: Mutex<Vec<NewBooking>>,
    pub sent_updates: Mutex<Vec<(String, String, BookingStatus)>>,
}

fn next<T>(queue: &Mutex<VecDeque<Result<T, ApiError>>>) -> Result<T, ApiError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".into())))
}

impl MockApi {
    /// Store calls of any kind.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingApi for MockApi {
    async fn create_booking(&self, booking: &NewBooking) -> Result<String, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.sent_bookings.lock().unwrap().push(booking.clone());
        next(&self.created)
    }

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetched_ids.lock().unwrap().push(id.to_string());
        next(&self.fetched)
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<AdminSession, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        next(&self.logins)
    }

    async fn list_bookings(&self, _token: &str) -> Result<Vec<Booking>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        next(&self.lists)
    }

    async fn update_status(&self, token: &str, id: &str, status: BookingStatus) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent_updates
            .lock()
            .unwrap()
            .push((token.to_string(), id.to_string(), status));
        next(&self.updates)
    }
}

// ── Helpers ──

pub fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        api_base_url: String::new(),
        database_url: ":memory:".to_string(),
        cookie_secure: false,
        dev_api: false,
        dev_admin_email: "admin@zletto.local".to_string(),
        dev_admin_password: "changeme".to_string(),
        support_phone: "+91 9619151523".to_string(),
        support_whatsapp: "919619151523".to_string(),
    }
}

pub fn test_state(api: Arc<dyn BookingApi>) -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: test_config(),
        api,
        dashboards: DashboardRegistry::default(),
    })
}

pub fn booking(id: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_string(),
        service_type: ServiceType::Electrician,
        name: format!("Customer {id}"),
        phone: "9999999999".to_string(),
        address: "12 Main St".to_string(),
        area: Some("Kolshet".to_string()),
        description: None,
        preferred_date: None,
        preferred_time: None,
        status,
        created_at: None,
    }
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `name=value` of the client cookie set on a response, ready for a `Cookie` header.
pub fn client_cookie(res: &Response<Body>) -> Option<String> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("zletto_client="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// The `<tr>` rendered for one booking on the dashboard.
pub fn dashboard_row<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let marker = format!(r#"<tr data-booking-id="{id}">"#);
    let start = html.find(&marker)?;
    let end = html[start..].find("</tr>")? + start;
    Some(&html[start..end])
}
