use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::BookingApi;
use crate::errors::ApiError;
use crate::models::{AdminSession, AdminUser, Booking, BookingStatus, NewBooking};

pub struct HttpBookingApi {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedBody {
    booking_id: Option<String>,
}

#[derive(Deserialize)]
struct BookingBody {
    booking: Option<Booking>,
}

#[derive(Deserialize)]
struct LoginBody {
    token: Option<String>,
    #[serde(default)]
    user: AdminUser,
}

#[derive(Deserialize)]
struct BookingsBody {
    #[serde(default)]
    bookings: Vec<Booking>,
}

impl HttpBookingApi {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid booking store URL: {base_url}"))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "booking store URL cannot carry a path: {base_url}"
        );

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Reads a JSON body, converting non-2xx replies into [`ApiError::Status`].
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.error);
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed(e.to_string()))
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn create_booking(&self, booking: &NewBooking) -> Result<String, ApiError> {
        let resp = self
            .client
            .post(self.endpoint(&["api", "bookings"]))
            .json(booking)
            .send()
            .await?;

        let body: CreatedBody = read_json(resp).await?;
        body.booking_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::Malformed("missing bookingId".to_string()))
    }

    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, ApiError> {
        let resp = self
            .client
            .get(self.endpoint(&["api", "bookings", id]))
            .send()
            .await?;

        let body: BookingBody = read_json(resp).await?;
        Ok(body.booking)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AdminSession, ApiError> {
        let resp = self
            .client
            .post(self.endpoint(&["api", "admin", "login"]))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: LoginBody = read_json(resp).await?;
        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Malformed("missing token".to_string()))?;

        Ok(AdminSession {
            token,
            user: body.user,
        })
    }

    async fn list_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        let resp = self
            .client
            .get(self.endpoint(&["api", "admin", "bookings"]))
            .bearer_auth(token)
            .send()
            .await?;

        let body: BookingsBody = read_json(resp).await?;
        Ok(body.bookings)
    }

    async fn update_status(&self, token: &str, id: &str, status: BookingStatus) -> Result<(), ApiError> {
        let resp = self
            .client
            .put(self.endpoint(&["api", "admin", "bookings", id]))
            .bearer_auth(token)
            .json(&json!({ "status": status.as_str() }))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let bytes = resp.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|b| b.error);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
