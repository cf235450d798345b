pub mod http;

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::models::{AdminSession, Booking, BookingStatus, NewBooking};

/// The external booking store. Every screen is a view over these calls.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `POST /api/bookings`, returning the new booking id.
    async fn create_booking(&self, booking: &NewBooking) -> Result<String, ApiError>;

    /// `GET /api/bookings/:id`. `Ok(None)` when a 2xx reply carries no booking.
    async fn get_booking(&self, id: &str) -> Result<Option<Booking>, ApiError>;

    /// `POST /api/admin/login`.
    async fn login(&self, email: &str, password: &str) -> Result<AdminSession, ApiError>;

    /// `GET /api/admin/bookings` with a bearer token.
    async fn list_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError>;

    /// `PUT /api/admin/bookings/:id` with `{ status }` and a bearer token.
    async fn update_status(&self, token: &str, id: &str, status: BookingStatus) -> Result<(), ApiError>;
}
