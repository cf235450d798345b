use crate::errors::ApiError;
use crate::models::NewBooking;
use crate::services::store::BookingApi;

/// Inline message shown under the booking form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Please fill name, phone and address.")]
    MissingRequired,

    #[error("{0}")]
    Rejected(String),

    #[error("Network error")]
    Network,
}

const FALLBACK: &str = "Failed to book";

/// Validates and submits the form. Returns the new booking id.
///
/// Nothing is sent unless name, phone and address are filled in; otherwise
/// exactly one creation request goes out.
pub async fn submit(api: &dyn BookingApi, form: &NewBooking) -> Result<String, SubmitError> {
    if !form.has_required_fields() {
        return Err(SubmitError::MissingRequired);
    }

    match api.create_booking(form).await {
        Ok(id) => {
            tracing::info!(booking_id = %id, service = %form.service_type, "booking created");
            Ok(id)
        }
        Err(ApiError::Network(e)) => {
            tracing::warn!(error = %e, "booking submission failed");
            Err(SubmitError::Network)
        }
        Err(e) => {
            tracing::warn!(error = %e, "booking rejected by store");
            let message = e.server_message().unwrap_or(FALLBACK).to_string();
            Err(SubmitError::Rejected(message))
        }
    }
}
