use crate::errors::ApiError;
use crate::models::Booking;
use crate::services::load::LoadState;
use crate::services::store::BookingApi;

/// What the confirmation screen shows for one visit.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub booking_id: Option<String>,
    /// `None` when there is no id: nothing is fetched and nothing is shown.
    /// `Loaded(None)` when the store replied without a booking.
    pub state: Option<LoadState<Option<Booking>>>,
}

/// Fetches the booking once. No retry and no polling.
pub async fn load(api: &dyn BookingApi, booking_id: Option<&str>) -> Confirmation {
    let Some(id) = booking_id.filter(|id| !id.is_empty()) else {
        return Confirmation {
            booking_id: None,
            state: None,
        };
    };

    let state = match api.get_booking(id).await {
        Ok(booking) => LoadState::Loaded(booking),
        Err(e) => {
            tracing::warn!(booking_id = %id, error = %e, "failed to load booking");
            LoadState::Failed(failure_message(&e))
        }
    };

    Confirmation {
        booking_id: Some(id.to_string()),
        state: Some(state),
    }
}

fn failure_message(err: &ApiError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        "Failed to load booking".to_string()
    } else {
        message
    }
}
