use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A booking as the store returns it.
///
/// Decoding is lenient field by field: a null, missing, or oddly typed value
/// falls back to its default instead of rejecting the whole document, so one
/// bad row never hides the rest of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawBooking")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub service_type: ServiceType,
    pub name: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    pub status: BookingStatus,
    /// Raw timestamp text; see [`Booking::created_at_time`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Booking {
    /// Parses `created_at`: RFC 3339, a timestamp without an offset (read as
    /// UTC), or epoch milliseconds.
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Some(t.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(t.and_utc());
            }
        }
        raw.parse::<i64>().ok().and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Wire shape of a booking document. Both `_id` and `id` may be present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBooking {
    #[serde(rename = "_id", default, deserialize_with = "lenient_string")]
    mongo_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    area: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    preferred_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    preferred_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    created_at: Option<String>,
}

/// Accepts any JSON value: strings as-is, numbers and booleans as their text,
/// everything else as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

impl From<RawBooking> for Booking {
    fn from(raw: RawBooking) -> Self {
        Self {
            id: raw.mongo_id.or(raw.id).unwrap_or_default(),
            service_type: raw
                .service_type
                .map(ServiceType::from)
                .unwrap_or_else(|| ServiceType::Other(String::new())),
            name: raw.name.unwrap_or_default(),
            phone: raw.phone.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
            area: raw.area,
            description: raw.description,
            preferred_date: raw.preferred_date,
            preferred_time: raw.preferred_time,
            status: raw.status.as_deref().map(BookingStatus::parse).unwrap_or_default(),
            created_at: raw.created_at,
        }
    }
}

/// Dispatch progress. Anything the store sends outside the three named
/// states reads as `Unassigned`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    #[default]
    Unassigned,
    Assigned,
    OnTheWay,
    Completed,
}

impl BookingStatus {
    /// States an admin can move a booking into.
    pub const TARGETS: [BookingStatus; 3] = [
        BookingStatus::Assigned,
        BookingStatus::OnTheWay,
        BookingStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Unassigned => "unassigned",
            BookingStatus::Assigned => "assigned",
            BookingStatus::OnTheWay => "on-the-way",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "assigned" => BookingStatus::Assigned,
            "on-the-way" => BookingStatus::OnTheWay,
            "completed" => BookingStatus::Completed,
            _ => BookingStatus::Unassigned,
        }
    }

    /// Strict parse restricted to [`Self::TARGETS`].
    pub fn parse_target(s: &str) -> Option<Self> {
        Self::TARGETS.into_iter().find(|t| t.as_str() == s)
    }

    /// Label of the dashboard button that moves a booking into this state.
    pub fn action_label(&self) -> &'static str {
        match self {
            BookingStatus::Unassigned => "Unassign",
            BookingStatus::Assigned => "Assign",
            BookingStatus::OnTheWay => "On the way",
            BookingStatus::Completed => "Complete",
        }
    }

    /// Actions offered for a booking currently in `self`. A status is never
    /// offered as a transition to itself; every other target is, regressions
    /// included.
    pub fn available_actions(&self) -> Vec<BookingStatus> {
        Self::TARGETS
            .into_iter()
            .filter(|target| target != self)
            .collect()
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<BookingStatus> for String {
    fn from(s: BookingStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    #[default]
    Electrician,
    Plumbing,
    Carpenter,
    HomeCleaning,
    PestControl,
    /// Unrecognised value from the store, kept verbatim.
    Other(String),
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::Electrician,
        ServiceType::Plumbing,
        ServiceType::Carpenter,
        ServiceType::HomeCleaning,
        ServiceType::PestControl,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ServiceType::Electrician => "electrician",
            ServiceType::Plumbing => "plumbing",
            ServiceType::Carpenter => "carpenter",
            ServiceType::HomeCleaning => "home cleaning",
            ServiceType::PestControl => "pest control",
            ServiceType::Other(s) => s,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ServiceType::Electrician => "Electrician",
            ServiceType::Plumbing => "Plumber",
            ServiceType::Carpenter => "Carpenter",
            ServiceType::HomeCleaning => "Home Cleaning",
            ServiceType::PestControl => "Pest Control",
            ServiceType::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .unwrap_or_else(|| ServiceType::Other(s.to_string()))
    }

    /// Lenient lookup used for `?service=` links: accepts wire or display
    /// names in any case.
    pub fn from_query(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::ALL.into_iter().find(|t| {
            t.as_str().eq_ignore_ascii_case(needle) || t.display_name().eq_ignore_ascii_case(needle)
        })
    }
}

impl From<String> for ServiceType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ServiceType> for String {
    fn from(s: ServiceType) -> Self {
        match s {
            ServiceType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of the customer booking form, sent as one JSON body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBooking {
    pub service_type: ServiceType,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub description: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub area: String,
}

impl NewBooking {
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.phone.is_empty() && !self.address.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_reads_as_unassigned() {
        assert_eq!(BookingStatus::parse("pending"), BookingStatus::Unassigned);
        assert_eq!(BookingStatus::parse(""), BookingStatus::Unassigned);
        assert_eq!(BookingStatus::parse("on-the-way"), BookingStatus::OnTheWay);
    }

    #[test]
    fn current_status_is_never_offered() {
        let actions = BookingStatus::Assigned.available_actions();
        assert_eq!(actions, vec![BookingStatus::OnTheWay, BookingStatus::Completed]);

        let actions = BookingStatus::Unassigned.available_actions();
        assert_eq!(actions.len(), 3);
    }

    #[test]
    fn regression_from_completed_is_offered() {
        let actions = BookingStatus::Completed.available_actions();
        assert!(actions.contains(&BookingStatus::Assigned));
        assert!(!actions.contains(&BookingStatus::Completed));
    }

    #[test]
    fn parse_target_rejects_unassigned() {
        assert_eq!(BookingStatus::parse_target("unassigned"), None);
        assert_eq!(BookingStatus::parse_target("bogus"), None);
        assert_eq!(
            BookingStatus::parse_target("completed"),
            Some(BookingStatus::Completed)
        );
    }

    #[test]
    fn booking_decodes_store_document() {
        let json = r#"{
            "_id": "b1",
            "serviceType": "home cleaning",
            "name": "Asha",
            "phone": "9999999999",
            "address": "12 Main St",
            "status": "assigned",
            "createdAt": "2025-03-01T10:15:00.000Z"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, "b1");
        assert_eq!(booking.service_type, ServiceType::HomeCleaning);
        assert_eq!(booking.status, BookingStatus::Assigned);
        assert!(booking.area.is_none());
        assert!(booking.created_at_time().is_some());
    }

    #[test]
    fn tolerates_odd_store_documents() {
        let json = r#"{
            "_id": "b7",
            "id": "b7",
            "serviceType": null,
            "name": null,
            "phone": 9876543210,
            "status": null,
            "createdAt": "2025-03-01T10:15:00"
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, "b7");
        assert_eq!(booking.name, "");
        assert_eq!(booking.phone, "9876543210");
        assert_eq!(booking.address, "");
        assert_eq!(booking.status, BookingStatus::Unassigned);
        assert_eq!(booking.service_type.as_str(), "");
        assert_eq!(
            booking.created_at_time().unwrap().to_rfc3339(),
            "2025-03-01T10:15:00+00:00"
        );

        let booking: Booking =
            serde_json::from_str(r#"{"id": "b8", "status": 3, "createdAt": 1740823200000}"#).unwrap();
        assert_eq!(booking.id, "b8");
        assert_eq!(booking.status, BookingStatus::Unassigned);
        assert_eq!(booking.created_at.as_deref(), Some("1740823200000"));
        assert!(booking.created_at_time().is_some());

        let booking: Booking = serde_json::from_str(r#"{"_id": "b9", "createdAt": "yesterday"}"#).unwrap();
        assert_eq!(booking.created_at_time(), None);
        assert_eq!(booking.created_at.as_deref(), Some("yesterday"));
    }

    #[test]
    fn serializes_with_mongo_id() {
        let booking: Booking = serde_json::from_str(r#"{"id": "b1", "serviceType": "carpenter"}"#).unwrap();
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["_id"], "b1");
        assert_eq!(value["serviceType"], "carpenter");
        assert_eq!(value["status"], "unassigned");
    }

    #[test]
    fn unknown_service_type_is_kept_verbatim() {
        let json = r#"{"id": "x", "serviceType": "painting", "status": "whatever"}"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.service_type.as_str(), "painting");
        assert_eq!(booking.status, BookingStatus::Unassigned);
    }

    #[test]
    fn new_booking_serializes_camel_case() {
        let form = NewBooking {
            name: "Asha".into(),
            preferred_date: "2025-03-02".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["serviceType"], "electrician");
        assert_eq!(value["preferredDate"], "2025-03-02");
        assert_eq!(value["area"], "");
    }

    #[test]
    fn service_query_accepts_display_and_wire_names() {
        assert_eq!(ServiceType::from_query("Plumber"), Some(ServiceType::Plumbing));
        assert_eq!(ServiceType::from_query("pest control"), Some(ServiceType::PestControl));
        assert_eq!(ServiceType::from_query("HOME CLEANING"), Some(ServiceType::HomeCleaning));
        assert_eq!(ServiceType::from_query("gardening"), None);
    }
}
