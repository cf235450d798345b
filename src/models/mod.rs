pub mod admin;
pub mod booking;

pub use admin::{AdminSession, AdminUser};
pub use booking::{Booking, BookingStatus, NewBooking, ServiceType};
