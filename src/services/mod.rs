pub mod auth;
pub mod booking_form;
pub mod confirmation;
pub mod dashboard;
pub mod load;
pub mod store;
