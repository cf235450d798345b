use super::{escape, layout, whatsapp_link};
use crate::config::AppConfig;
use crate::models::Booking;
use crate::services::confirmation::Confirmation;
use crate::services::load::LoadState;

fn detail(label: &str, value: &str) -> String {
    format!(
        r#"<div><div class="muted">{}</div><div><strong>{}</strong></div></div>"#,
        escape(label),
        escape(value)
    )
}

fn booking_details(config: &AppConfig, booking: &Booking) -> String {
    let mut out = String::new();
    out.push_str(&detail("Service", booking.service_type.as_str()));
    out.push_str(&detail("Name", &booking.name));
    out.push_str(&detail("Phone", &booking.phone));
    out.push_str(&detail("Address", &booking.address));
    if let Some(notes) = booking.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!(
            r#"<div><div class="muted">Notes</div><div>{}</div></div>"#,
            escape(notes)
        ));
    }
    out.push_str(&format!(
        r#"<p>We'll call you within <strong>20 minutes</strong>. For urgent help: <a href="{}">WhatsApp {}</a></p>"#,
        whatsapp_link(config),
        escape(&config.support_phone)
    ));
    out
}

pub fn confirmation_page(config: &AppConfig, view: &Confirmation) -> String {
    let details = match (&view.state, &view.booking_id) {
        (None, _) => String::new(),
        (Some(LoadState::Pending), _) => {
            r#"<p class="muted">Loading your booking details...</p>"#.to_string()
        }
        (Some(LoadState::Failed(e)), _) => {
            format!(r#"<p class="error">{}</p>"#, escape(e))
        }
        (Some(LoadState::Loaded(Some(booking))), _) => booking_details(config, booking),
        (Some(LoadState::Loaded(None)), id) => format!(
            "<p>Your booking ID: <strong>{}</strong></p>",
            escape(id.as_deref().unwrap_or_default())
        ),
    };

    let body = format!(
        r#"<main>
  <header>
    <h1>Booking Confirmation</h1>
    <p class="muted">Thanks, we received your booking.</p>
  </header>
  <div class="card">
    <h2>You&rsquo;re all set!</h2>
    <p>We&rsquo;ll dispatch a trusted professional to your location.</p>
  </div>
  <div class="card">
    <h3>Booking details</h3>
    <div id="booking-details">{details}</div>
    <p><a class="btn" href="/">Okay</a> <a class="btn secondary" href="{whatsapp}">WhatsApp</a></p>
  </div>
  <aside class="card">
    <h4>What happens next?</h4>
    <ul class="muted">
      <li>We confirm the technician and dispatch to your address.</li>
      <li>Technician calls you to confirm arrival time.</li>
      <li>You can contact support via WhatsApp or hotline.</li>
    </ul>
    <p>Call us: {phone}</p>
  </aside>
</main>
<footer><p>&copy; 2025 Zletto. All rights reserved.</p></footer>"#,
        whatsapp = whatsapp_link(config),
        phone = escape(&config.support_phone),
    );

    layout("Booking Confirmation - Zletto", &body)
}
