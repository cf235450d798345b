use super::{escape, layout, tel_link};
use crate::config::AppConfig;
use crate::models::{NewBooking, ServiceType};

/// Booking form, re-rendered with the submitted values after a failure.
pub fn book_page(config: &AppConfig, form: &NewBooking, error: Option<&str>) -> String {
    let options: String = ServiceType::ALL
        .iter()
        .map(|s| {
            let selected = if *s == form.service_type { " selected" } else { "" };
            format!(
                r#"<option value="{value}"{selected}>{label}</option>"#,
                value = escape(s.as_str()),
                label = escape(s.display_name()),
            )
        })
        .collect();

    let error = error
        .map(|e| format!(r#"<div class="error" id="form-error">{}</div>"#, escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"<main>
  <header>
    <h1>Book a Service</h1>
    <p class="muted">Fast, trusted professionals at your doorstep.</p>
  </header>
  <section class="card">
    <form id="booking-form" method="post" action="/book"
          onsubmit="var b=this.querySelector('button[type=submit]');b.disabled=true;b.textContent='Booking...';">
      <label for="serviceType">Service</label>
      <select id="serviceType" name="serviceType">{options}</select>
      <div class="grid">
        <div><label for="name">Full name</label><input id="name" name="name" placeholder="Full name" value="{name}"></div>
        <div><label for="phone">Phone</label><input id="phone" name="phone" placeholder="Phone" value="{phone}"></div>
      </div>
      <label for="area">Area / Landmark</label>
      <input id="area" name="area" placeholder="Area / Locality" value="{area}">
      <label for="address">Full address</label>
      <input id="address" name="address" placeholder="Full address" value="{address}">
      <label for="description">Describe the issue</label>
      <textarea id="description" name="description" rows="4" placeholder="Describe the issue">{description}</textarea>
      <div class="grid">
        <div><label for="preferredDate">Preferred date</label><input type="date" id="preferredDate" name="preferredDate" value="{preferred_date}"></div>
        <div><label for="preferredTime">Preferred time</label><input type="time" id="preferredTime" name="preferredTime" value="{preferred_time}"></div>
      </div>
      {error}
      <p><button class="btn" type="submit">Book Now</button></p>
    </form>
  </section>
  <aside class="card">
    <h3>Trusted Pros</h3>
    <p class="muted">Background checked. Real-time dispatch and average arrival in <strong>20 minutes</strong>.</p>
  </aside>
  <div class="card"><strong>Need help?</strong> Call or WhatsApp us at <a href="{tel}">{phone_support}</a></div>
</main>
<footer><p>&copy; 2025 Zletto. All rights reserved.</p></footer>"#,
        name = escape(&form.name),
        phone = escape(&form.phone),
        area = escape(&form.area),
        address = escape(&form.address),
        description = escape(&form.description),
        preferred_date = escape(&form.preferred_date),
        preferred_time = escape(&form.preferred_time),
        tel = tel_link(config),
        phone_support = escape(&config.support_phone),
    );

    layout("Book a Service - Zletto", &body)
}
