use chrono::Local;

use super::{escape, layout};
use crate::models::{AdminSession, Booking};
use crate::services::dashboard::Dashboard;
use crate::services::load::LoadState;

pub fn login_page(email: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<div class="error" id="login-error">{}</div>"#, escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"<main>
  <div class="card">
    <h2>Admin Login</h2>
    <p class="muted">Secure access to dashboard</p>
    <form method="post" action="/admin/login"
          onsubmit="var b=this.querySelector('button[type=submit]');b.disabled=true;b.textContent='Signing in...';">
      <label for="email">Email</label>
      <input id="email" name="email" placeholder="Enter your admin email" value="{email}">
      <label for="password">Password</label>
      <input id="password" name="password" type="password" placeholder="Enter password">
      {error}
      <p><button class="btn" type="submit">Sign In</button></p>
    </form>
  </div>
</main>
<footer><p>&copy; 2025 Zletto Admin Portal</p></footer>"#,
        email = escape(email),
    );

    layout("Admin Login - Zletto", &body)
}

/// Local time when the timestamp parses, otherwise the raw text.
fn created_at(booking: &Booking) -> String {
    match (booking.created_at_time(), booking.created_at.as_deref()) {
        (Some(t), _) => t.with_timezone(&Local).format("%d/%m/%Y, %H:%M:%S").to_string(),
        (None, Some(raw)) if !raw.is_empty() => escape(raw),
        _ => "-".to_string(),
    }
}

fn booking_row(booking: &Booking) -> String {
    let actions: String = booking
        .status
        .available_actions()
        .into_iter()
        .map(|target| {
            format!(
                r#"<form method="post" action="/admin/bookings/{id}/status"><input type="hidden" name="status" value="{value}"><button class="btn small {value}" type="submit">{label}</button></form>"#,
                id = escape(&urlencoding::encode(&booking.id)),
                value = target.as_str(),
                label = target.action_label(),
            )
        })
        .collect();

    let area = booking
        .area
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or("-");

    format!(
        r#"<tr data-booking-id="{id}">
  <td>{time}</td>
  <td>{name}<div class="muted">{phone}</div></td>
  <td>{service}</td>
  <td>{area}</td>
  <td>{address}</td>
  <td><span class="badge {status}">{status}</span></td>
  <td>{actions}</td>
</tr>"#,
        id = escape(&booking.id),
        time = created_at(booking),
        name = escape(&booking.name),
        phone = escape(&booking.phone),
        service = escape(booking.service_type.as_str()),
        area = escape(area),
        address = escape(&booking.address),
        status = booking.status.as_str(),
    )
}

pub fn dashboard_page(session: &AdminSession, dashboard: &Dashboard) -> String {
    let content = match &dashboard.bookings {
        // Another request for this client is still loading the list.
        LoadState::Pending => r#"<p class="muted">Loading...</p>"#.to_string(),
        _ if dashboard.rows().is_empty() => r#"<p class="muted">No bookings yet</p>"#.to_string(),
        _ => {
            let rows: String = dashboard.rows().iter().map(booking_row).collect();
            format!(
                r#"<div class="card" style="overflow-x:auto"><table>
<thead><tr><th>Time</th><th>Customer</th><th>Service</th><th>Area</th><th>Address</th><th>Status</th><th>Action</th></tr></thead>
<tbody>
{rows}
</tbody>
</table></div>"#
            )
        }
    };

    let refresh_hint = if dashboard.bookings.is_pending() {
        r#"<meta http-equiv="refresh" content="2">"#
    } else {
        ""
    };

    let user = session
        .display_name()
        .map(|n| format!(r#"<span class="muted">{}</span>"#, escape(n)))
        .unwrap_or_default();

    let body = format!(
        r#"{refresh_hint}<header class="bar">
  <h1>Admin Dashboard</h1>
  <div>
    {user}
    <form method="post" action="/admin/dashboard/refresh"><button class="btn small secondary" type="submit">Refresh</button></form>
    <form method="post" action="/admin/logout"><button class="btn small secondary" type="submit">Logout</button></form>
  </div>
</header>
<main class="wide">
{content}
</main>
<footer>&copy; 2025 Zletto Admin</footer>"#
    );

    layout("Admin Dashboard - Zletto", &body)
}
