use super::{escape, layout, tel_link, whatsapp_link};
use crate::config::AppConfig;
use crate::models::ServiceType;

/// Trades cycled through in the hero heading.
const ROTATING_WORDS: [&str; 4] = ["Technician", "Plumber", "Carpenter", "Electrician"];
const ROTATE_INTERVAL_MS: u32 = 2500;

const STEPS: [(&str, &str, &str); 3] = [
    ("01", "Book", "Select your service and share details"),
    ("02", "We dispatch", "Expert assigned within minutes"),
    ("03", "Tech arrives", "Trusted professional at your door in 20 minutes"),
];

pub fn landing_page(config: &AppConfig) -> String {
    let services: String = ServiceType::ALL
        .iter()
        .map(|s| {
            format!(
                r#"<a class="card" href="/book?service={query}"><h3>{name}</h3></a>"#,
                query = escape(&urlencoding::encode(s.display_name())),
                name = escape(s.display_name()),
            )
        })
        .collect();

    let steps: String = STEPS
        .iter()
        .map(|(number, title, description)| {
            format!(
                r#"<div class="card"><div class="muted">{number}</div><h3>{title}</h3><p>{description}</p></div>"#
            )
        })
        .collect();

    let words = ROTATING_WORDS
        .iter()
        .map(|w| format!("\"{w}\""))
        .collect::<Vec<_>>()
        .join(",");

    let body = format!(
        r##"<header class="bar">
  <strong>Zletto</strong>
  <nav><a href="#services">Services</a> · <a href="#how-it-works">How it works</a> · <a href="{tel}">Contact</a></nav>
  <a class="btn small" href="/book">Book Now</a>
</header>
<main>
  <section>
    <p class="muted">Available in Thane</p>
    <h1><span id="rotating-word">{first_word}</span><br>your door in<br>20 minutes</h1>
    <p>Trusted electricians, plumbers &amp; more in Thane. Fast, reliable home services when you need them most.</p>
    <p><a class="btn" href="/book">Book Now</a> <a class="btn secondary" href="{whatsapp}">WhatsApp Us</a></p>
    <p class="muted">✓ Background verified · ✓ Trusted professionals</p>
  </section>
  <section id="services">
    <h2>Our Services</h2>
    <p class="muted">Professional home services at your fingertips</p>
    <div class="grid">{services}</div>
  </section>
  <section id="how-it-works">
    <h2>How It Works</h2>
    <p class="muted">Three simple steps to get your home fixed</p>
    <div class="grid">{steps}</div>
  </section>
  <section class="card">
    <h2>Need help right now?</h2>
    <p>Book your service and get a trusted technician within 20 minutes</p>
    <a class="btn" href="/book">Book Now</a>
  </section>
</main>
<footer>
  <p>Trusted home services in Thane. Fast, reliable, professional.</p>
  <p>WhatsApp / Hotline: {phone}</p>
  <p>Areas covered: Hiranandani Estate, Highland, Brahmand, Kolshet in Thane.</p>
  <p>&copy; 2025 Zletto. All rights reserved.</p>
</footer>
<script>
(function() {{
  var words = [{words}], i = 0, el = document.getElementById("rotating-word");
  setInterval(function() {{ i = (i + 1) % words.length; el.textContent = words[i]; }}, {interval});
}})();
</script>"##,
        tel = tel_link(config),
        whatsapp = whatsapp_link(config),
        first_word = ROTATING_WORDS[0],
        phone = escape(&config.support_phone),
        interval = ROTATE_INTERVAL_MS,
    );

    layout("Zletto - Technician at Your Door in 20 Minutes", &body)
}
