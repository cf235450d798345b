//! Server-rendered HTML for every screen.
//!
//! Pages are plain strings built with `format!`. Anything that came from a
//! user or from the booking store goes through [`escape`].

pub mod admin;
pub mod book;
pub mod confirmation;
pub mod landing;

use crate::config::AppConfig;

const STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:Inter,system-ui,sans-serif;background:#f8fafc;color:#334155}
main{max-width:48rem;margin:0 auto;padding:1.5rem 1rem}
main.wide{max-width:72rem}
h1,h2,h3,h4{color:#0f172a}
a{color:#ea580c}
.card{background:#fff;border:1px solid #f1f5f9;border-radius:1rem;padding:1.25rem;margin-bottom:1.25rem;box-shadow:0 1px 2px rgba(0,0,0,.04)}
.btn{display:inline-block;border:0;border-radius:9999px;padding:.75rem 1.5rem;font-weight:600;cursor:pointer;text-decoration:none;background:linear-gradient(90deg,#f97316,#ea580c);color:#fff}
.btn:disabled{opacity:.6}
.btn.secondary{background:#e2e8f0;color:#334155}
.btn.small{padding:.35rem .8rem;font-size:.75rem}
.btn.assigned{background:#2563eb}.btn.on-the-way{background:#ea580c}.btn.completed{background:#16a34a}
label{display:block;font-size:.875rem;font-weight:600;margin:.75rem 0 .4rem}
input,select,textarea{width:100%;border:1px solid #e2e8f0;border-radius:.75rem;padding:.75rem 1rem;font:inherit;color:#334155}
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(12rem,1fr));gap:.75rem}
.error{color:#dc2626}
.muted{color:#64748b;font-size:.875rem}
.badge{padding:.2rem .6rem;border-radius:9999px;font-size:.75rem;font-weight:600;background:#f1f5f9;color:#334155}
.badge.assigned{background:#dbeafe;color:#1d4ed8}
.badge.on-the-way{background:#ffedd5;color:#c2410c}
.badge.completed{background:#dcfce7;color:#15803d}
table{width:100%;border-collapse:collapse;font-size:.875rem}
th,td{text-align:left;padding:1rem;border-top:1px solid #e2e8f0;vertical-align:top}
th{background:#f1f5f9;font-size:.75rem}
td form{display:inline}
header.bar{display:flex;justify-content:space-between;align-items:center;gap:.5rem;padding:1rem;background:#fff;border-bottom:1px solid #e2e8f0}
header.bar form{display:inline}
footer{text-align:center;color:#64748b;font-size:.875rem;padding:2rem 1rem}
"#;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="Trusted electricians, plumbers &amp; more in Thane">
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape(title),
    )
}

fn whatsapp_link(config: &AppConfig) -> String {
    format!("https://wa.me/{}", escape(&config.support_whatsapp))
}

fn tel_link(config: &AppConfig) -> String {
    let digits: String = config
        .support_phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{}", escape(&digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("12 Main St"), "12 Main St");
    }
}
