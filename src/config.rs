use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// Booking store host. Empty means same origin as this server.
    pub api_base_url: String,
    pub database_url: String,
    pub cookie_secure: bool,
    pub dev_api: bool,
    pub dev_admin_email: String,
    pub dev_admin_password: String,
    pub support_phone: String,
    pub support_whatsapp: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_url: env::var("API_BASE_URL").unwrap_or_default(),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "zletto.db".to_string()),
            cookie_secure: env_flag("COOKIE_SECURE"),
            dev_api: env_flag("DEV_API"),
            dev_admin_email: env::var("DEV_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@zletto.local".to_string()),
            dev_admin_password: env::var("DEV_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "changeme".to_string()),
            support_phone: env::var("SUPPORT_PHONE")
                .unwrap_or_else(|_| "+91 9619151523".to_string()),
            support_whatsapp: env::var("SUPPORT_WHATSAPP")
                .unwrap_or_else(|_| "919619151523".to_string()),
        }
    }

    /// Resolved store base URL without a trailing slash.
    pub fn resolved_api_base_url(&self) -> String {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            format!("http://127.0.0.1:{}", self.port)
        } else {
            base.trim_end_matches('/').to_string()
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_base(base: &str) -> AppConfig {
        AppConfig {
            port: 8080,
            api_base_url: base.to_string(),
            database_url: ":memory:".to_string(),
            cookie_secure: false,
            dev_api: false,
            dev_admin_email: String::new(),
            dev_admin_password: String::new(),
            support_phone: String::new(),
            support_whatsapp: String::new(),
        }
    }

    #[test]
    fn empty_base_url_resolves_to_same_origin() {
        let config = config_with_base("");
        assert_eq!(config.resolved_api_base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = config_with_base("https://api.zletto.in/");
        assert_eq!(config.resolved_api_base_url(), "https://api.zletto.in");
    }
}
