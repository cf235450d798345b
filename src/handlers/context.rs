use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::AdminSession;
use crate::services::auth;
use crate::state::AppState;

/// Cookie identifying a browser's client storage area.
pub const CLIENT_COOKIE: &str = "zletto_client";

/// Per-request view of the caller: which client storage area it owns and the
/// admin session persisted there, read once when the request arrives.
pub struct ClientContext {
    pub client_id: Option<String>,
    pub session: Option<AdminSession>,
}

impl ClientContext {
    /// Client id and session together, or `None` when not logged in.
    pub fn admin(self) -> Option<(String, AdminSession)> {
        self.client_id.zip(self.session)
    }
}

pub fn client_id_from(jar: &CookieJar) -> Option<String> {
    jar.get(CLIENT_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

pub fn client_cookie(config: &AppConfig, client_id: String) -> Cookie<'static> {
    Cookie::build((CLIENT_COOKIE, client_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .permanent()
        .build()
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ClientContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let client_id = client_id_from(&jar);

        let session = match &client_id {
            Some(id) => {
                let db = state.db()?;
                auth::load_session(&db, id)?
            }
            None => None,
        };

        Ok(Self { client_id, session })
    }
}
