use rusqlite::Connection;

use crate::db::queries;
use crate::errors::ApiError;
use crate::models::{AdminSession, AdminUser};
use crate::services::store::BookingApi;

pub const TOKEN_KEY: &str = "admin_token";
pub const USER_KEY: &str = "admin_user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("{0}")]
    Rejected(String),

    #[error("Network error")]
    Network,
}

/// Exchanges credentials for a session. One request, no lockout or throttling.
pub async fn login(api: &dyn BookingApi, email: &str, password: &str) -> Result<AdminSession, LoginError> {
    match api.login(email, password).await {
        Ok(session) => {
            tracing::info!(email = %email, "admin logged in");
            Ok(session)
        }
        Err(ApiError::Network(e)) => {
            tracing::warn!(error = %e, "admin login request failed");
            Err(LoginError::Network)
        }
        Err(e) => {
            tracing::warn!(email = %email, error = %e, "admin login rejected");
            let message = e.server_message().unwrap_or("Login failed").to_string();
            Err(LoginError::Rejected(message))
        }
    }
}

/// Reads the persisted session for a client. A token without a readable user
/// object still counts as a session.
pub fn load_session(conn: &Connection, client_id: &str) -> rusqlite::Result<Option<AdminSession>> {
    let Some(token) = queries::get_item(conn, client_id, TOKEN_KEY)? else {
        return Ok(None);
    };
    if token.is_empty() {
        return Ok(None);
    }

    let user = match queries::get_item(conn, client_id, USER_KEY)? {
        Some(raw) => serde_json::from_str::<AdminUser>(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "stored admin_user is not valid JSON");
            AdminUser::default()
        }),
        None => AdminUser::default(),
    };

    Ok(Some(AdminSession { token, user }))
}

pub fn save_session(conn: &Connection, client_id: &str, session: &AdminSession) -> rusqlite::Result<()> {
    let user = serde_json::to_string(&session.user)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    queries::set_item(conn, client_id, TOKEN_KEY, &session.token)?;
    queries::set_item(conn, client_id, USER_KEY, &user)?;
    Ok(())
}

pub fn clear_session(conn: &Connection, client_id: &str) -> rusqlite::Result<()> {
    queries::remove_item(conn, client_id, TOKEN_KEY)?;
    queries::remove_item(conn, client_id, USER_KEY)?;
    Ok(())
}
