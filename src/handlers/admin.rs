use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use super::context::{client_cookie, client_id_from, ClientContext};
use crate::errors::AppError;
use crate::models::BookingStatus;
use crate::services::{auth, dashboard};
use crate::state::AppState;
use crate::views;

const LOGIN_PATH: &str = "/admin/login";
const DASHBOARD_PATH: &str = "/admin/dashboard";

// GET /admin/login
pub async fn login_page() -> Html<String> {
    Html(views::admin::login_page("", None))
}

// POST /admin/login
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let session = match auth::login(state.api.as_ref(), &form.email, &form.password).await {
        Ok(session) => session,
        Err(e) => {
            return Ok(Html(views::admin::login_page(&form.email, Some(&e.to_string()))).into_response());
        }
    };

    // Never adopt an id the browser brought with it: the session always moves
    // to a newly minted client id and whatever the old one held is dropped.
    let previous = client_id_from(&jar);
    let client_id = uuid::Uuid::new_v4().to_string();
    {
        let db = state.db()?;
        if let Some(old) = &previous {
            auth::clear_session(&db, old)?;
        }
        auth::save_session(&db, &client_id, &session)?;
    }
    if let Some(old) = &previous {
        state.dashboards.remove(old);
    }

    let jar = jar.add(client_cookie(&state.config, client_id));
    Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response())
}

// GET /admin/dashboard
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    ctx: ClientContext,
) -> Response {
    let Some((client_id, session)) = ctx.admin() else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    let view = dashboard::open(state.api.as_ref(), &state.dashboards, &client_id, &session.token).await;
    Html(views::admin::dashboard_page(&session, &view)).into_response()
}

// POST /admin/dashboard/refresh
pub async fn refresh(State(state): State<Arc<AppState>>, ctx: ClientContext) -> Redirect {
    let Some((client_id, session)) = ctx.admin() else {
        return Redirect::to(LOGIN_PATH);
    };

    dashboard::refresh(state.api.as_ref(), &state.dashboards, &client_id, &session.token).await;
    Redirect::to(DASHBOARD_PATH)
}

// POST /admin/bookings/:id/status
#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    ctx: ClientContext,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Redirect, AppError> {
    let Some((client_id, session)) = ctx.admin() else {
        return Ok(Redirect::to(LOGIN_PATH));
    };

    let target = BookingStatus::parse_target(&form.status)
        .ok_or_else(|| AppError::BadRequest(format!("unknown status: {}", form.status)))?;

    dashboard::update_status(
        state.api.as_ref(),
        &state.dashboards,
        &client_id,
        &session.token,
        &id,
        target,
    )
    .await;

    Ok(Redirect::to(DASHBOARD_PATH))
}

// POST /admin/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    ctx: ClientContext,
) -> Result<Redirect, AppError> {
    if let Some(client_id) = ctx.client_id {
        {
            let db = state.db()?;
            auth::clear_session(&db, &client_id)?;
        }
        state.dashboards.remove(&client_id);
        tracing::info!("admin logged out");
    }
    Ok(Redirect::to(LOGIN_PATH))
}
