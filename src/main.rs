use std::sync::{Arc, Mutex};

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use zletto::config::AppConfig;
use zletto::db;
use zletto::handlers;
use zletto::handlers::dev::DevApiState;
use zletto::services::dashboard::DashboardRegistry;
use zletto::services::store::http::HttpBookingApi;
use zletto::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let api_base_url = config.resolved_api_base_url();
    let api = HttpBookingApi::new(&api_base_url)?;
    tracing::info!("using booking store at {api_base_url}");

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        api: Arc::new(api),
        dashboards: DashboardRegistry::default(),
    });

    let mut app = handlers::router(state);
    if config.dev_api {
        anyhow::ensure!(
            !config.dev_admin_password.is_empty(),
            "DEV_ADMIN_PASSWORD must not be empty when DEV_API is enabled"
        );
        tracing::warn!("serving in-memory dev booking store at /api (DEV_API=true)");
        let dev = DevApiState::new(config.dev_admin_email.clone(), config.dev_admin_password.clone());
        app = app.nest("/api", handlers::dev::router(Arc::new(dev)));
    }
    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
