use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::dashboard::DashboardRegistry;
use crate::services::store::BookingApi;

pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub api: Arc<dyn BookingApi>,
    pub dashboards: DashboardRegistry,
}

impl AppState {
    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.db
            .lock()
            .map_err(|_| AppError::Storage("client storage lock poisoned".to_string()))
    }
}
