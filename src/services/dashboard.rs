use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::errors::ApiError;
use crate::models::{Booking, BookingStatus};
use crate::services::load::LoadState;
use crate::services::store::BookingApi;

/// One admin client's in-memory booking list.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub bookings: LoadState<Vec<Booking>>,
}

impl Dashboard {
    pub fn pending() -> Self {
        Self {
            bookings: LoadState::Pending,
        }
    }

    /// Applies a list reply. Failures are logged only: a previously loaded
    /// list is kept as it was.
    pub fn finish_load(&mut self, result: Result<Vec<Booking>, ApiError>) {
        match result {
            Ok(rows) => self.bookings = LoadState::Loaded(rows),
            Err(e) => {
                tracing::error!(error = %e, "failed to load bookings");
                if self.bookings.loaded().is_none() {
                    self.bookings = LoadState::Failed(e.to_string());
                }
            }
        }
    }

    /// Sets one row's status in place. Order and every other field are left
    /// alone. Returns false when the row is not in the list.
    pub fn apply_status(&mut self, id: &str, status: BookingStatus) -> bool {
        let Some(rows) = self.bookings.loaded_mut() else {
            return false;
        };
        match rows.iter_mut().find(|b| b.id == id) {
            Some(row) => {
                row.status = status;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[Booking] {
        self.bookings.loaded().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Dashboards not touched for this long are dropped on the next sweep. The
/// client reloads from the store if it comes back later.
pub const IDLE_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry {
    dashboard: Dashboard,
    touched: Instant,
}

/// Dashboards keyed by client id. The lock is only held for in-memory
/// bookkeeping, never across a store call.
pub struct DashboardRegistry {
    inner: Mutex<HashMap<String, Entry>>,
    idle_ttl: Duration,
}

impl Default for DashboardRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(IDLE_TTL)
    }
}

impl DashboardRegistry {
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn touch(&self, client_id: &str) -> Option<Dashboard> {
        let mut map = self.lock();
        let entry = map.get_mut(client_id)?;
        entry.touched = Instant::now();
        Some(entry.dashboard.clone())
    }

    pub fn snapshot(&self, client_id: &str) -> Option<Dashboard> {
        self.touch(client_id)
    }

    /// Creates a pending dashboard for the client. Returns true if it did not
    /// exist yet, meaning the caller should load it. Idle entries of other
    /// clients are swept first.
    pub fn ensure(&self, client_id: &str) -> bool {
        let mut map = self.lock();
        let now = Instant::now();
        let ttl = self.idle_ttl;
        map.retain(|id, entry| id == client_id || now.duration_since(entry.touched) < ttl);

        match map.get_mut(client_id) {
            Some(entry) => {
                entry.touched = now;
                false
            }
            None => {
                map.insert(
                    client_id.to_string(),
                    Entry {
                        dashboard: Dashboard::pending(),
                        touched: now,
                    },
                );
                true
            }
        }
    }

    pub fn finish_load(&self, client_id: &str, result: Result<Vec<Booking>, ApiError>) {
        if let Some(entry) = self.lock().get_mut(client_id) {
            entry.dashboard.finish_load(result);
            entry.touched = Instant::now();
        }
    }

    pub fn apply_status(&self, client_id: &str, id: &str, status: BookingStatus) -> bool {
        self.lock()
            .get_mut(client_id)
            .map(|entry| {
                entry.touched = Instant::now();
                entry.dashboard.apply_status(id, status)
            })
            .unwrap_or(false)
    }

    pub fn remove(&self, client_id: &str) {
        self.lock().remove(client_id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// Loads the client's list the first time the dashboard is opened and returns
/// the current view.
pub async fn open(
    api: &dyn BookingApi,
    registry: &DashboardRegistry,
    client_id: &str,
    token: &str,
) -> Dashboard {
    if registry.ensure(client_id) {
        let result = api.list_bookings(token).await;
        registry.finish_load(client_id, result);
    }
    registry.snapshot(client_id).unwrap_or_else(Dashboard::pending)
}

/// Re-fetches the list.
pub async fn refresh(api: &dyn BookingApi, registry: &DashboardRegistry, client_id: &str, token: &str) {
    registry.ensure(client_id);
    let result = api.list_bookings(token).await;
    registry.finish_load(client_id, result);
}

/// Sends one status update and applies it locally once the store acknowledges.
///
/// On failure the list is untouched and only a diagnostic is logged. There is
/// no de-duplication: concurrent updates race and the last reply applied wins.
pub async fn update_status(
    api: &dyn BookingApi,
    registry: &DashboardRegistry,
    client_id: &str,
    token: &str,
    booking_id: &str,
    target: BookingStatus,
) -> bool {
    match api.update_status(token, booking_id, target).await {
        Ok(()) => {
            let applied = registry.apply_status(client_id, booking_id, target);
            tracing::info!(booking_id = %booking_id, status = %target, applied, "booking status updated");
            true
        }
        Err(e) => {
            tracing::error!(booking_id = %booking_id, status = %target, error = %e, "failed to update booking status");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, status: BookingStatus) -> Booking {
        serde_json::from_value(serde_json::json!({ "_id": id, "name": id, "status": status.as_str() }))
            .unwrap()
    }

    fn rows() -> Vec<Booking> {
        vec![
            row("b0", BookingStatus::Unassigned),
            row("b1", BookingStatus::Assigned),
            row("b2", BookingStatus::Completed),
        ]
    }

    #[test]
    fn apply_status_on_unknown_row_is_a_no_op() {
        let mut dashboard = Dashboard {
            bookings: LoadState::Loaded(rows()),
        };
        assert!(!dashboard.apply_status("nope", BookingStatus::Completed));
        assert_eq!(dashboard.rows(), rows().as_slice());
    }

    #[test]
    fn failed_reload_keeps_loaded_rows() {
        let mut dashboard = Dashboard {
            bookings: LoadState::Loaded(rows()),
        };
        dashboard.finish_load(Err(ApiError::Network("down".into())));
        assert_eq!(dashboard.rows(), rows().as_slice());

        let mut fresh = Dashboard::pending();
        fresh.finish_load(Err(ApiError::Network("down".into())));
        assert_eq!(fresh.bookings.error(), Some("down"));
    }

    #[test]
    fn clients_do_not_share_lists() {
        let registry = DashboardRegistry::default();
        assert!(registry.ensure("c1"));
        assert!(!registry.ensure("c1"));
        registry.finish_load("c1", Ok(rows()));

        assert!(registry.snapshot("c2").is_none());
        registry.remove("c1");
        assert!(registry.snapshot("c1").is_none());
    }

    #[test]
    fn idle_dashboards_are_evicted() {
        let registry = DashboardRegistry::with_idle_ttl(Duration::ZERO);
        registry.ensure("c1");
        registry.finish_load("c1", Ok(rows()));

        assert!(registry.ensure("c2"));
        assert!(registry.snapshot("c1").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn active_dashboards_survive_sweeps() {
        let registry = DashboardRegistry::default();
        registry.ensure("c1");
        registry.finish_load("c1", Ok(rows()));

        registry.ensure("c2");
        assert_eq!(registry.snapshot("c1").unwrap().rows().len(), 3);
        assert_eq!(registry.len(), 2);
    }
}
