use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::time;

use crate::services::dashboard_service::{self, DashboardData};
use crate::AppState;

/// Latest committed dashboard snapshot plus the date it was computed for.
/// The store always holds today's data; historical days bypass it.
///
/// Refresh cycles can overlap (the periodic tick and an inline refresh from a
/// page load), so each cycle takes a monotonically increasing token before its
/// fetch. A commit is dropped when a newer token has already landed or when
/// the day has meanwhile rolled over; a slow stale response can never
/// overwrite fresher data.
pub struct DashboardStore {
    inner: RwLock<StoreInner>,
    next_token: AtomicU64,
}

struct StoreInner {
    date: NaiveDate,
    committed: u64,
    data: DashboardData,
}

impl DashboardStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(StoreInner {
                date: chrono::Local::now().date_naive(),
                committed: 0,
                data: DashboardData::empty(),
            }),
            next_token: AtomicU64::new(0),
        })
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.read().date
    }

    pub fn set_selected_date(&self, date: NaiveDate) {
        let mut inner = self.write();
        if inner.date != date {
            inner.date = date;
            // Old data belongs to the old day; show the zero state until the
            // next cycle commits.
            inner.data = DashboardData::empty();
        }
    }

    pub fn snapshot(&self) -> DashboardData {
        self.read().data.clone()
    }

    fn begin(&self) -> u64 {
        self.next_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn commit(&self, token: u64, date: NaiveDate, data: DashboardData) -> bool {
        let mut inner = self.write();
        if inner.date != date || token <= inner.committed {
            return false;
        }
        inner.committed = token;
        inner.data = data;
        true
    }

    // Lock poisoning cannot corrupt the snapshot (writers replace it
    // wholesale), so a poisoned guard is just taken over.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

pub fn spawn_refresh_monitor(state: AppState) {
    tokio::spawn(async move {
        let mut interval = time::interval(Duration::from_secs(state.settings.refresh_secs));

        loop {
            interval.tick().await;
            run_tick(&state).await;
        }
    });
}

/// One full fetch-then-recompute cycle for today, used by both the periodic
/// monitor and inline page loads.
pub async fn refresh_now(state: &AppState) {
    run_tick(state).await;
}

/// Fetch one day's orders and derive the dashboard data for them. Transport
/// failures, malformed responses, and an empty day all come back as the zero
/// state instead of leaving stale numbers on screen.
pub async fn day_data(state: &AppState, date: NaiveDate) -> DashboardData {
    match state.hotdoks.orders_for_day(date).await {
        Ok(orders) => {
            let reference = dashboard_service::reference_for(date);
            tracing::debug!(count = orders.len(), %date, "recomputing dashboard");
            DashboardData::compute(&orders, reference)
        }
        Err(e) => {
            tracing::warn!(%date, error = %e, "order fetch failed, resetting dashboard");
            DashboardData::empty()
        }
    }
}

async fn run_tick(state: &AppState) {
    // The shared snapshot always tracks today; historical days are derived
    // per request in the controller and never touch the store.
    let date = chrono::Local::now().date_naive();
    state.store.set_selected_date(date);
    let token = state.store.begin();

    let data = day_data(state, date).await;

    if !state.store.commit(token, date, data) {
        tracing::debug!(token, "dropped stale refresh result");
    }
}
