use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::error::CalendarError;
use crate::models::day_state::DayState;
use crate::models::tracking_period::PERIOD_DAYS;
use crate::service::day_state_service::DayStateStore;
use crate::service::schedule_service::ScheduleClient;
use crate::storage::SettingsStore;
use crate::tasks::times_loader::{TimesBus, dispatch_time_fetches};
use crate::view::calendar_view::{CalendarView, CellTimesUpdate};
use crate::view::host::{VIEW_TYPE, ViewDescriptor, ViewHost};

const BUS_CAPACITY: usize = PERIOD_DAYS as usize * 2;

/// One open calendar: the day-state store, its grid, and the channel the
/// per-cell fetches report back on.
pub struct CalendarSession {
    store: DayStateStore,
    view: CalendarView,
    client: Arc<dyn ScheduleClient>,
    bus: TimesBus,
    rx: mpsc::Receiver<CellTimesUpdate>,
}

impl CalendarSession {
    pub async fn open(
        settings: Arc<dyn SettingsStore>,
        client: Arc<dyn ScheduleClient>,
    ) -> Result<Self, CalendarError> {
        let store = DayStateStore::load(settings).await?;
        let (bus, rx) = TimesBus::new(BUS_CAPACITY);
        Ok(Self {
            store,
            view: CalendarView::new(),
            client,
            bus,
            rx,
        })
    }

    /// Rebuilds the grid under a new epoch and starts fetching its times.
    pub fn render(&mut self) -> u64 {
        let epoch = self.view.rebuild(&self.store);
        dispatch_time_fetches(
            self.client.clone(),
            &self.bus,
            self.store.coordinates(),
            epoch,
            self.view.fetch_plan(),
        );
        epoch
    }

    /// Renders the grid without any network access.
    pub fn render_offline(&mut self) -> u64 {
        self.view.rebuild(&self.store)
    }

    pub async fn toggle(&mut self, day: i64) -> Result<DayState, CalendarError> {
        self.view.toggle_day(&mut self.store, day).await
    }

    pub async fn set_start_date(&mut self, date: NaiveDate) -> Result<u64, CalendarError> {
        self.store.set_start_date(date).await?;
        Ok(self.render())
    }

    pub async fn set_location(&mut self, location: &str) -> Result<u64, CalendarError> {
        self.store.set_location(location).await?;
        Ok(self.render())
    }

    /// Applies every update already delivered. Returns how many were accepted.
    pub fn drain_updates(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.rx.try_recv() {
            if self.view.apply_times(update) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits until no cell of the current grid is pending, or `limit` passes.
    pub async fn wait_for_times(&mut self, limit: Duration) -> bool {
        let view = &mut self.view;
        let rx = &mut self.rx;
        let settled = timeout(limit, async {
            while view.pending_count() > 0 {
                match rx.recv().await {
                    Some(update) => {
                        view.apply_times(update);
                    }
                    None => break,
                }
            }
        })
        .await;
        if settled.is_err() {
            tracing::warn!(
                pending = self.view.pending_count(),
                "gave up waiting for fasting times"
            );
        }
        self.view.pending_count() == 0
    }

    pub fn view(&self) -> &CalendarView {
        &self.view
    }

    pub fn store(&self) -> &DayStateStore {
        &self.store
    }
}

/// Reveals the grid once its times have arrived or `wait` has passed.
pub async fn reveal_settled<H: ViewHost>(
    session: &mut CalendarSession,
    host: &mut H,
    wait: Duration,
) -> Result<(), CalendarError> {
    if session.view().pending_count() > 0 {
        session.wait_for_times(wait).await;
    } else {
        session.drain_updates();
    }
    host.reveal_view(VIEW_TYPE, session.view())
}

/// Registers the calendar view, shows it with fetched times, then detaches.
pub async fn run_show<H: ViewHost>(
    session: &mut CalendarSession,
    host: &mut H,
    wait: Duration,
) -> Result<(), CalendarError> {
    host.register_view(ViewDescriptor::calendar());
    session.render();
    reveal_settled(session, host, wait).await?;
    host.detach_views(VIEW_TYPE);
    Ok(())
}
