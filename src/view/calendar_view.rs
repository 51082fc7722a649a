use chrono::{Days, NaiveDate};

use crate::error::CalendarError;
use crate::models::day_state::DayState;
use crate::models::times::DailyTimes;
use crate::models::tracking_period::PERIOD_DAYS;
use crate::service::day_state_service::DayStateStore;

pub const VIEW_TITLE: &str = "Ramadan 2026 - 30 Days";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellTimes {
    Pending,
    Resolved(DailyTimes),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u8,
    pub date: NaiveDate,
    pub label: String,
    pub state: DayState,
    pub times: CellTimes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Fill percentage, clamped to 100 for foreign out-of-range entries.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).min(100.0)
    }

    pub fn label(&self) -> String {
        format!("{} / {} days", self.completed, self.total)
    }
}

/// Result of one per-cell fetch, tagged with the render it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTimesUpdate {
    pub epoch: u64,
    pub day: u8,
    pub times: DailyTimes,
}

/// Render model for the 30-day grid.
///
/// `rebuild` starts a new epoch; `apply_times` only accepts results issued
/// for the current one.
#[derive(Debug, Default)]
pub struct CalendarView {
    epoch: u64,
    start_date: Option<NaiveDate>,
    location: String,
    cells: Vec<CalendarCell>,
    progress: Progress,
}

impl CalendarView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, store: &DayStateStore) -> u64 {
        self.epoch += 1;
        let start = store.start_date();
        self.start_date = Some(start);
        self.location = store.location().to_string();
        self.cells = (1..=PERIOD_DAYS)
            .filter_map(|day| {
                let date = start.checked_add_days(Days::new(u64::from(day - 1)))?;
                Some(CalendarCell {
                    day,
                    date,
                    label: day_label(date),
                    state: store.get_state(i64::from(day)),
                    times: CellTimes::Pending,
                })
            })
            .collect();
        self.refresh_progress(store);
        tracing::debug!(epoch = self.epoch, %start, "calendar grid rebuilt");
        self.epoch
    }

    /// Cycles one day and repaints only that cell and the progress readout.
    pub async fn toggle_day(
        &mut self,
        store: &mut DayStateStore,
        day: i64,
    ) -> Result<DayState, CalendarError> {
        let index = self
            .cells
            .iter()
            .position(|cell| i64::from(cell.day) == day)
            .ok_or(CalendarError::UnknownDay(day))?;

        let state = store.cycle(day).await?;
        self.cells[index].state = state;
        self.refresh_progress(store);
        Ok(state)
    }

    /// Returns false, leaving the grid untouched, for a superseded epoch.
    pub fn apply_times(&mut self, update: CellTimesUpdate) -> bool {
        if update.epoch != self.epoch {
            tracing::debug!(
                day = update.day,
                stale = update.epoch,
                current = self.epoch,
                "discarding stale fasting times"
            );
            return false;
        }
        match self.cells.iter_mut().find(|cell| cell.day == update.day) {
            Some(cell) => {
                cell.times = CellTimes::Resolved(update.times);
                true
            }
            None => false,
        }
    }

    /// `(day, date)` pairs still waiting for fasting times.
    pub fn fetch_plan(&self) -> Vec<(u8, NaiveDate)> {
        self.cells
            .iter()
            .filter(|cell| cell.times == CellTimes::Pending)
            .map(|cell| (cell.day, cell.date))
            .collect()
    }

    pub fn pending_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.times == CellTimes::Pending)
            .count()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn cell(&self, day: u8) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| cell.day == day)
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    fn refresh_progress(&mut self, store: &DayStateStore) {
        self.progress = Progress {
            completed: store.completed_count(),
            total: usize::from(PERIOD_DAYS),
        };
    }
}

/// `"Feb 17"` style label.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
