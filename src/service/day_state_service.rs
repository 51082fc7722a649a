use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::day_state::DayState;
use crate::models::location::Coordinates;
use crate::models::tracking_period::{DEFAULT_START_DATE, TrackingPeriod};
use crate::service::location_resolver;
use crate::storage::{SettingsStore, StoreError};

/// Owns the tracking period and writes it back after every mutation.
///
/// Every mutator awaits the save before returning; if the save fails the
/// in-memory change is undone so memory and disk agree.
pub struct DayStateStore {
    period: TrackingPeriod,
    store: Arc<dyn SettingsStore>,
}

impl DayStateStore {
    /// Loads, merges with defaults, and upgrades a legacy `checkedDays` shape.
    pub async fn load(store: Arc<dyn SettingsStore>) -> Result<Self, StoreError> {
        let raw = store.load().await?;
        let period = TrackingPeriod::from_persisted(raw)?;
        let mut this = Self { period, store };
        this.migrate_if_needed().await?;
        Ok(this)
    }

    pub fn period(&self) -> &TrackingPeriod {
        &self.period
    }

    pub fn get_state(&self, day: i64) -> DayState {
        self.period
            .day_states
            .get(&day.to_string())
            .map(DayState::from_stored)
            .unwrap_or_default()
    }

    /// Advances `day` one step along 0 -> 1 -> 2 -> 0 and persists.
    pub async fn cycle(&mut self, day: i64) -> Result<DayState, StoreError> {
        let key = day.to_string();
        let previous = self.period.day_states.get(&key).cloned();
        let next = self.get_state(day).next();

        match next {
            DayState::Untracked => {
                self.period.day_states.remove(&key);
            }
            state => {
                self.period
                    .day_states
                    .insert(key.clone(), Value::from(state.code()));
            }
        }

        if let Err(err) = self.persist().await {
            match previous {
                Some(value) => self.period.day_states.insert(key, value),
                None => self.period.day_states.remove(&key),
            };
            return Err(err);
        }
        tracing::info!(day, state = %next, "day state changed");
        Ok(next)
    }

    /// Marks every legacy day as completed, drops the legacy field and persists.
    pub async fn migrate_legacy(&mut self, legacy: &BTreeSet<i64>) -> Result<(), StoreError> {
        let before = self.period.clone();
        for day in legacy {
            self.period
                .day_states
                .insert(day.to_string(), Value::from(DayState::Completed.code()));
        }
        self.period.checked_days = None;

        if let Err(err) = self.persist().await {
            self.period = before;
            return Err(err);
        }
        tracing::info!(
            migrated = legacy.len(),
            field = TrackingPeriod::legacy_field_name(),
            "legacy settings upgraded"
        );
        Ok(())
    }

    /// Runs `migrate_legacy` when the legacy field is present. Returns whether
    /// anything happened.
    pub async fn migrate_if_needed(&mut self) -> Result<bool, StoreError> {
        match self.period.legacy_days() {
            Some(days) => {
                self.migrate_legacy(&days).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Entries that read as completed, in either variant.
    pub fn completed_count(&self) -> usize {
        self.period
            .day_states
            .values()
            .filter(|value| DayState::from_stored(value).is_done())
            .count()
    }

    /// The anchor for day 1. An unparsable stored value renders from the default.
    pub fn start_date(&self) -> NaiveDate {
        self.period.parsed_start_date().unwrap_or_else(|| {
            tracing::warn!(
                stored = %self.period.start_date,
                "invalid start date, using {}",
                DEFAULT_START_DATE
            );
            default_start_date()
        })
    }

    pub fn location(&self) -> &str {
        &self.period.location
    }

    pub fn coordinates(&self) -> Coordinates {
        location_resolver::resolve(&self.period.location)
    }

    pub async fn set_start_date(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        let formatted = date.format("%Y-%m-%d").to_string();
        let previous = std::mem::replace(&mut self.period.start_date, formatted);
        if let Err(err) = self.persist().await {
            self.period.start_date = previous;
            return Err(err);
        }
        Ok(())
    }

    pub async fn set_location(&mut self, location: &str) -> Result<(), StoreError> {
        let previous = std::mem::replace(&mut self.period.location, location.trim().to_string());
        if let Err(err) = self.persist().await {
            self.period.location = previous;
            return Err(err);
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let data = self.period.to_persisted()?;
        self.store.save(&data).await
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::parse_from_str(DEFAULT_START_DATE, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}
