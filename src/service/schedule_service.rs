use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

use crate::clients::schedule_client::{self, DEFAULT_BASE_URL};
use crate::models::location::Coordinates;
use crate::models::times::DailyTimes;

/// Source of the daily fasting window. Implementations never fail: every
/// problem collapses into `DailyTimes::Unavailable`.
#[async_trait]
pub trait ScheduleClient: Send + Sync {
    async fn fetch_times(&self, date: NaiveDate, coords: Coordinates) -> DailyTimes;
}

pub struct ScheduleService {
    http: reqwest::Client,
    base_url: String,
}

impl ScheduleService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for ScheduleService {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(10))
    }
}

#[async_trait]
impl ScheduleClient for ScheduleService {
    async fn fetch_times(&self, date: NaiveDate, coords: Coordinates) -> DailyTimes {
        match schedule_client::fetch_fasting_times(&self.http, &self.base_url, date, coords).await {
            Ok(times) => DailyTimes::Available(times),
            Err(err) => {
                tracing::warn!(%date, %coords, error = %err, "fasting times unavailable");
                DailyTimes::Unavailable
            }
        }
    }
}
