use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::location::Coordinates;
use crate::models::times::FastingTimes;

pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com/v1";
pub const CALCULATION_METHOD: u8 = 2;

const DAWN_FIELD: &str = "Fajr";
const SUNSET_FIELD: &str = "Maghrib";

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("schedule service answered with status {0}")]
    Status(StatusCode),
    #[error("failed to parse schedule payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("schedule payload has no usable {0} field")]
    MissingField(&'static str),
}

#[derive(Debug, Deserialize)]
struct TimingsResponse {
    data: TimingsData,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: HashMap<String, String>,
}

pub fn timings_url(base_url: &str, date: NaiveDate, coords: Coordinates) -> String {
    format!(
        "{base}/timings/{date}?latitude={lat}&longitude={lon}&method={method}",
        base = base_url.trim_end_matches('/'),
        date = date.format("%d-%m-%Y"),
        lat = coords.latitude,
        lon = coords.longitude,
        method = CALCULATION_METHOD,
    )
}

pub async fn fetch_fasting_times(
    http: &reqwest::Client,
    base_url: &str,
    date: NaiveDate,
    coords: Coordinates,
) -> Result<FastingTimes, ScheduleError> {
    let url = timings_url(base_url, date, coords);
    let response = http.get(&url).send().await?;

    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        tracing::debug!(%status, body = %text, "schedule service error body");
        return Err(ScheduleError::Status(status));
    }

    parse_timings(&text)
}

/// Pulls the dawn and sunset fields out of a `data.timings` payload.
pub fn parse_timings(body: &str) -> Result<FastingTimes, ScheduleError> {
    let parsed: TimingsResponse = serde_json::from_str(body)?;
    let timings = parsed.data.timings;

    let start = timings
        .get(DAWN_FIELD)
        .and_then(|raw| normalize_time(raw))
        .ok_or(ScheduleError::MissingField(DAWN_FIELD))?;
    let end = timings
        .get(SUNSET_FIELD)
        .and_then(|raw| normalize_time(raw))
        .ok_or(ScheduleError::MissingField(SUNSET_FIELD))?;

    Ok(FastingTimes { start, end })
}

/// Reduces `"05:12"`, `"05:12:30"` or `"05:12 (+03)"` to `"05:12"`.
pub fn normalize_time(raw: &str) -> Option<String> {
    let clock = raw.split_whitespace().next()?;
    let mut parts = clock.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(format!("{:02}:{:02}", hours, minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_uses_day_month_year_and_fixed_method() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
        let url = timings_url(
            "https://api.aladhan.com/v1/",
            date,
            Coordinates::new(51.5074, -0.1278),
        );
        assert_eq!(
            url,
            "https://api.aladhan.com/v1/timings/17-02-2026?latitude=51.5074&longitude=-0.1278&method=2"
        );
    }

    #[test]
    fn normalize_time_drops_seconds_and_suffixes() {
        assert_eq!(normalize_time("05:12"), Some("05:12".to_string()));
        assert_eq!(normalize_time("05:12:59"), Some("05:12".to_string()));
        assert_eq!(normalize_time("5:07 (GMT)"), Some("05:07".to_string()));
        assert_eq!(normalize_time("  17:45  "), Some("17:45".to_string()));
        assert_eq!(normalize_time("sunset"), None);
        assert_eq!(normalize_time("25:00"), None);
        assert_eq!(normalize_time(""), None);
    }

    #[test]
    fn parse_timings_reads_dawn_and_sunset() {
        let body = r#"{"code":200,"data":{"timings":{"Fajr":"05:31","Sunrise":"06:50","Maghrib":"18:12:00"}}}"#;
        let times = parse_timings(body).unwrap();
        assert_eq!(times.start, "05:31");
        assert_eq!(times.end, "18:12");
    }

    #[test]
    fn parse_timings_rejects_missing_or_malformed_fields() {
        let missing = r#"{"data":{"timings":{"Fajr":"05:31"}}}"#;
        assert!(matches!(
            parse_timings(missing),
            Err(ScheduleError::MissingField("Maghrib"))
        ));

        let garbled = r#"{"data":{"timings":{"Fajr":"soon","Maghrib":"18:12"}}}"#;
        assert!(matches!(
            parse_timings(garbled),
            Err(ScheduleError::MissingField("Fajr"))
        ));

        assert!(matches!(
            parse_timings(r#"{"data":"rate limited"}"#),
            Err(ScheduleError::Payload(_))
        ));
        assert!(matches!(parse_timings("<html>"), Err(ScheduleError::Payload(_))));
    }
}
