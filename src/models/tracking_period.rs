use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::day_state::integral;
use crate::storage::StoreError;

pub const DEFAULT_START_DATE: &str = "2026-02-17";
pub const DEFAULT_LOCATION: &str = "Mecca,Saudi Arabia";
pub const PERIOD_DAYS: u8 = 30;

const LEGACY_FIELD: &str = "checkedDays";

/// The persisted settings object.
///
/// `day_states` keeps raw JSON values so that externally edited entries
/// survive a save untouched; reads go through `DayState::from_stored`.
/// Fields this version does not know about are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPeriod {
    #[serde(default = "default_start_date")]
    pub start_date: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub day_states: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_days: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_start_date() -> String {
    DEFAULT_START_DATE.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

impl Default for TrackingPeriod {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            location: default_location(),
            day_states: BTreeMap::new(),
            checked_days: None,
            extra: Map::new(),
        }
    }
}

impl TrackingPeriod {
    /// Builds the in-memory object from whatever the store returned.
    ///
    /// Missing fields take their defaults, present ones are never overwritten.
    /// `None` and `null` both mean "first load". A known field that is null or
    /// of the wrong JSON type reads as its default.
    pub fn from_persisted(raw: Option<Value>) -> Result<Self, StoreError> {
        match raw {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(mut map)) => {
                drop_mistyped_fields(&mut map);
                serde_json::from_value(Value::Object(map))
                    .map_err(|e| StoreError::Malformed(e.to_string()))
            }
            Some(other) => {
                tracing::warn!(
                    found = json_kind(&other),
                    "settings are not an object, starting from defaults"
                );
                Ok(Self::default())
            }
        }
    }

    pub fn to_persisted(&self) -> Result<Value, StoreError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn has_legacy_shape(&self) -> bool {
        self.checked_days.is_some()
    }

    /// Integer day numbers held in the legacy `checkedDays` field, if present.
    /// `3.0` counts as 3; other non-integer entries are skipped.
    pub fn legacy_days(&self) -> Option<BTreeSet<i64>> {
        self.checked_days
            .as_ref()
            .map(|days| days.iter().filter_map(integral).collect())
    }

    /// Parsed start date, or `None` when the stored text is not `YYYY-MM-DD`.
    pub fn parsed_start_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").ok()
    }

    pub fn legacy_field_name() -> &'static str {
        LEGACY_FIELD
    }
}

fn drop_mistyped_fields(map: &mut Map<String, Value>) {
    let expected: [(&str, fn(&Value) -> bool); 4] = [
        ("startDate", Value::is_string),
        ("location", Value::is_string),
        ("dayStates", Value::is_object),
        (LEGACY_FIELD, Value::is_array),
    ];
    for (field, has_type) in expected {
        let Some(value) = map.get(field) else {
            continue;
        };
        if has_type(value) {
            continue;
        }
        if !value.is_null() {
            tracing::warn!(field, found = json_kind(value), "ignoring mistyped settings field");
        }
        map.remove(field);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
