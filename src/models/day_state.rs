use serde_json::Value;
use std::fmt;

/// Tri-state mark for a single day of the tracking period.
///
/// `Untracked` is never written to disk; a day in that state simply has no
/// entry in the persisted map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayState {
    #[default]
    Untracked,
    Completed,
    CompletedWithException,
}

impl DayState {
    /// Reads a persisted value. Anything other than `1` or `2` is untracked.
    pub fn from_stored(value: &Value) -> Self {
        match integral(value) {
            Some(1) => DayState::Completed,
            Some(2) => DayState::CompletedWithException,
            _ => DayState::Untracked,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            DayState::Untracked => 0,
            DayState::Completed => 1,
            DayState::CompletedWithException => 2,
        }
    }

    /// 0 -> 1 -> 2 -> 0
    pub fn next(self) -> Self {
        match self {
            DayState::Untracked => DayState::Completed,
            DayState::Completed => DayState::CompletedWithException,
            DayState::CompletedWithException => DayState::Untracked,
        }
    }

    pub fn is_done(self) -> bool {
        !matches!(self, DayState::Untracked)
    }

    /// Single-character mark used by the text renderer.
    pub fn mark(self) -> &'static str {
        match self {
            DayState::Untracked => " ",
            DayState::Completed => "✓",
            DayState::CompletedWithException => "↻",
        }
    }
}

impl fmt::Display for DayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DayState::Untracked => "untracked",
            DayState::Completed => "completed",
            DayState::CompletedWithException => "completed (makeup)",
        };
        f.write_str(text)
    }
}

/// Integer value of a JSON number, accepting whole floats such as `3.0`.
pub(crate) fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}
