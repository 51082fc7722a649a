use std::fmt;

/// Placeholder shown when the schedule service could not answer.
pub const UNAVAILABLE_PLACEHOLDER: &str = "-";

/// Dawn start and sunset end for one day, both already reduced to `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastingTimes {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyTimes {
    Available(FastingTimes),
    Unavailable,
}

impl DailyTimes {
    pub fn is_available(&self) -> bool {
        matches!(self, DailyTimes::Available(_))
    }
}

impl fmt::Display for DailyTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DailyTimes::Available(times) => write!(f, "{}-{}", times.start, times.end),
            DailyTimes::Unavailable => f.write_str(UNAVAILABLE_PLACEHOLDER),
        }
    }
}
