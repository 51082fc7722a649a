use crate::storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid start date {0:?}, expected YYYY-MM-DD")]
    InvalidStartDate(String),
    #[error("day {0} is not part of the calendar")]
    UnknownDay(i64),
    #[error("view {0:?} is not registered")]
    ViewNotRegistered(String),
    #[error("failed to write view: {0}")]
    Output(#[from] std::io::Error),
}
