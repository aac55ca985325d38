//! Error types for calendar-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown calendar: {0}")]
    UnknownCalendar(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CalendarError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// A date or elapsed-seconds value that does not fit in an `i64`.
    pub(crate) fn out_of_range() -> Self {
        Self::InvalidDate("date is outside the representable range".to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
