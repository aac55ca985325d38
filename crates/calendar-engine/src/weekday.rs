//! Weekday resolution.
//!
//! The weekday of a date is its distance in days from the epoch, counted
//! only over months that take part in the weekday cycle, offset by the
//! calendar's first weekday. A month with a `starting_weekday` override
//! ignores the running count entirely.

use crate::config::{CalendarConfig, DayCount};
use crate::error::{CalendarError, Result};

/// Options for [`day_of_the_week_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayOptions {
    /// Replaces the configured first weekday for this call only. Hosts that
    /// keep their own weekday convention (a game system's clock, say) set it.
    pub first_weekday: Option<usize>,
}

/// Weekday index of `day` in `month` of `year`, in `[0, weekdays.len())`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidConfig`] if the calendar has no weekdays,
/// or [`CalendarError::InvalidDate`] if `month` is out of range.
pub fn day_of_the_week(config: &CalendarConfig, year: i64, month: usize, day: u32) -> Result<usize> {
    day_of_the_week_with_options(config, year, month, day, &WeekdayOptions::default())
}

/// [`day_of_the_week`] with a per-call first-weekday override.
pub fn day_of_the_week_with_options(
    config: &CalendarConfig,
    year: i64,
    month: usize,
    day: u32,
    options: &WeekdayOptions,
) -> Result<usize> {
    let week = config.weekdays().len() as i128;
    if week == 0 {
        return Err(CalendarError::config("calendar has no weekdays"));
    }
    let target = config.check_month(month)?;

    let days_so_far = match target.starting_weekday {
        Some(start) => i128::from(day) + i128::from(start) - 1,
        None => {
            let first = options.first_weekday.unwrap_or(config.first_weekday()) as i128;
            config.days_before_year(year, DayCount::Weekday)
                + i128::from(config.days_before_month(year, month, DayCount::Weekday))
                + i128::from(day)
                + first
        }
    };
    Ok(days_so_far.rem_euclid(week) as usize)
}

/// Weekday of day 0 of `month`.
///
/// Intercalary months that sit outside the weekday cycle, and month indices
/// past the end of the calendar, start on weekday 0.
pub fn month_starting_day_of_week(config: &CalendarConfig, month: usize, year: i64) -> Result<usize> {
    match config.month(month) {
        Some(m) if m.counts_toward_weekdays() => day_of_the_week(config, year, month, 0),
        _ => Ok(0),
    }
}
