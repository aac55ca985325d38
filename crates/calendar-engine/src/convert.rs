//! Conversion between elapsed seconds and calendar dates.
//!
//! All functions are pure: the same configuration and input always produce
//! the same output, and nothing reads a clock.
//!
//! # Functions
//!
//! - [`seconds_to_date`]: Elapsed seconds → [`StructuredDate`]
//! - [`date_to_seconds`]: [`StructuredDate`] → elapsed seconds
//! - [`seconds_to_interval`]: Raw duration → approximate [`Interval`]
//! - [`days_between`]: Signed whole days between two dates
//! - [`add_interval`]: Move an elapsed-seconds value by calendar units
//!
//! # Negative time
//!
//! Elapsed seconds below zero are dates before the epoch. Time of day is
//! always counted forward from midnight, so `-1` is the last second of the
//! day before the epoch rather than "second -1" of the epoch day.

use crate::config::{CalendarConfig, DayCount};
use crate::date::{Interval, StructuredDate};
use crate::error::{CalendarError, Result};

// ── seconds_to_date ─────────────────────────────────────────────────────────

/// Convert elapsed seconds since the epoch to a structured date.
///
/// Every `i64` is accepted. The date's year is an `i64` too, so a calendar
/// with very short years can name a year that does not fit.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidConfig`] if a month walk runs off the end of
/// the month list, which only a configuration with no days in a year can cause.
/// Returns [`CalendarError::InvalidDate`] if the year leaves the `i64` range.
///
/// # Examples
///
/// ```
/// use calendar_engine::{presets, seconds_to_date};
///
/// let config = presets::gregorian();
/// let date = seconds_to_date(&config, -1).unwrap();
/// // One second before 1970-01-01 00:00:00
/// assert_eq!((date.year, date.month, date.day), (1969, 11, 30));
/// assert_eq!((date.hour, date.minute, date.second), (23, 59, 59));
/// ```
pub fn seconds_to_date(config: &CalendarConfig, seconds: i64) -> Result<StructuredDate> {
    let per_day = config.seconds_per_day();
    let days = seconds.div_euclid(per_day);
    let second_of_day = seconds.rem_euclid(per_day);

    let (year, month, day) = if days >= 0 {
        walk_forward(config, days)?
    } else {
        // days + 1 <= 0, so the negation cannot overflow
        walk_backward(config, -(days + 1))?
    };

    let time = config.time();
    let hour = second_of_day / time.seconds_per_hour();
    let rest = second_of_day % time.seconds_per_hour();
    let minute = rest / time.seconds_per_minute();
    let second = rest % time.seconds_per_minute();

    Ok(StructuredDate {
        year,
        month,
        day,
        hour: hour as u32,
        minute: minute as u32,
        second: second as u32,
    })
}

/// Find the date `days` (≥ 0) days after the epoch.
fn walk_forward(config: &CalendarConfig, mut days: i64) -> Result<(i64, usize, u32)> {
    let mut year = config.year_zero();
    if let Some((cycle_years, cycle_days)) = config.cycle_span() {
        let whole = days / cycle_days;
        // Every year has a day, so whole * cycle_years <= days.
        year = shift_year(year, whole * cycle_years)?;
        days -= whole * cycle_days;
    }
    loop {
        let in_year = year_length(config, year)?;
        if days < in_year {
            break;
        }
        days -= in_year;
        year = shift_year(year, 1)?;
    }

    let leap = config.is_leap_year(year);
    for (index, month) in config.months().iter().enumerate() {
        let len = i64::from(month.days(leap));
        if days < len {
            return Ok((year, index, days as u32));
        }
        days -= len;
    }
    Err(month_scan_exhausted(year))
}

/// Find the date `back + 1` days before the epoch; `back` 0 is the last day
/// of the year before `year_zero`.
fn walk_backward(config: &CalendarConfig, mut back: i64) -> Result<(i64, usize, u32)> {
    let mut year = shift_year(config.year_zero(), -1)?;
    if let Some((cycle_years, cycle_days)) = config.cycle_span() {
        let whole = back / cycle_days;
        year = shift_year(year, -(whole * cycle_years))?;
        back -= whole * cycle_days;
    }
    loop {
        let in_year = year_length(config, year)?;
        if back < in_year {
            break;
        }
        back -= in_year;
        year = shift_year(year, -1)?;
    }

    let leap = config.is_leap_year(year);
    for (index, month) in config.months().iter().enumerate().rev() {
        let len = i64::from(month.days(leap));
        if back < len {
            return Ok((year, index, (len - 1 - back) as u32));
        }
        back -= len;
    }
    Err(month_scan_exhausted(year))
}

fn shift_year(year: i64, by: i64) -> Result<i64> {
    year.checked_add(by).ok_or_else(CalendarError::out_of_range)
}

fn year_length(config: &CalendarConfig, year: i64) -> Result<i64> {
    match config.days_in_year(year) {
        0 => Err(CalendarError::config(format!("year {year} has no days"))),
        n => Ok(n),
    }
}

fn month_scan_exhausted(year: i64) -> CalendarError {
    CalendarError::config(format!("no month with days found in year {year}"))
}

// ── date_to_seconds ─────────────────────────────────────────────────────────

/// Convert a structured date to elapsed seconds since the epoch.
///
/// The inverse of [`seconds_to_date`] for every in-range date. Day and time
/// fields are not range-checked; a day past the end of its month simply
/// counts on into the following days.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if `date.month` is not a month of
/// the calendar, or if the result does not fit in an `i64`.
pub fn date_to_seconds(config: &CalendarConfig, date: &StructuredDate) -> Result<i64> {
    let days = date_to_days(config, date.year, date.month, date.day)?;
    let time = config.time();
    // The start of the day can sit below i64::MIN while the moment itself fits.
    let seconds = days * i128::from(config.seconds_per_day())
        + i128::from(date.hour) * i128::from(time.seconds_per_hour())
        + i128::from(date.minute) * i128::from(time.seconds_per_minute())
        + i128::from(date.second);
    narrow(seconds)
}

/// Signed days from the epoch to day 0 of the given date.
pub(crate) fn date_to_days(config: &CalendarConfig, year: i64, month: usize, day: u32) -> Result<i128> {
    config.check_month(month)?;
    Ok(config.days_before_year(year, DayCount::All)
        + i128::from(config.days_before_month(year, month, DayCount::All))
        + i128::from(day))
}

/// Signed number of whole days from `from` to `to`, ignoring time of day.
pub fn days_between(config: &CalendarConfig, from: &StructuredDate, to: &StructuredDate) -> Result<i64> {
    narrow(
        date_to_days(config, to.year, to.month, to.day)?
            - date_to_days(config, from.year, from.month, from.day)?,
    )
}

fn narrow(value: i128) -> Result<i64> {
    i64::try_from(value).map_err(|_| CalendarError::out_of_range())
}

// ── seconds_to_interval ─────────────────────────────────────────────────────

/// Break a raw duration into seconds, minutes, hours, days, months and years.
///
/// Seconds, minutes, hours and days are exact. Months and years are
/// approximate: days are bucketed by the average length of a
/// non-intercalary month, and months by the number of non-intercalary months
/// in a (common) year. Use this for "about 3 months" style displays, never to
/// rebuild a date.
///
/// Bounds: every component is non-negative for a non-negative input, `hour`,
/// `minute` and `second` are below their unit sizes, and `day` is at most the
/// average month length rounded up. A negative duration yields the negated
/// breakdown of its magnitude.
pub fn seconds_to_interval(config: &CalendarConfig, seconds: i64) -> Interval {
    // Break down the magnitude in i128 so that i64::MIN keeps its last second.
    let sign: i128 = if seconds < 0 { -1 } else { 1 };
    let magnitude = i128::from(seconds).abs();

    let time = config.time();
    let total_minutes = magnitude / i128::from(time.seconds_per_minute);
    let second = magnitude % i128::from(time.seconds_per_minute);
    let total_hours = total_minutes / i128::from(time.minutes_per_hour);
    let minute = total_minutes % i128::from(time.minutes_per_hour);
    let total_days = total_hours / i128::from(time.hours_per_day);
    let hour = total_hours % i128::from(time.hours_per_day);

    let regular: Vec<_> = config.months().iter().filter(|m| !m.intercalary).collect();
    let regular_days: u64 = regular.iter().map(|m| u64::from(m.number_of_days)).sum();
    let (year, month, day) = if regular.is_empty() || regular_days == 0 {
        (0, 0, total_days)
    } else {
        let months_per_year = regular.len() as i128;
        let average_month = regular_days as f64 / months_per_year as f64;
        let total_months = (total_days as f64 / average_month).floor() as i128;
        let day = total_days - (total_months as f64 * average_month).round() as i128;
        (
            total_months / months_per_year,
            total_months % months_per_year,
            day,
        )
    };

    let signed = |value: i128| (sign * value).clamp(i64::MIN.into(), i64::MAX.into()) as i64;
    Interval {
        year: signed(year),
        month: signed(month),
        day: signed(day),
        hour: signed(hour),
        minute: signed(minute),
        second: signed(second),
    }
}

// ── add_interval ────────────────────────────────────────────────────────────

/// Move `seconds` by `interval`, the way a person changes a calendar date.
///
/// Years are applied first and keep the month and day. Months are applied
/// next and roll over into neighbouring years; landing on a month with no
/// days that year moves on in the direction of travel. After either step the
/// day index is clamped to the length of the month it lands in. Days, hours,
/// minutes and seconds are then added as plain elapsed time, so they carry
/// across month and year ends.
///
/// # Errors
///
/// Propagates conversion errors; see [`seconds_to_date`]. Returns
/// [`CalendarError::InvalidDate`] if the result leaves the `i64` range.
pub fn add_interval(config: &CalendarConfig, seconds: i64, interval: &Interval) -> Result<i64> {
    let mut date = seconds_to_date(config, seconds)?;

    if interval.year != 0 {
        date.year = shift_year(date.year, interval.year)?;
        settle_month(config, &mut date, 1)?;
    }
    if interval.month != 0 {
        let count = config.months().len() as i128;
        let index = date.month as i128 + i128::from(interval.month);
        date.year = shift_year(date.year, narrow(index.div_euclid(count))?)?;
        date.month = index.rem_euclid(count) as usize;
        settle_month(config, &mut date, interval.month.signum())?;
    }

    let time = config.time();
    narrow(
        i128::from(date_to_seconds(config, &date)?)
            + i128::from(interval.day) * i128::from(config.seconds_per_day())
            + i128::from(interval.hour) * i128::from(time.seconds_per_hour())
            + i128::from(interval.minute) * i128::from(time.seconds_per_minute())
            + i128::from(interval.second),
    )
}

/// Step off zero-day months in `direction` and clamp the day to the month.
fn settle_month(config: &CalendarConfig, date: &mut StructuredDate, direction: i64) -> Result<()> {
    let count = config.months().len();
    for _ in 0..=count {
        let len = config.month_days(date.month, date.year);
        if len > 0 {
            date.day = date.day.min(len - 1);
            return Ok(());
        }
        if direction < 0 {
            if date.month == 0 {
                date.month = count - 1;
                date.year = shift_year(date.year, -1)?;
            } else {
                date.month -= 1;
            }
        } else if date.month + 1 == count {
            date.month = 0;
            date.year = shift_year(date.year, 1)?;
        } else {
            date.month += 1;
        }
    }
    Err(month_scan_exhausted(date.year))
}

// ── Tests ───────────────────────────────────────────────────────────────────
