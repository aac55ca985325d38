//! Month layout into week rows.

use crate::config::CalendarConfig;
use crate::error::Result;
use crate::weekday::month_starting_day_of_week;

/// One row of a month grid: `Some(day)` for a 0-based day index, `None` for a blank.
pub type Week = Vec<Option<u32>>;

/// Lay `month` of `year` out as rows of `week_length` cells.
///
/// The first row is padded on the left with as many blanks as the month's
/// starting weekday, and the last row is padded on the right. A zero
/// `week_length`, or a month with no days in `year`, gives no rows.
///
/// # Errors
///
/// Propagates weekday errors (no weekdays configured, unknown month).
pub fn days_into_weeks(
    config: &CalendarConfig,
    month: usize,
    year: i64,
    week_length: usize,
) -> Result<Vec<Week>> {
    let days = config.month_days(month, year);
    if week_length == 0 || days == 0 {
        return Ok(Vec::new());
    }

    let offset = month_starting_day_of_week(config, month, year)?;
    let cells: Vec<Option<u32>> = std::iter::repeat_n(None, offset)
        .chain((0..days).map(Some))
        .collect();

    Ok(cells
        .chunks(week_length)
        .map(|row| {
            let mut week = row.to_vec();
            week.resize(week_length, None);
            week
        })
        .collect())
}
