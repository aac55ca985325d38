//! Seasons, season lookup, and sunrise/sunset interpolation.

use serde::{Deserialize, Serialize};

use crate::config::CalendarConfig;
use crate::convert::{date_to_seconds, days_between};
use crate::date::StructuredDate;
use crate::error::{CalendarError, Result};

fn default_color() -> String {
    "#ffffff".to_string()
}

/// A season starting on a given (month, day) and repeating every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub starting_month: usize,
    #[serde(default)]
    pub starting_day: u32,
    /// Baseline sunrise on the season's first day, in seconds of the day.
    #[serde(default)]
    pub sunrise_time: i64,
    /// Baseline sunset on the season's first day, in seconds of the day.
    #[serde(default)]
    pub sunset_time: i64,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Season {
    pub fn new(name: impl Into<String>, starting_month: usize, starting_day: u32) -> Self {
        Self {
            name: name.into(),
            starting_month,
            starting_day,
            sunrise_time: 0,
            sunset_time: 0,
            color: default_color(),
        }
    }

    pub fn with_sun(mut self, sunrise_time: i64, sunset_time: i64) -> Self {
        self.sunrise_time = sunrise_time;
        self.sunset_time = sunset_time;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    fn starts_on_or_before(&self, month: usize, day: u32) -> bool {
        (self.starting_month, self.starting_day) <= (month, day)
    }
}

/// Which baseline [`sunrise_sunset_time`] interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunEvent {
    Sunrise,
    Sunset,
}

impl SunEvent {
    fn baseline(self, season: &Season) -> i64 {
        match self {
            Self::Sunrise => season.sunrise_time,
            Self::Sunset => season.sunset_time,
        }
    }
}

/// Seasons kept sorted by `(starting_month, starting_day)`.
///
/// The table is cyclic: the last season runs on into the start of the next
/// year until the first season begins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Season>", into = "Vec<Season>")]
pub struct SeasonTable {
    seasons: Vec<Season>,
}

impl From<Vec<Season>> for SeasonTable {
    fn from(seasons: Vec<Season>) -> Self {
        Self::new(seasons)
    }
}

impl From<SeasonTable> for Vec<Season> {
    fn from(table: SeasonTable) -> Self {
        table.seasons
    }
}

impl SeasonTable {
    pub fn new(mut seasons: Vec<Season>) -> Self {
        seasons.sort_by_key(|s| (s.starting_month, s.starting_day));
        Self { seasons }
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Season> {
        self.seasons.iter()
    }

    pub fn into_vec(self) -> Vec<Season> {
        self.seasons
    }

    /// The season in effect on (`month`, `day`), or `None` if there are no seasons.
    pub fn resolve(&self, month: usize, day: u32) -> Option<&Season> {
        self.resolve_index(month, day).map(|i| &self.seasons[i])
    }

    /// Sorted index of the active season; wraps to the last one when no
    /// season has started yet this year.
    fn resolve_index(&self, month: usize, day: u32) -> Option<usize> {
        if self.seasons.is_empty() {
            return None;
        }
        let started = self
            .seasons
            .iter()
            .take_while(|s| s.starts_on_or_before(month, day))
            .count();
        Some(if started == 0 {
            self.seasons.len() - 1
        } else {
            started - 1
        })
    }
}

/// Sunrise or sunset for a date, linearly interpolated between the baselines
/// of the active season and the one after it.
///
/// Returns seconds of the day, or with `with_timestamp` the absolute elapsed
/// seconds of that moment.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidConfig`] if the calendar has no seasons, or
/// [`CalendarError::InvalidDate`] if `month` is out of range or the timestamp
/// does not fit in an `i64`.
pub fn sunrise_sunset_time(
    config: &CalendarConfig,
    year: i64,
    month: usize,
    day: u32,
    event: SunEvent,
    with_timestamp: bool,
) -> Result<i64> {
    let table = config.seasons();
    let index = table
        .resolve_index(month, day)
        .ok_or_else(|| CalendarError::config("calendar has no seasons"))?;
    let season = &table.seasons[index];
    let next = &table.seasons[(index + 1) % table.len()];

    // The last season of the year may have started the year before.
    let mut season_year = year;
    let mut next_year = year;
    if index == table.len() - 1 {
        if !season.starts_on_or_before(month, day) {
            season_year = year.checked_sub(1).ok_or_else(CalendarError::out_of_range)?;
        }
        next_year = season_year
            .checked_add(1)
            .ok_or_else(CalendarError::out_of_range)?;
    }

    let target = StructuredDate::new(year, month, day);
    let season_start = StructuredDate::new(season_year, season.starting_month, season.starting_day);
    let next_start = StructuredDate::new(next_year, next.starting_month, next.starting_day);

    let elapsed = days_between(config, &season_start, &target)?;
    let span = days_between(config, &season_start, &next_start)?;

    let base = event.baseline(season);
    let value = if span == 0 {
        base
    } else {
        let per_day = (event.baseline(next) - base) as f64 / span as f64;
        (base as f64 + elapsed as f64 * per_day + 0.5).floor() as i64
    };

    if with_timestamp {
        date_to_seconds(config, &target)?
            .checked_add(value)
            .ok_or_else(CalendarError::out_of_range)
    } else {
        Ok(value)
    }
}
