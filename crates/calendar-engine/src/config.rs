//! Calendar configuration: months, weekdays, seasons, leap rule and time units.
//!
//! [`CalendarData`] is the plain serde record callers load and store.
//! [`CalendarConfig`] is the validated, immutable form every computation in
//! this crate takes. Converting one into the other is the only place
//! configuration errors are raised.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CalendarError, Result};
use crate::leap::LeapYearRule;
use crate::season::{Season, SeasonTable};

// ── Time units ──────────────────────────────────────────────────────────────

/// Sizes of the sub-day units. All three must be greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeUnits {
    pub hours_per_day: u32,
    pub minutes_per_hour: u32,
    pub seconds_per_minute: u32,
}

impl Default for TimeUnits {
    fn default() -> Self {
        Self {
            hours_per_day: 24,
            minutes_per_hour: 60,
            seconds_per_minute: 60,
        }
    }
}

impl TimeUnits {
    pub fn seconds_per_minute(&self) -> i64 {
        i64::from(self.seconds_per_minute)
    }

    pub fn seconds_per_hour(&self) -> i64 {
        i64::from(self.minutes_per_hour) * self.seconds_per_minute()
    }

    pub fn seconds_per_day(&self) -> i64 {
        i64::from(self.hours_per_day) * self.seconds_per_hour()
    }
}

// ── Months and weekdays ─────────────────────────────────────────────────────

/// One month of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MonthRecord", rename_all = "camelCase")]
pub struct Month {
    pub name: String,
    pub number_of_days: u32,
    pub number_of_leap_year_days: u32,
    pub intercalary: bool,
    /// An intercalary month with this set still advances the weekday.
    pub intercalary_include: bool,
    /// 1-based weekday the month always starts on, ignoring the running count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_weekday: Option<u32>,
}

/// Wire form of [`Month`]; a missing leap-year length means "same as normal".
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthRecord {
    #[serde(default)]
    name: String,
    #[serde(default)]
    number_of_days: u32,
    number_of_leap_year_days: Option<u32>,
    #[serde(default)]
    intercalary: bool,
    #[serde(default)]
    intercalary_include: bool,
    starting_weekday: Option<u32>,
}

impl From<MonthRecord> for Month {
    fn from(r: MonthRecord) -> Self {
        Self {
            name: r.name,
            number_of_days: r.number_of_days,
            number_of_leap_year_days: r.number_of_leap_year_days.unwrap_or(r.number_of_days),
            intercalary: r.intercalary,
            intercalary_include: r.intercalary_include,
            starting_weekday: r.starting_weekday,
        }
    }
}

impl Month {
    /// A regular month with the same length in every year.
    pub fn new(name: impl Into<String>, days: u32) -> Self {
        Self {
            name: name.into(),
            number_of_days: days,
            number_of_leap_year_days: days,
            intercalary: false,
            intercalary_include: false,
            starting_weekday: None,
        }
    }

    pub fn with_leap_days(mut self, days: u32) -> Self {
        self.number_of_leap_year_days = days;
        self
    }

    /// Mark the month intercalary. `include` keeps it in the weekday count.
    pub fn intercalary(mut self, include: bool) -> Self {
        self.intercalary = true;
        self.intercalary_include = include;
        self
    }

    pub fn with_starting_weekday(mut self, weekday: u32) -> Self {
        self.starting_weekday = Some(weekday);
        self
    }

    /// Length of the month in a leap or common year.
    pub fn days(&self, leap_year: bool) -> u32 {
        if leap_year {
            self.number_of_leap_year_days
        } else {
            self.number_of_days
        }
    }

    /// Whether days of this month advance the weekday cycle.
    pub fn counts_toward_weekdays(&self) -> bool {
        !self.intercalary || self.intercalary_include
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weekday {
    pub name: String,
}

impl Weekday {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

// ── Raw record ──────────────────────────────────────────────────────────────

/// The calendar configuration exactly as it is stored.
///
/// Every field has a default so partially written records still load.
/// Turn it into a [`CalendarConfig`] with [`CalendarData::build`] or
/// `CalendarConfig::try_from`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarData {
    pub year_zero: i64,
    pub first_weekday: usize,
    pub months: Vec<Month>,
    pub weekdays: Vec<Weekday>,
    pub seasons: Vec<Season>,
    pub leap_year_rule: LeapYearRule,
    pub time: TimeUnits,
}

impl CalendarData {
    pub fn build(self) -> Result<CalendarConfig> {
        CalendarConfig::try_from(self)
    }
}

// ── Validated configuration ─────────────────────────────────────────────────

/// Which days a count includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DayCount {
    /// Every calendar day.
    All,
    /// Only days that advance the weekday cycle.
    Weekday,
}

/// Days in one full leap cycle, precomputed at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LeapCycle {
    years: i64,
    all_days: i64,
    weekday_days: i64,
}

/// A validated calendar shape.
///
/// Guarantees: at least one month, every time unit greater than zero, and
/// every year the leap rule can produce has at least one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CalendarData", into = "CalendarData")]
pub struct CalendarConfig {
    year_zero: i64,
    first_weekday: usize,
    months: Vec<Month>,
    weekdays: Vec<Weekday>,
    seasons: SeasonTable,
    leap_year_rule: LeapYearRule,
    time: TimeUnits,
    cycle: Option<LeapCycle>,
}

impl TryFrom<CalendarData> for CalendarConfig {
    type Error = CalendarError;

    fn try_from(data: CalendarData) -> Result<Self> {
        if data.months.is_empty() {
            return Err(CalendarError::config("calendar must define at least one month"));
        }
        let t = data.time;
        if t.hours_per_day == 0 || t.minutes_per_hour == 0 || t.seconds_per_minute == 0 {
            return Err(CalendarError::config(format!(
                "time units must be greater than zero (got {}h/{}m/{}s)",
                t.hours_per_day, t.minutes_per_hour, t.seconds_per_minute
            )));
        }
        if let LeapYearRule::Interval { interval: 0, .. } = data.leap_year_rule {
            return Err(CalendarError::config(
                "leap-year interval must be greater than zero",
            ));
        }
        let common: u64 = data.months.iter().map(|m| u64::from(m.number_of_days)).sum();
        if common == 0 {
            return Err(CalendarError::config(
                "a common year must contain at least one day",
            ));
        }
        if data.leap_year_rule.can_leap() {
            let leap: u64 = data
                .months
                .iter()
                .map(|m| u64::from(m.number_of_leap_year_days))
                .sum();
            if leap == 0 {
                return Err(CalendarError::config(
                    "a leap year must contain at least one day",
                ));
            }
        }
        if let Some(s) = data
            .seasons
            .iter()
            .find(|s| s.starting_month >= data.months.len())
        {
            return Err(CalendarError::config(format!(
                "season '{}' starts in month {} but the calendar has {} months",
                s.name,
                s.starting_month,
                data.months.len()
            )));
        }

        let mut config = Self {
            year_zero: data.year_zero,
            first_weekday: data.first_weekday,
            months: data.months,
            weekdays: data.weekdays,
            seasons: SeasonTable::new(data.seasons),
            leap_year_rule: data.leap_year_rule,
            time: data.time,
            cycle: None,
        };
        config.cycle = config.leap_year_rule.cycle_length().map(|years| LeapCycle {
            years,
            all_days: (0..years).map(|y| config.year_days(y, DayCount::All)).sum(),
            weekday_days: (0..years)
                .map(|y| config.year_days(y, DayCount::Weekday))
                .sum(),
        });

        debug!(
            months = config.months.len(),
            weekdays = config.weekdays.len(),
            seasons = config.seasons.len(),
            "calendar configuration validated"
        );
        Ok(config)
    }
}

impl From<CalendarConfig> for CalendarData {
    fn from(config: CalendarConfig) -> Self {
        Self {
            year_zero: config.year_zero,
            first_weekday: config.first_weekday,
            months: config.months,
            weekdays: config.weekdays,
            seasons: config.seasons.into_vec(),
            leap_year_rule: config.leap_year_rule,
            time: config.time,
        }
    }
}

impl CalendarConfig {
    /// Parse and validate a JSON configuration record.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: CalendarData = serde_json::from_str(json)
            .map_err(|e| CalendarError::Serialization(e.to_string()))?;
        data.build()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalendarError::Serialization(e.to_string()))
    }

    pub fn year_zero(&self) -> i64 {
        self.year_zero
    }

    pub fn first_weekday(&self) -> usize {
        self.first_weekday
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn month(&self, index: usize) -> Option<&Month> {
        self.months.get(index)
    }

    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    pub fn seasons(&self) -> &SeasonTable {
        &self.seasons
    }

    pub fn leap_year_rule(&self) -> &LeapYearRule {
        &self.leap_year_rule
    }

    pub fn time(&self) -> &TimeUnits {
        &self.time
    }

    pub fn seconds_per_day(&self) -> i64 {
        self.time.seconds_per_day()
    }

    pub fn is_leap_year(&self, year: i64) -> bool {
        self.leap_year_rule.is_leap_year(year)
    }

    /// Days in `month` of `year`; 0 when the month index is out of range.
    pub fn month_days(&self, month: usize, year: i64) -> u32 {
        let leap = self.is_leap_year(year);
        self.months.get(month).map_or(0, |m| m.days(leap))
    }

    /// Total days in `year`, intercalary months included.
    pub fn days_in_year(&self, year: i64) -> i64 {
        self.year_days(year, DayCount::All)
    }

    pub(crate) fn year_days(&self, year: i64, count: DayCount) -> i64 {
        let leap = self.is_leap_year(year);
        self.months
            .iter()
            .filter(|m| count == DayCount::All || m.counts_toward_weekdays())
            .map(|m| i64::from(m.days(leap)))
            .sum()
    }

    /// Signed number of days from the epoch to day 0 of `year`.
    ///
    /// Counted in `i128`: the span between two `i64` years, times the days
    /// in each, can exceed `i64`.
    pub(crate) fn days_before_year(&self, year: i64, count: DayCount) -> i128 {
        let (start, end, sign) = if year >= self.year_zero {
            (self.year_zero, year, 1)
        } else {
            (year, self.year_zero, -1)
        };
        let mut from = start;
        let mut total: i128 = 0;
        if let Some(cycle) = self.cycle {
            let whole = (i128::from(end) - i128::from(start)) / i128::from(cycle.years);
            total += whole * i128::from(cycle.days(count));
            // Lands in [start, end], so it fits back into i64.
            from = (i128::from(start) + whole * i128::from(cycle.years)) as i64;
        }
        total += (from..end)
            .map(|y| i128::from(self.year_days(y, count)))
            .sum::<i128>();
        sign * total
    }

    /// Days in `year` before day 0 of `month`.
    pub(crate) fn days_before_month(&self, year: i64, month: usize, count: DayCount) -> i64 {
        let leap = self.is_leap_year(year);
        self.months
            .iter()
            .take(month)
            .filter(|m| count == DayCount::All || m.counts_toward_weekdays())
            .map(|m| i64::from(m.days(leap)))
            .sum()
    }

    /// Length of a whole leap cycle, if the rule has one.
    pub(crate) fn cycle_span(&self) -> Option<(i64, i64)> {
        self.cycle.map(|c| (c.years, c.all_days))
    }

    /// Error unless `month` indexes the month list.
    pub(crate) fn check_month(&self, month: usize) -> Result<&Month> {
        self.months.get(month).ok_or_else(|| {
            CalendarError::InvalidDate(format!(
                "month index {month} is out of range (calendar has {} months)",
                self.months.len()
            ))
        })
    }
}

impl LeapCycle {
    fn days(&self, count: DayCount) -> i64 {
        match count {
            DayCount::All => self.all_days,
            DayCount::Weekday => self.weekday_days,
        }
    }
}
