//! # calendar-engine
//!
//! Configurable calendar arithmetic for fictional and real-world calendars.
//!
//! A calendar is described entirely by data: months (some intercalary, some
//! only present in leap years), a weekday cycle, seasons with sunrise and
//! sunset baselines, a leap-year rule and the length of the day. Time is a
//! single signed counter of seconds since the epoch (`year_zero`, first month,
//! first day, midnight); every other view of it is computed on demand.
//!
//! ## Modules
//!
//! - [`config`]: calendar description, validation, JSON loading
//! - [`leap`]: leap-year rules
//! - [`date`]: structured dates, intervals, stored positions
//! - [`convert`]: seconds ↔ dates, day differences, interval arithmetic
//! - [`weekday`]: weekday resolution, including per-month overrides
//! - [`season`]: season lookup and sunrise/sunset interpolation
//! - [`grid`]: month layout into week rows
//! - [`registry`]: calendars with a current position, and synchronization
//! - [`presets`]: ready-made Gregorian and Harptos calendars
//! - [`error`]: error types
//!
//! Day and month indices are 0-based throughout.

pub mod config;
pub mod convert;
pub mod date;
pub mod error;
pub mod grid;
pub mod leap;
pub mod presets;
pub mod registry;
pub mod season;
pub mod weekday;

pub use config::{CalendarConfig, CalendarData, Month, TimeUnits, Weekday};
pub use convert::{add_interval, date_to_seconds, days_between, seconds_to_date, seconds_to_interval};
pub use date::{CurrentPosition, Interval, StructuredDate};
pub use error::{CalendarError, Result};
pub use grid::{days_into_weeks, Week};
pub use leap::{CustomLeapRule, LeapYearRule};
pub use registry::{Calendar, CalendarRegistry};
pub use season::{sunrise_sunset_time, Season, SeasonTable, SunEvent};
pub use weekday::{
    day_of_the_week, day_of_the_week_with_options, month_starting_day_of_week, WeekdayOptions,
};
