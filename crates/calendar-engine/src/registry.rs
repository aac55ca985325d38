//! Calendars with a position in time, and the registry that owns them.
//!
//! A [`Calendar`] pairs a validated configuration with its elapsed-seconds
//! counter. Nothing inside the configuration marks a "current" month or day;
//! the counter is the only position state.
//!
//! A [`CalendarRegistry`] owns every calendar in play. With sync enabled, a
//! change applied to one calendar through the registry is applied to all the
//! others right after it.

use tracing::{debug, warn};

use crate::config::CalendarConfig;
use crate::convert::{add_interval, date_to_seconds, seconds_to_date};
use crate::date::{CurrentPosition, Interval, StructuredDate};
use crate::error::{CalendarError, Result};
use crate::season::Season;

// ── Calendar ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Calendar {
    id: String,
    name: String,
    config: CalendarConfig,
    elapsed: i64,
}

impl Calendar {
    /// A calendar positioned at its epoch.
    pub fn new(id: impl Into<String>, name: impl Into<String>, config: CalendarConfig) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            config,
            elapsed: 0,
        }
    }

    /// Restore a calendar from a stored position.
    ///
    /// A stored position can outlive the configuration it was written
    /// against. A month index past the month list falls back to the first
    /// month that has days that year; a day index past the month's length
    /// falls back to day 0; a time of day outside the day wraps into it.
    /// Every repair is logged as a warning.
    pub fn from_position(
        id: impl Into<String>,
        name: impl Into<String>,
        config: CalendarConfig,
        position: &CurrentPosition,
    ) -> Result<Self> {
        let mut calendar = Self::new(id, name, config);
        calendar.elapsed = calendar.position_to_seconds(position)?;
        Ok(calendar)
    }

    fn position_to_seconds(&self, position: &CurrentPosition) -> Result<i64> {
        let config = &self.config;
        let year = position.year;
        let mut month = position.month;
        let mut day = position.day;

        if config.month_days(month, year) == 0 {
            let fallback = (0..config.months().len())
                .find(|&m| config.month_days(m, year) > 0)
                .ok_or_else(|| CalendarError::config(format!("year {year} has no days")))?;
            warn!(
                calendar = %self.id,
                stored = month,
                fallback,
                "stored month not found in this year, using the first month with days"
            );
            month = fallback;
            day = 0;
        } else if day >= config.month_days(month, year) {
            warn!(
                calendar = %self.id,
                stored = day,
                month,
                "stored day not found in this month, using the first day"
            );
            day = 0;
        }

        let per_day = config.seconds_per_day();
        let mut seconds = position.seconds;
        if !(0..per_day).contains(&seconds) {
            warn!(
                calendar = %self.id,
                stored = seconds,
                "stored time of day is outside the day, wrapping"
            );
            seconds = seconds.rem_euclid(per_day);
        }

        date_to_seconds(config, &StructuredDate::new(year, month, day))?
            .checked_add(seconds)
            .ok_or_else(CalendarError::out_of_range)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Elapsed seconds since the epoch.
    pub fn elapsed(&self) -> i64 {
        self.elapsed
    }

    pub fn set_elapsed(&mut self, seconds: i64) {
        self.elapsed = seconds;
    }

    pub fn current_date(&self) -> Result<StructuredDate> {
        seconds_to_date(&self.config, self.elapsed)
    }

    /// The current position in the stored record shape.
    pub fn position(&self) -> Result<CurrentPosition> {
        let date = self.current_date()?;
        Ok(CurrentPosition {
            year: date.year,
            month: date.month,
            day: date.day,
            seconds: self.elapsed.rem_euclid(self.config.seconds_per_day()),
        })
    }

    pub fn current_season(&self) -> Result<Option<&Season>> {
        let date = self.current_date()?;
        Ok(self.config.seasons().resolve(date.month, date.day))
    }

    /// Move this calendar by `interval`; see [`add_interval`].
    pub fn change_date_time(&mut self, interval: &Interval) -> Result<()> {
        self.elapsed = add_interval(&self.config, self.elapsed, interval)?;
        Ok(())
    }
}

// ── Registry ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CalendarRegistry {
    calendars: Vec<Calendar>,
    active: Option<usize>,
    sync: bool,
}

impl CalendarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every calendar in step with changes made through the registry.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn sync(&self) -> bool {
        self.sync
    }

    pub fn len(&self) -> usize {
        self.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calendars.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Calendar> {
        self.calendars.iter()
    }

    /// Add a calendar, replacing one with the same id. The first calendar
    /// added becomes the active one.
    pub fn insert(&mut self, calendar: Calendar) {
        match self.index_of(&calendar.id) {
            Some(i) => self.calendars[i] = calendar,
            None => {
                self.calendars.push(calendar);
                self.active.get_or_insert(self.calendars.len() - 1);
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Calendar> {
        let index = self.index_of(id)?;
        let removed = self.calendars.remove(index);
        self.active = match self.active {
            Some(a) if a == index => (!self.calendars.is_empty()).then_some(0),
            Some(a) if a > index => Some(a - 1),
            other => other,
        };
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&Calendar> {
        self.calendars.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Calendar> {
        self.calendars.iter_mut().find(|c| c.id == id)
    }

    pub fn active(&self) -> Option<&Calendar> {
        self.active.map(|i| &self.calendars[i])
    }

    pub fn set_active(&mut self, id: &str) -> Result<()> {
        self.active = Some(self.require(id)?);
        Ok(())
    }

    /// Move calendar `id` by `interval`, then every other calendar when sync
    /// is on. All new positions are computed before any is stored: if one
    /// calendar cannot move, none does.
    pub fn change_date_time(&mut self, id: &str, interval: &Interval) -> Result<()> {
        let leader = self.require(id)?;
        let moved = self
            .affected(leader)
            .map(|i| {
                let calendar = &self.calendars[i];
                if i != leader {
                    debug!(from = id, to = %calendar.id, "syncing date/time change");
                }
                Ok((i, add_interval(&calendar.config, calendar.elapsed, interval)?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.commit(moved);
        Ok(())
    }

    /// Set calendar `id` to `seconds`. With sync on, every other calendar
    /// moves by the same number of seconds, all or none.
    pub fn set_elapsed(&mut self, id: &str, seconds: i64) -> Result<()> {
        let leader = self.require(id)?;
        let delta = i128::from(seconds) - i128::from(self.calendars[leader].elapsed);
        let moved = self
            .affected(leader)
            .map(|i| {
                let calendar = &self.calendars[i];
                if i != leader {
                    debug!(from = id, to = %calendar.id, %delta, "syncing elapsed time");
                }
                let elapsed = i64::try_from(i128::from(calendar.elapsed) + delta)
                    .map_err(|_| CalendarError::out_of_range())?;
                Ok((i, elapsed))
            })
            .collect::<Result<Vec<_>>>()?;
        self.commit(moved);
        Ok(())
    }

    /// The calendar at `leader`, then every other one when sync is on.
    fn affected(&self, leader: usize) -> impl Iterator<Item = usize> + '_ {
        let followers = (0..self.calendars.len()).filter(move |&i| self.sync && i != leader);
        std::iter::once(leader).chain(followers)
    }

    fn commit(&mut self, moved: Vec<(usize, i64)>) {
        for (i, elapsed) in moved {
            self.calendars[i].elapsed = elapsed;
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.calendars.iter().position(|c| c.id == id)
    }

    fn require(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| CalendarError::UnknownCalendar(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{gregorian, harptos};

    fn registry(sync: bool) -> CalendarRegistry {
        let mut registry = CalendarRegistry::new().with_sync(sync);
        registry.insert(Calendar::new("earth", "Earth", gregorian()));
        registry.insert(Calendar::new("faerun", "Faerûn", harptos()));
        registry
    }

    // ── Calendar ────────────────────────────────────────────────────────

    #[test]
    fn test_from_position_round_trips() {
        let position = CurrentPosition {
            year: 2026,
            month: 9,
            day: 16,
            seconds: 12 * 3_600 + 5,
        };
        let calendar = Calendar::from_position("earth", "Earth", gregorian(), &position).unwrap();
        assert_eq!(calendar.position().unwrap(), position);
        let date = calendar.current_date().unwrap();
        assert_eq!((date.hour, date.minute, date.second), (12, 0, 5));
    }

    #[test]
    fn test_from_position_repairs_bad_month() {
        let position = CurrentPosition {
            year: 2026,
            month: 40,
            day: 3,
            seconds: 0,
        };
        let calendar = Calendar::from_position("earth", "Earth", gregorian(), &position).unwrap();
        assert_eq!(calendar.current_date().unwrap(), StructuredDate::new(2026, 0, 0));
    }

    #[test]
    fn test_from_position_repairs_bad_day_and_time() {
        let position = CurrentPosition {
            year: 2023,
            month: 1,
            day: 28,
            seconds: 86_400 + 60,
        };
        let calendar = Calendar::from_position("earth", "Earth", gregorian(), &position).unwrap();
        assert_eq!(
            calendar.current_date().unwrap(),
            StructuredDate::new(2023, 1, 0).with_time(0, 1, 0)
        );
    }

    #[test]
    fn test_from_position_skips_absent_festival() {
        // Shieldmeet (month 10) has no days in 1493
        let position = CurrentPosition {
            year: 1493,
            month: 10,
            day: 0,
            seconds: 0,
        };
        let calendar = Calendar::from_position("faerun", "Faerûn", harptos(), &position).unwrap();
        assert_eq!(calendar.current_date().unwrap(), StructuredDate::new(1493, 0, 0));
    }

    #[test]
    fn test_current_season() {
        let mut calendar = Calendar::new("earth", "Earth", gregorian());
        // 1970-01-01 is winter (started 1969-12-21)
        assert_eq!(calendar.current_season().unwrap().unwrap().name, "Winter");
        calendar.change_date_time(&Interval::months(6)).unwrap();
        assert_eq!(calendar.current_season().unwrap().unwrap().name, "Summer");
    }

    // ── Registry ────────────────────────────────────────────────────────

    #[test]
    fn test_first_insert_becomes_active() {
        let registry = registry(false);
        assert_eq!(registry.active().unwrap().id(), "earth");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut registry = registry(false);
        let mut replacement = Calendar::new("faerun", "Toril", harptos());
        replacement.set_elapsed(99);
        registry.insert(replacement);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("faerun").unwrap().name(), "Toril");
        assert_eq!(registry.get("faerun").unwrap().elapsed(), 99);
    }

    #[test]
    fn test_change_without_sync_touches_one_calendar() {
        let mut registry = registry(false);
        registry.change_date_time("earth", &Interval::days(2)).unwrap();
        assert_eq!(registry.get("earth").unwrap().elapsed(), 2 * 86_400);
        assert_eq!(registry.get("faerun").unwrap().elapsed(), 0);
    }

    #[test]
    fn test_change_with_sync_fans_out() {
        let mut registry = registry(true);
        registry.change_date_time("faerun", &Interval::days(2)).unwrap();
        assert_eq!(registry.get("earth").unwrap().elapsed(), 2 * 86_400);
        assert_eq!(registry.get("faerun").unwrap().elapsed(), 2 * 86_400);
    }

    #[test]
    fn test_set_elapsed_with_sync_moves_by_delta() {
        let mut registry = registry(true);
        registry.get_mut("earth").unwrap().set_elapsed(1_000);
        registry.set_elapsed("faerun", 500).unwrap();
        assert_eq!(registry.get("faerun").unwrap().elapsed(), 500);
        assert_eq!(registry.get("earth").unwrap().elapsed(), 1_500);
    }

    #[test]
    fn test_failed_sync_moves_no_calendar() {
        let mut registry = registry(true);
        registry.get_mut("faerun").unwrap().set_elapsed(i64::MAX - 10);
        let err = registry.change_date_time("earth", &Interval::days(1)).unwrap_err();
        assert_eq!(err, CalendarError::out_of_range());
        assert_eq!(registry.get("earth").unwrap().elapsed(), 0);
        assert_eq!(registry.get("faerun").unwrap().elapsed(), i64::MAX - 10);
    }

    #[test]
    fn test_failed_elapsed_sync_moves_no_calendar() {
        let mut registry = registry(true);
        registry.get_mut("faerun").unwrap().set_elapsed(i64::MIN + 5);
        let err = registry.set_elapsed("earth", -10).unwrap_err();
        assert_eq!(err, CalendarError::out_of_range());
        assert_eq!(registry.get("earth").unwrap().elapsed(), 0);
        assert_eq!(registry.get("faerun").unwrap().elapsed(), i64::MIN + 5);
    }

    #[test]
    fn test_unknown_calendar() {
        let mut registry = registry(true);
        let err = registry.change_date_time("mars", &Interval::days(1)).unwrap_err();
        assert_eq!(err, CalendarError::UnknownCalendar("mars".to_string()));
        assert!(registry.set_active("mars").is_err());
    }

    #[test]
    fn test_remove_keeps_active_valid() {
        let mut registry = registry(false);
        registry.set_active("faerun").unwrap();
        registry.remove("earth").unwrap();
        assert_eq!(registry.active().unwrap().id(), "faerun");
        registry.remove("faerun").unwrap();
        assert!(registry.active().is_none());
        assert!(registry.is_empty());
    }
}
