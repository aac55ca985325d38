//! Ready-made calendar configurations.

use crate::config::{CalendarConfig, CalendarData, Month, Weekday};
use crate::leap::LeapYearRule;
use crate::season::Season;

const HOUR: i64 = 3_600;

fn weekdays(names: &[&str]) -> Vec<Weekday> {
    names.iter().copied().map(Weekday::new).collect()
}

/// A Gregorian-shaped calendar whose epoch is 1970-01-01 00:00:00.
///
/// - 12 months, February 28 days or 29 in leap years
/// - Gregorian leap rule, applied proleptically
/// - 7-day week starting Sunday; the epoch falls on a Thursday
/// - Four seasons at the northern-hemisphere solstices and equinoxes
pub fn gregorian() -> CalendarConfig {
    CalendarData {
        year_zero: 1970,
        first_weekday: 4,
        months: vec![
            Month::new("January", 31),
            Month::new("February", 28).with_leap_days(29),
            Month::new("March", 31),
            Month::new("April", 30),
            Month::new("May", 31),
            Month::new("June", 30),
            Month::new("July", 31),
            Month::new("August", 31),
            Month::new("September", 30),
            Month::new("October", 31),
            Month::new("November", 30),
            Month::new("December", 31),
        ],
        weekdays: weekdays(&[
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ]),
        seasons: vec![
            Season::new("Spring", 2, 19)
                .with_sun(6 * HOUR, 18 * HOUR)
                .with_color("#46b946"),
            Season::new("Summer", 5, 20)
                .with_sun(5 * HOUR, 21 * HOUR)
                .with_color("#e0c40b"),
            Season::new("Fall", 8, 21)
                .with_sun(6 * HOUR, 18 * HOUR)
                .with_color("#ff8e47"),
            Season::new("Winter", 11, 20)
                .with_sun(8 * HOUR, 16 * HOUR)
                .with_color("#479dff"),
        ],
        leap_year_rule: LeapYearRule::Gregorian,
        ..Default::default()
    }
    .build()
    .expect("gregorian preset is a valid calendar")
}

/// The Calendar of Harptos, starting Hammer 1, 1492 DR.
///
/// - 12 months of 30 days
/// - Five one-day festivals outside the tenday cycle
/// - Shieldmeet, a festival that only exists every 4th year
/// - 10-day weeks (tendays)
pub fn harptos() -> CalendarConfig {
    let festival = |name: &str, days: u32| Month::new(name, days).intercalary(false);
    CalendarData {
        year_zero: 1492,
        first_weekday: 0,
        months: vec![
            Month::new("Hammer", 30),
            festival("Midwinter", 1),
            Month::new("Alturiak", 30),
            Month::new("Ches", 30),
            Month::new("Tarsakh", 30),
            festival("Greengrass", 1),
            Month::new("Mirtul", 30),
            Month::new("Kythorn", 30),
            Month::new("Flamerule", 30),
            festival("Midsummer", 1),
            festival("Shieldmeet", 0).with_leap_days(1),
            Month::new("Eleasis", 30),
            Month::new("Eleint", 30),
            festival("Highharvestide", 1),
            Month::new("Marpenoth", 30),
            Month::new("Uktar", 30),
            festival("Feast of the Moon", 1),
            Month::new("Nightal", 30),
        ],
        weekdays: weekdays(&[
            "First-day",
            "Second-day",
            "Third-day",
            "Fourth-day",
            "Fifth-day",
            "Sixth-day",
            "Seventh-day",
            "Eighth-day",
            "Ninth-day",
            "Tenth-day",
        ]),
        seasons: vec![
            Season::new("Spring", 3, 18).with_sun(6 * HOUR, 18 * HOUR),
            Season::new("Summer", 7, 19).with_sun(5 * HOUR, 21 * HOUR),
            Season::new("Autumn", 12, 20).with_sun(6 * HOUR, 18 * HOUR),
            Season::new("Winter", 17, 19).with_sun(8 * HOUR, 16 * HOUR),
        ],
        leap_year_rule: LeapYearRule::every(4),
        ..Default::default()
    }
    .build()
    .expect("harptos preset is a valid calendar")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gregorian_year_lengths() {
        let config = gregorian();
        assert_eq!(config.days_in_year(2023), 365);
        assert_eq!(config.days_in_year(2024), 366);
        assert_eq!(config.days_in_year(1900), 365);
        assert_eq!(config.days_in_year(2000), 366);
    }

    #[test]
    fn test_harptos_year_lengths() {
        let config = harptos();
        assert_eq!(config.months().len(), 18);
        assert_eq!(config.days_in_year(1492), 366);
        assert_eq!(config.days_in_year(1493), 365);
    }

    #[test]
    fn test_presets_survive_json() {
        for config in [gregorian(), harptos()] {
            let back = CalendarConfig::from_json(&config.to_json().unwrap()).unwrap();
            assert_eq!(back, config);
        }
    }
}
