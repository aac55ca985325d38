use calendar_engine::{
    days_into_weeks, seconds_to_date, sunrise_sunset_time, CalendarConfig, CalendarError,
    LeapYearRule, StructuredDate, SunEvent,
};

const FROSTLANDS: &str = r#"{
    "yearZero": 300,
    "firstWeekday": 1,
    "months": [
        { "name": "Deepcold", "numberOfDays": 28 },
        { "name": "Longnight", "numberOfDays": 0, "numberOfLeapYearDays": 1,
          "intercalary": true, "intercalaryInclude": false },
        { "name": "Melt", "numberOfDays": 28 },
        { "name": "Fair", "numberOfDays": 28, "startingWeekday": 2 }
    ],
    "weekdays": [{ "name": "Moon" }, { "name": "Fire" }, { "name": "Wind" }, { "name": "Stone" }],
    "seasons": [
        { "name": "Thaw", "startingMonth": 2, "startingDay": 0,
          "sunriseTime": 25200, "sunsetTime": 61200 },
        { "name": "Dark", "startingMonth": 0, "startingDay": 0,
          "sunriseTime": 36000, "sunsetTime": 50400 }
    ],
    "leapYearRule": { "kind": "interval", "interval": 5, "offset": 300 },
    "time": { "hoursPerDay": 20, "minutesPerHour": 60, "secondsPerMinute": 60 }
}"#;

#[test]
fn loads_full_record() {
    let config = CalendarConfig::from_json(FROSTLANDS).unwrap();
    assert_eq!(config.year_zero(), 300);
    assert_eq!(config.months().len(), 4);
    assert_eq!(
        config.leap_year_rule(),
        &LeapYearRule::Interval {
            interval: 5,
            offset: 300
        }
    );
    assert_eq!(config.seconds_per_day(), 72_000);
    assert_eq!(config.days_in_year(300), 85);
    assert_eq!(config.days_in_year(301), 84);
    // Seasons come back sorted by start
    let names: Vec<_> = config.seasons().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Dark", "Thaw"]);
}

#[test]
fn loaded_calendar_converts() {
    let config = CalendarConfig::from_json(FROSTLANDS).unwrap();
    let per_day = config.seconds_per_day();
    assert_eq!(
        seconds_to_date(&config, 28 * per_day).unwrap(),
        StructuredDate::new(300, 1, 0)
    );
    // 301 is common: day 28 is the first day of Melt
    assert_eq!(
        seconds_to_date(&config, (85 + 28) * per_day).unwrap(),
        StructuredDate::new(301, 2, 0)
    );
}

#[test]
fn loaded_calendar_lays_out_grid() {
    let config = CalendarConfig::from_json(FROSTLANDS).unwrap();
    // Fair always starts on weekday 1 (starting weekday 2, day 0)
    let weeks = days_into_weeks(&config, 3, 304, 4).unwrap();
    assert_eq!(weeks[0], vec![None, Some(0), Some(1), Some(2)]);
    assert_eq!(weeks.len(), 8);
}

#[test]
fn loaded_calendar_interpolates_sun() {
    let config = CalendarConfig::from_json(FROSTLANDS).unwrap();
    let rise = sunrise_sunset_time(&config, 301, 0, 0, SunEvent::Sunrise, false).unwrap();
    assert_eq!(rise, 36_000);
    // Halfway through Dark (28 days in a common year): 14 of 28 days
    let rise = sunrise_sunset_time(&config, 301, 0, 14, SunEvent::Sunrise, false).unwrap();
    assert_eq!(rise, 36_000 - 5_400);
}

#[test]
fn partial_record_uses_defaults() {
    let config = CalendarConfig::from_json(r#"{ "months": [{ "name": "Only", "numberOfDays": 10 }] }"#)
        .unwrap();
    assert_eq!(config.year_zero(), 0);
    assert_eq!(config.seconds_per_day(), 86_400);
    assert_eq!(config.leap_year_rule(), &LeapYearRule::None);
    assert_eq!(config.months()[0].number_of_leap_year_days, 10);
}

#[test]
fn gregorian_rule_by_kind() {
    let config = CalendarConfig::from_json(
        r#"{ "months": [{ "name": "M", "numberOfDays": 1, "numberOfLeapYearDays": 2 }],
             "leapYearRule": { "kind": "gregorian" } }"#,
    )
    .unwrap();
    assert_eq!(config.days_in_year(2000), 2);
    assert_eq!(config.days_in_year(1900), 1);
}

#[test]
fn rejects_bad_records() {
    let cases = [
        (r#"{}"#, "no months"),
        (r#"{ "months": [{ "name": "M", "numberOfDays": 0 }] }"#, "empty year"),
        (
            r#"{ "months": [{ "name": "M", "numberOfDays": 3 }], "time": { "hoursPerDay": 0 } }"#,
            "zero hours",
        ),
        (
            r#"{ "months": [{ "name": "M", "numberOfDays": 3 }],
                 "leapYearRule": { "kind": "interval", "interval": 0 } }"#,
            "zero interval",
        ),
        (
            r#"{ "months": [{ "name": "M", "numberOfDays": 3 }],
                 "seasons": [{ "name": "S", "startingMonth": 4 }] }"#,
            "season month",
        ),
    ];
    for (json, label) in cases {
        let err = CalendarConfig::from_json(json).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidConfig(_)), "{label}: {err:?}");
    }
}

#[test]
fn rejects_malformed_json() {
    let err = CalendarConfig::from_json("{ months: ").unwrap_err();
    assert!(matches!(err, CalendarError::Serialization(_)));
    let err = CalendarConfig::from_json(r#"{ "leapYearRule": { "kind": "lunar" } }"#).unwrap_err();
    assert!(matches!(err, CalendarError::Serialization(_)));
}
