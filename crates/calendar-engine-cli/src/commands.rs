use std::fmt::Write;
use std::fs;

use anyhow::{anyhow, Context, Result};
use calendar_engine::{
    date_to_seconds, day_of_the_week, day_of_the_week_with_options, days_into_weeks, presets,
    seconds_to_date, seconds_to_interval, sunrise_sunset_time, CalendarConfig, StructuredDate,
    SunEvent, WeekdayOptions,
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::cli::{Cli, Command, DateFields, Event, GridArgs, Preset};

/// Run one subcommand and return what it prints.
pub fn run(cli: Cli) -> Result<String> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Date(args) => date(&config, args.seconds),
        Command::Seconds(args) => {
            let date = fields(&args.date).with_time(args.hour, args.minute, args.second);
            let seconds = date_to_seconds(&config, &date)?;
            to_json(&json!({ "seconds": seconds }))
        }
        Command::Interval(args) => to_json(&seconds_to_interval(&config, args.seconds)),
        Command::Weekday(args) => {
            let DateFields { year, month, day } = args.date;
            let options = WeekdayOptions {
                first_weekday: args.first_weekday,
            };
            let index = day_of_the_week_with_options(&config, year, month, day, &options)?;
            to_json(&json!({
                "index": index,
                "name": config.weekdays()[index].name,
            }))
        }
        Command::Season(args) => {
            config
                .month(args.month)
                .ok_or_else(|| anyhow!("month {} is not in this calendar", args.month))?;
            let season = config
                .seasons()
                .resolve(args.month, args.day)
                .context("calendar has no seasons")?;
            to_json(season)
        }
        Command::Sun(args) => {
            let DateFields { year, month, day } = args.date;
            let event = match args.event {
                Event::Sunrise => SunEvent::Sunrise,
                Event::Sunset => SunEvent::Sunset,
            };
            let seconds = sunrise_sunset_time(&config, year, month, day, event, args.timestamp)?;
            to_json(&json!({ "event": event, "seconds": seconds }))
        }
        Command::Grid(args) => grid(&config, &args),
        Command::Export => Ok(config.to_json()?),
    }
}

fn load_config(cli: &Cli) -> Result<CalendarConfig> {
    if let Some(path) = &cli.config {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read calendar file {}", path.display()))?;
        let config = CalendarConfig::from_json(&json)
            .with_context(|| format!("failed to load calendar file {}", path.display()))?;
        info!(path = %path.display(), "loaded calendar configuration");
        return Ok(config);
    }
    Ok(match cli.preset.unwrap_or(Preset::Gregorian) {
        Preset::Gregorian => presets::gregorian(),
        Preset::Harptos => presets::harptos(),
    })
}

fn fields(date: &DateFields) -> StructuredDate {
    StructuredDate::new(date.year, date.month, date.day)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DateReport<'a> {
    seconds: i64,
    #[serde(flatten)]
    date: StructuredDate,
    month_name: &'a str,
    weekday: Option<&'a str>,
    season: Option<&'a str>,
    display: String,
}

fn date(config: &CalendarConfig, seconds: i64) -> Result<String> {
    let date = seconds_to_date(config, seconds)?;
    let month_name = config
        .month(date.month)
        .map(|m| m.name.as_str())
        .unwrap_or_default();
    // Days outside the weekday cycle have no weekday name.
    let weekday = match config.month(date.month) {
        Some(m) if m.counts_toward_weekdays() && !config.weekdays().is_empty() => {
            let index = day_of_the_week(config, date.year, date.month, date.day)?;
            Some(config.weekdays()[index].name.as_str())
        }
        _ => None,
    };
    let season = config
        .seasons()
        .resolve(date.month, date.day)
        .map(|s| s.name.as_str());

    to_json(&DateReport {
        seconds,
        date,
        month_name,
        weekday,
        season,
        display: date.to_string(),
    })
}

const CELL: usize = 4;

fn grid(config: &CalendarConfig, args: &GridArgs) -> Result<String> {
    let month = config
        .month(args.month)
        .ok_or_else(|| anyhow!("month {} is not in this calendar", args.month))?;
    let week_length = args.week_length.unwrap_or(config.weekdays().len());
    let weeks = days_into_weeks(config, args.month, args.year, week_length)?;

    let mut out = format!("{} {}", month.name, args.year);
    if week_length == config.weekdays().len() {
        out.push('\n');
        for weekday in config.weekdays() {
            let short: String = weekday.name.chars().take(CELL - 1).collect();
            write!(out, "{short:>w$}", w = CELL)?;
        }
    }
    for week in weeks {
        let mut line = String::new();
        for cell in week {
            match cell {
                Some(day) => write!(line, "{:>w$}", day + 1, w = CELL)?,
                None => write!(line, "{:w$}", "", w = CELL)?,
            }
        }
        out.push('\n');
        out.push_str(line.trim_end());
    }
    Ok(out)
}
