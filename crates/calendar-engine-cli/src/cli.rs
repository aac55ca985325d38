use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Date arithmetic on user-defined calendars.
#[derive(Parser)]
#[command(
    name = "calendar-engine",
    version,
    about = "Convert between elapsed seconds and dates on user-defined calendars"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Calendar configuration JSON file.
    #[arg(short, long, global = true, conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in calendar to use when no configuration file is given.
    #[arg(short, long, global = true, value_enum)]
    pub preset: Option<Preset>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Gregorian,
    Harptos,
}

#[derive(Subcommand)]
pub enum Command {
    /// Elapsed seconds to a date.
    Date(DateArgs),
    /// A date to elapsed seconds.
    Seconds(SecondsArgs),
    /// Elapsed seconds to an approximate years/months/days breakdown.
    Interval(IntervalArgs),
    /// Weekday of a date.
    Weekday(WeekdayArgs),
    /// Season in effect on a month and day.
    Season(SeasonArgs),
    /// Sunrise or sunset for a date.
    Sun(SunArgs),
    /// Print a month as a grid of weeks.
    Grid(GridArgs),
    /// Print the calendar configuration as JSON.
    Export,
}

#[derive(clap::Args)]
pub struct DateArgs {
    /// Seconds since the epoch; negative values are before it.
    #[arg(allow_negative_numbers = true)]
    pub seconds: i64,
}

/// A date on the command line. Month and day are 0-based.
#[derive(clap::Args)]
pub struct DateFields {
    #[arg(short, long, allow_negative_numbers = true)]
    pub year: i64,

    #[arg(short, long)]
    pub month: usize,

    #[arg(short, long)]
    pub day: u32,
}

#[derive(clap::Args)]
pub struct SecondsArgs {
    #[command(flatten)]
    pub date: DateFields,

    #[arg(long, default_value_t = 0)]
    pub hour: u32,

    #[arg(long, default_value_t = 0)]
    pub minute: u32,

    #[arg(long, default_value_t = 0)]
    pub second: u32,
}

#[derive(clap::Args)]
pub struct IntervalArgs {
    #[arg(allow_negative_numbers = true)]
    pub seconds: i64,
}

#[derive(clap::Args)]
pub struct WeekdayArgs {
    #[command(flatten)]
    pub date: DateFields,

    /// Override the calendar's first weekday for this lookup.
    #[arg(long)]
    pub first_weekday: Option<usize>,
}

#[derive(clap::Args)]
pub struct SeasonArgs {
    #[arg(short, long)]
    pub month: usize,

    #[arg(short, long)]
    pub day: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Event {
    Sunrise,
    Sunset,
}

#[derive(clap::Args)]
pub struct SunArgs {
    #[command(flatten)]
    pub date: DateFields,

    #[arg(short, long, value_enum, default_value_t = Event::Sunrise)]
    pub event: Event,

    /// Report absolute elapsed seconds instead of seconds of the day.
    #[arg(long)]
    pub timestamp: bool,
}

#[derive(clap::Args)]
pub struct GridArgs {
    #[arg(short, long, allow_negative_numbers = true)]
    pub year: i64,

    #[arg(short, long)]
    pub month: usize,

    /// Cells per row; defaults to the number of weekdays.
    #[arg(short, long)]
    pub week_length: Option<usize>,
}
