use std::{path::PathBuf, str::FromStr};

use chrono::{NaiveDateTime, TimeDelta};
use clap::{Parser, Subcommand};

use crate::{prelude::*, quantity::Kilowatts, window::TimeWindow};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Path to the append-only readings log.
    #[clap(long = "log-file", env = "ENERGY_LOG_FILE", default_value = "energy.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the configured sources with their current output and status.
    Sources,

    /// Sample every source and append the readings to the log.
    Collect(CollectArgs),

    /// Print every reading ever collected, in write order.
    History,

    /// Filter the log by a time window and print the five statistics.
    Stats(StatsArgs),

    /// Run the low-output check for every source.
    Check(CollectArgs),
}

#[derive(Parser)]
pub struct CollectArgs {
    /// Override a source level first, e.g. `--set 'Solar Energy=42.5'`.
    #[clap(long = "set", value_name = "NAME=KILOWATTS")]
    pub overrides: Vec<LevelOverride>,
}

#[derive(Clone, Debug)]
pub struct LevelOverride {
    pub source_name: String,
    pub energy: Kilowatts,
}

impl FromStr for LevelOverride {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        let (source_name, energy) =
            value.rsplit_once('=').context("expected `NAME=KILOWATTS`")?;
        Ok(Self {
            source_name: source_name.to_owned(),
            energy: energy
                .parse()
                .with_context(|| format!("`{energy}` is not a number of kilowatts"))?,
        })
    }
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Window length ending now: `1h`, `1d`, `7d`, `30d`, and so on.
    #[clap(long, conflicts_with_all = ["from", "to"], required_unless_present = "from")]
    pub last: Option<humantime::Duration>,

    /// Window start, inclusive, as `yyyy-mm-dd HH:MM:SS[.SSS]`.
    #[clap(long, requires = "to", value_parser = parse_timestamp)]
    pub from: Option<NaiveDateTime>,

    /// Window end, inclusive.
    #[clap(long, requires = "from", value_parser = parse_timestamp)]
    pub to: Option<NaiveDateTime>,
}

impl StatsArgs {
    pub fn window(&self, now: NaiveDateTime) -> Result<TimeWindow> {
        if let Some(last) = self.last {
            return Ok(TimeWindow::last(
                TimeDelta::from_std(last.into()).context("the window length is too long")?,
                now,
            ));
        }
        let (from, to) = self
            .from
            .zip(self.to)
            .context("either `--last` or both `--from` and `--to` are required")?;
        ensure!(from <= to, "`--from` must not be after `--to`");
        Ok(TimeWindow::new(from, to))
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn level_override_parses_name_and_value() {
        let level: LevelOverride = "Solar Energy=42.5".parse().unwrap();
        assert_eq!(level.source_name, "Solar Energy");
        assert_eq!(level.energy, Kilowatts(42.5));
    }

    #[test]
    fn level_override_rejects_non_numeric_values() {
        assert!("Solar Energy=lots".parse::<LevelOverride>().is_err());
        assert!("no separator".parse::<LevelOverride>().is_err());
    }

    #[test]
    fn last_builds_a_window_ending_now() {
        let args = StatsArgs { last: Some("1h".parse().unwrap()), from: None, to: None };
        let window = args.window(noon()).unwrap();
        assert_eq!(window, TimeWindow::last(TimeDelta::hours(1), noon()));
    }

    #[test]
    fn explicit_bounds_must_be_ordered() {
        let args = StatsArgs {
            last: None,
            from: Some(noon()),
            to: Some(noon() - TimeDelta::hours(1)),
        };
        assert!(args.window(noon()).is_err());
    }

    #[test]
    fn timestamps_parse_with_and_without_milliseconds() {
        assert!(parse_timestamp("2025-06-01 12:00:00").is_ok());
        assert!(parse_timestamp("2025-06-01 12:00:00.123").is_ok());
        assert!(parse_timestamp("noon").is_err());
    }
}
