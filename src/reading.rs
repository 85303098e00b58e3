use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use chrono::NaiveDateTime;

use crate::quantity::Kilowatts;

/// Timestamp pattern used in the log, millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// One persisted record: `2025-06-01 12:34:56.789, Solar Energy: 100 kW`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyReading {
    pub timestamp: NaiveDateTime,
    pub source_name: String,
    pub energy: Kilowatts,
}

impl EnergyReading {
    pub fn new(timestamp: NaiveDateTime, source_name: impl Into<String>, energy: Kilowatts) -> Self {
        Self { timestamp, source_name: source_name.into(), energy }
    }
}

impl Display for EnergyReading {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.source_name,
            self.energy,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseReadingError {
    #[error("missing `, ` separator after the timestamp")]
    MissingTimestampSeparator,

    #[error("missing `: ` separator after the source name")]
    MissingSourceSeparator,

    #[error("missing ` kW` unit suffix")]
    MissingUnitSuffix,

    #[error("malformed timestamp")]
    Timestamp(#[from] chrono::ParseError),

    #[error("malformed energy value")]
    Energy(#[from] std::num::ParseFloatError),
}

impl FromStr for EnergyReading {
    type Err = ParseReadingError;

    /// Parse a log line with the explicit grammar: timestamp up to the first
    /// `, `, source name up to the first `: `, then a number with a ` kW`
    /// suffix. Any mismatch names the part that failed.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (timestamp, rest) =
            line.split_once(", ").ok_or(ParseReadingError::MissingTimestampSeparator)?;
        let (source_name, value) =
            rest.split_once(": ").ok_or(ParseReadingError::MissingSourceSeparator)?;
        let value = value.strip_suffix(" kW").ok_or(ParseReadingError::MissingUnitSuffix)?;
        Ok(Self {
            timestamp: NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)?,
            source_name: source_name.to_owned(),
            energy: value.parse()?,
        })
    }
}
