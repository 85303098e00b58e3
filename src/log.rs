use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, ErrorKind, Write},
    path::PathBuf,
};

use chrono::NaiveDateTime;

use crate::{prelude::*, quantity::Kilowatts, reading::EnergyReading};

/// Append-only flat store of energy readings, one line per reading.
///
/// The file is opened per call and closed again: no handle survives between
/// operations, and existing content is never truncated.
pub struct EnergyLog {
    path: PathBuf,
}

impl EnergyLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one line per reading, all sharing the given timestamp.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn record<'a>(
        &self,
        timestamp: NaiveDateTime,
        readings: impl IntoIterator<Item = (&'a str, Kilowatts)>,
    ) -> Result {
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("failed to open `{}` for append", self.path.display()))?;
        for (source_name, energy) in readings {
            let reading = EnergyReading::new(timestamp, source_name, energy);
            writeln!(file, "{reading}")
                .with_context(|| format!("failed to append to `{}`", self.path.display()))?;
            debug!(%reading, "recorded");
        }
        Ok(())
    }

    /// Read every reading back in write order.
    ///
    /// A missing file means no data has been collected yet and yields an
    /// empty vector. A malformed line fails the whole read, naming the
    /// 1-based line number: returning the readings before it would silently
    /// drop the rest of the log.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn read_all(&self) -> Result<Vec<EnergyReading>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to open `{}`", self.path.display()));
            }
        };
        BufReader::new(file)
            .lines()
            .enumerate()
            .map(|(index, line)| {
                let line = line
                    .with_context(|| format!("failed to read `{}`", self.path.display()))?;
                line.parse().with_context(|| {
                    format!("malformed reading on line {} of `{}`", index + 1, self.path.display())
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_milli_opt(8, 0, 0, 250)
            .unwrap()
    }

    #[test]
    fn missing_file_reads_back_empty() {
        let directory = tempfile::tempdir().unwrap();
        let log = EnergyLog::new(directory.path().join("energy.log"));
        assert_eq!(log.read_all().unwrap(), Vec::new());
    }

    #[test]
    fn readings_come_back_in_write_order() {
        let directory = tempfile::tempdir().unwrap();
        let log = EnergyLog::new(directory.path().join("energy.log"));

        log.record(
            timestamp(),
            [
                ("Solar Energy", Kilowatts(100.0)),
                ("Wind Energy", Kilowatts(200.0)),
                ("Hydro Energy", Kilowatts(300.0)),
            ],
        )
        .unwrap();
        log.record(timestamp() + chrono::TimeDelta::minutes(5), [("Solar Energy", Kilowatts(42.5))])
            .unwrap();

        let readings = log.read_all().unwrap();
        assert_eq!(readings.len(), 4);
        assert_eq!(
            readings.iter().map(|reading| reading.source_name.as_str()).collect::<Vec<_>>(),
            ["Solar Energy", "Wind Energy", "Hydro Energy", "Solar Energy"],
        );
        assert_eq!(readings[3].energy, Kilowatts(42.5));
    }

    #[test]
    fn record_appends_and_never_truncates() {
        let directory = tempfile::tempdir().unwrap();
        let log = EnergyLog::new(directory.path().join("energy.log"));

        log.record(timestamp(), [("Solar Energy", Kilowatts(1.0))]).unwrap();
        log.record(timestamp(), [("Solar Energy", Kilowatts(2.0))]).unwrap();

        let readings = log.read_all().unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].energy, Kilowatts(1.0));
        assert_eq!(readings[1].energy, Kilowatts(2.0));
    }

    #[test]
    fn round_trip_is_bit_exact() {
        let directory = tempfile::tempdir().unwrap();
        let log = EnergyLog::new(directory.path().join("energy.log"));

        log.record(timestamp(), [("Wind Energy", Kilowatts(123.456_789))]).unwrap();

        let readings = log.read_all().unwrap();
        assert_eq!(
            readings,
            [EnergyReading::new(timestamp(), "Wind Energy", Kilowatts(123.456_789))],
        );
    }

    #[test]
    fn malformed_line_fails_the_read_with_its_number() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("energy.log");
        let log = EnergyLog::new(&path);

        log.record(timestamp(), [("Solar Energy", Kilowatts(100.0))]).unwrap();
        std::fs::write(
            &path,
            std::fs::read_to_string(&path).unwrap() + "this is not a reading\n",
        )
        .unwrap();

        let error = log.read_all().unwrap_err();
        assert!(error.to_string().contains("line 2"), "unexpected error: {error:#}");
    }
}
