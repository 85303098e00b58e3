use std::path::PathBuf;

use chrono::{Local, NaiveDateTime, Timelike};

use crate::{
    log::EnergyLog,
    prelude::*,
    reading::EnergyReading,
    source::{EnergySource, SourceKind},
    window::TimeWindow,
};

/// The station: an ordered set of sources and the sole handle to the log.
pub struct PowerPlant {
    sources: Vec<EnergySource>,
    log: EnergyLog,
}

impl PowerPlant {
    /// Station with the standard Solar, Wind, and Hydro sources, in that
    /// display order.
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            sources: SourceKind::ALL.into_iter().map(EnergySource::new).collect(),
            log: EnergyLog::new(log_path),
        }
    }

    pub fn sources(&self) -> &[EnergySource] {
        &self.sources
    }

    pub fn source_mut(&mut self, name: &str) -> Option<&mut EnergySource> {
        self.sources.iter_mut().find(|source| source.source_name() == name)
    }

    /// Sample every source at «now» and append the readings to the log.
    ///
    /// The timestamp is truncated to millisecond precision so the returned
    /// readings are equal to what a later [`Self::history`] parses back.
    #[instrument(skip_all)]
    pub fn collect(&self) -> Result<Vec<EnergyReading>> {
        let timestamp = truncate_to_milliseconds(Local::now().naive_local());
        self.log.record(
            timestamp,
            self.sources.iter().map(|source| (source.source_name(), source.generate_energy())),
        )?;
        info!(%timestamp, n_sources = self.sources.len(), "collected");
        Ok(self
            .sources
            .iter()
            .map(|source| {
                EnergyReading::new(timestamp, source.source_name(), source.generate_energy())
            })
            .collect())
    }

    /// Every reading ever collected, in write order.
    pub fn history(&self) -> Result<Vec<EnergyReading>> {
        self.log.read_all()
    }

    /// The slice of history inside the inclusive window, in write order.
    pub fn filter(&self, window: TimeWindow) -> Result<Vec<EnergyReading>> {
        Ok(window.filter(&self.history()?))
    }
}

fn truncate_to_milliseconds(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_nanosecond(timestamp.nanosecond() / 1_000_000 * 1_000_000)
        .unwrap_or(timestamp)
}
