//! Per-hour diagnostic log.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::SimError;
use crate::sim::types::{Equipment, HourRecord};

/// Column header of the per-hour log.
const HEADER: &str = "mode,day,hour,load,solar_produce,charge_battery,draw_grid,battery_level";

/// Receiver for per-hour records emitted by the engine.
///
/// Called once per simulated hour, after that hour's battery and grid
/// updates. Implementations must not fail the run; a sink that can fail
/// keeps the error and reports it when it is finished.
pub trait DiagnosticSink {
    fn record(&mut self, record: &HourRecord);
}

impl DiagnosticSink for Vec<HourRecord> {
    fn record(&mut self, record: &HourRecord) {
        self.push(record.clone());
    }
}

/// Log file name for an equipment set, e.g. `data_bat10.000000_sol4.000000.csv`.
pub fn log_file_name(equipment: Equipment) -> String {
    format!(
        "data_bat{:.6}_sol{:.6}.csv",
        equipment.battery_kwh, equipment.solar_kw
    )
}

/// CSV diagnostic log with one row per simulated hour.
///
/// The first write error is kept and every later record is dropped, so the
/// hourly loop never sees a failure. [`CsvDiagnosticLog::finish`] flushes the
/// writer and surfaces the kept error.
pub struct CsvDiagnosticLog<W: Write> {
    writer: csv::Writer<W>,
    path: PathBuf,
    rows: usize,
    error: Option<csv::Error>,
}

impl CsvDiagnosticLog<File> {
    /// Creates `dir/data_bat{battery}_sol{solar}.csv` for `equipment`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub fn create(dir: &Path, equipment: Equipment) -> Result<Self, SimError> {
        let path = dir.join(log_file_name(equipment));
        let file = File::create(&path).map_err(|source| SimError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "diagnostic log opened");
        Ok(Self::new(file, path))
    }
}

impl<W: Write> CsvDiagnosticLog<W> {
    /// Wraps any writer; `path` labels errors and log messages.
    pub fn new(writer: W, path: PathBuf) -> Self {
        let mut log = Self {
            writer: csv::WriterBuilder::new().from_writer(writer),
            path,
            rows: 0,
            error: None,
        };
        if let Err(e) = log.writer.write_record(HEADER.split(',')) {
            log.error = Some(e);
        }
        log
    }

    /// Where the log is written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes the log and returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns the first write error encountered, or the flush error.
    pub fn finish(mut self) -> Result<usize, SimError> {
        if let Some(e) = self.error.take() {
            warn!(path = %self.path.display(), rows = self.rows, "diagnostic log incomplete");
            return Err(e.into());
        }
        self.writer.flush().map_err(|source| SimError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), rows = self.rows, "diagnostic log closed");
        Ok(self.rows)
    }
}

impl<W: Write> DiagnosticSink for CsvDiagnosticLog<W> {
    fn record(&mut self, record: &HourRecord) {
        if self.error.is_some() {
            return;
        }
        let row = [
            record.mode.to_string(),
            record.day.to_string(),
            record.hour.to_string(),
            format!("{:.6}", record.load_kwh),
            format!("{:.6}", record.solar_kwh),
            format!("{:.6}", record.battery_kwh),
            format!("{:.6}", record.grid_kwh),
            format!("{:.6}", record.battery_level_kwh),
        ];
        match self.writer.write_record(&row) {
            Ok(()) => self.rows += 1,
            Err(e) => self.error = Some(e),
        }
    }
}
