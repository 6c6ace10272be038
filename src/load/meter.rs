//! Reader for smart-meter consumption exports.
//!
//! Expected rows: `Consumption (kWh), Start, End`, e.g.
//! `0.123, 2021-03-01T00:00:00+00:00, 2021-03-01T00:30:00+00:00`.
//! Header rows are recognised by a first field starting with `Consumption`
//! and may appear anywhere (concatenated exports).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use tracing::{debug, info};

use super::{LoadSeries, LoadSeriesBuilder};
use crate::error::SimError;
use crate::sim::types::DAYS_PER_YEAR;

/// Reads and validates a consumption CSV into a complete [`LoadSeries`].
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, a parse error for a
/// malformed row, and [`SimError::DataIncomplete`] if any hour of days 1-365
/// has no reading.
pub fn read_consumption_csv(path: &Path) -> Result<LoadSeries, SimError> {
    let file = File::open(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_consumption_from(file, path)
}

/// Same as [`read_consumption_csv`] but from any reader; `path` labels errors.
///
/// Readings are keyed by the wall-clock day of year and hour of their start
/// time. When several readings land in one slot:
/// - a reading for the same slot as the row before it is added (half-hourly
///   readings make up the hour)
/// - a reading for a slot filled earlier by a non-adjacent row replaces it,
///   so with multi-year exports the later year wins
///
/// # Errors
///
/// See [`read_consumption_csv`].
pub fn read_consumption_from(reader: impl Read, path: &Path) -> Result<LoadSeries, SimError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut builder = LoadSeriesBuilder::new();
    let mut last_slot = None;
    let mut rows = 0_usize;
    let mut replaced = 0_usize;
    let mut skipped = 0_usize;

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let parse_error = |message: String| SimError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };

        let Some(first) = record.get(0) else {
            continue;
        };
        if first.is_empty() || first.starts_with("Consumption") {
            continue;
        }

        let kwh: f64 = first
            .parse()
            .map_err(|e| parse_error(format!("bad consumption \"{first}\": {e}")))?;
        let start = record
            .get(1)
            .ok_or_else(|| parse_error("missing start timestamp".to_string()))?;
        let start = parse_start(start)
            .ok_or_else(|| parse_error(format!("bad start timestamp \"{start}\"")))?;

        rows += 1;
        let day = start.ordinal();
        let hour = start.hour();
        if day > DAYS_PER_YEAR {
            skipped += 1;
            last_slot = None;
            continue;
        }

        let slot = (day, hour);
        match builder.get(day, hour) {
            None => builder.set(day, hour, kwh),
            Some(_) if last_slot == Some(slot) => builder.add(day, hour, kwh),
            Some(_) => {
                replaced += 1;
                builder.set(day, hour, kwh);
            }
        }
        last_slot = Some(slot);
    }

    debug!(rows, replaced, skipped, filled = builder.filled(), "consumption rows merged");
    let series = builder.build()?;
    info!(
        path = %path.display(),
        annual_kwh = series.annual_total(),
        "consumption data loaded"
    );
    Ok(series)
}

/// Wall-clock start time; the UTC offset is ignored, not applied.
fn parse_start(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
