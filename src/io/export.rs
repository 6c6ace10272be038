//! CSV and JSON export for the yearly projection.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::SimError;
use crate::sim::report::{Projection, YearReport};

/// Column header for the projection CSV.
const HEADER: &str = "year,battery_kwh,solar_kw,price_day,price_night,price_feedin,\
                      annual_cost,base_annual_cost,total_cost,base_total_cost,\
                      equipment_cost,saving";

/// Exports yearly rows to a CSV file at the given path.
///
/// Writes a header row followed by one data row per year. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `reports` - Projection rows, first year first
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created, or a CSV error if
/// writing fails.
pub fn export_csv(reports: &[YearReport], path: &Path) -> Result<(), SimError> {
    let file = File::create(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(reports, io::BufWriter::new(file))
}

/// Writes yearly rows as CSV to any writer.
///
/// # Errors
///
/// Returns a CSV error if writing fails.
pub fn write_csv(reports: &[YearReport], writer: impl Write) -> Result<(), SimError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in reports {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.4}", r.battery_kwh),
            format!("{:.4}", r.solar_kw),
            format!("{:.6}", r.price_day),
            format!("{:.6}", r.price_night),
            format!("{:.6}", r.price_feedin),
            format!("{:.2}", r.annual_cost),
            format!("{:.2}", r.base_annual_cost),
            format!("{:.2}", r.total_cost),
            format!("{:.2}", r.base_total_cost),
            format!("{:.2}", r.equipment_cost),
            format!("{:.2}", r.saving),
        ])?;
    }

    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Exports the whole projection, including the first year's ledgers, as
/// pretty-printed JSON.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn export_json(projection: &Projection, path: &Path) -> Result<(), SimError> {
    let io_error = |source: io::Error| SimError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, projection).map_err(|e| io_error(e.into()))?;
    writer.flush().map_err(io_error)
}
