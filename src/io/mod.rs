/// Per-hour diagnostic sink and its CSV log.
pub mod diagnostics;
/// Projection export to CSV and JSON.
pub mod export;
