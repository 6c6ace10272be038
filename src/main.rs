//! Simulator entry point: CLI wiring, data loading and report output.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solar_battery_sim::cli::Args;
use solar_battery_sim::config::{LoadSource, SimulationConfig};
use solar_battery_sim::devices::{SunCalendar, SunModel};
use solar_battery_sim::error::SimError;
use solar_battery_sim::io::diagnostics::{CsvDiagnosticLog, DiagnosticSink};
use solar_battery_sim::io::export::{export_csv, export_json};
use solar_battery_sim::load::{LoadSeries, SyntheticLoad, read_consumption_csv};
use solar_battery_sim::sim::run_projection;

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_toml_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    args.apply_overrides(&mut config);

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(SimError::InvalidConfig(errors).into());
    }
    Ok(config)
}

fn load_series(config: &SimulationConfig) -> Result<LoadSeries> {
    let series = match config.load_source {
        LoadSource::File => read_consumption_csv(&config.consumption)
            .with_context(|| format!("reading consumption {}", config.consumption.display()))?,
        LoadSource::Synthetic => {
            info!(seed = config.seed, "generating synthetic load profile");
            SyntheticLoad::from_config(config).series()
        }
    };
    Ok(series)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let calendar = SunCalendar::from_file(&config.sunrise)
        .with_context(|| format!("reading sunrise table {}", config.sunrise.display()))?;
    let sun = SunModel::new(calendar, config.sun_hours_per_day);
    let mut load = load_series(&config)?;

    info!(
        battery_kwh = config.battery_size,
        solar_kw = config.solar_size,
        years = config.years,
        "starting projection"
    );

    let mut log = args
        .diagnostics_dir
        .as_deref()
        .map(|dir| CsvDiagnosticLog::create(dir, config.equipment()))
        .transpose()
        .context("opening diagnostic log")?;
    let sink = log.as_mut().map(|log| log as &mut dyn DiagnosticSink);
    let projection = run_projection(&config, &sun, &mut load, sink)?;

    if let Some(log) = log {
        let path = log.path().to_path_buf();
        let rows = log.finish().context("writing diagnostic log")?;
        info!(path = %path.display(), rows, "diagnostic log written");
    }

    if let Some(first) = projection.first_year.as_ref().filter(|_| !args.quiet) {
        println!("{first}\n");
    }
    for year in &projection.years {
        println!("{year}");
    }

    if let Some(path) = &args.report_csv {
        export_csv(&projection.years, path).context("exporting CSV report")?;
        info!(path = %path.display(), "CSV report written");
    }
    if let Some(path) = &args.report_json {
        export_json(&projection, path).context("exporting JSON report")?;
        info!(path = %path.display(), "JSON report written");
    }

    Ok(())
}
