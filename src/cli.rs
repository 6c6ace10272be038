use std::path::PathBuf;

use clap::Parser;

use crate::config::SimulationConfig;

/// Hourly solar, battery and grid cost simulator.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// TOML configuration file; built-in defaults are used when omitted.
    pub config: Option<PathBuf>,

    /// Number of years to project, overriding `YEARS`.
    #[clap(long)]
    pub years: Option<u32>,

    /// Seed for the synthetic load profile, overriding `SEED`.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Write the first equipped year's per-hour log into this directory.
    #[clap(long = "diagnostics-dir")]
    pub diagnostics_dir: Option<PathBuf>,

    /// Export the yearly projection as CSV.
    #[clap(long = "report-csv")]
    pub report_csv: Option<PathBuf>,

    /// Export the projection and first-year ledgers as JSON.
    #[clap(long = "report-json")]
    pub report_json: Option<PathBuf>,

    /// Only print the yearly lines, not the first-year ledger summary.
    #[clap(long, short)]
    pub quiet: bool,
}

impl Args {
    /// Applies command-line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut SimulationConfig) {
        if let Some(years) = self.years {
            config.years = years;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_optional() {
        let args = Args::try_parse_from(["solar-battery-sim"]).unwrap();
        assert!(args.config.is_none());
        assert!(!args.quiet);
    }

    #[test]
    fn parses_every_option() {
        let args = Args::try_parse_from([
            "solar-battery-sim",
            "house.toml",
            "--years",
            "3",
            "--seed",
            "9",
            "--diagnostics-dir",
            "out",
            "--report-csv",
            "years.csv",
            "--report-json",
            "years.json",
            "-q",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("house.toml")));
        assert_eq!(args.years, Some(3));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.diagnostics_dir, Some(PathBuf::from("out")));
        assert_eq!(args.report_csv, Some(PathBuf::from("years.csv")));
        assert_eq!(args.report_json, Some(PathBuf::from("years.json")));
        assert!(args.quiet);
    }

    #[test]
    fn rejects_bad_years() {
        assert!(Args::try_parse_from(["solar-battery-sim", "--years", "many"]).is_err());
    }

    #[test]
    fn overrides_replace_config_values() {
        let args =
            Args::try_parse_from(["solar-battery-sim", "--years", "2", "--seed", "5"]).unwrap();
        let mut config = SimulationConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.years, 2);
        assert_eq!(config.seed, 5);

        let args = Args::try_parse_from(["solar-battery-sim"]).unwrap();
        let mut config = SimulationConfig::default();
        args.apply_overrides(&mut config);
        assert_eq!(config, SimulationConfig::default());
    }
}
