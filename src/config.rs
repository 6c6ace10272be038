//! TOML-based run configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::types::{Equipment, NightWindow, Tariff};

/// Average daily sun-hours for January through December.
pub const DEFAULT_SUN_HOURS_PER_DAY: [f64; 12] =
    [1.8, 2.7, 5.2, 7.8, 9.7, 6.2, 5.6, 5.2, 5.4, 2.2, 2.1, 1.6];

/// Where the hourly consumption series comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSource {
    /// Smart-meter CSV export named by `CONSUMPTION`.
    File,
    /// Seeded synthetic household profile.
    Synthetic,
}

/// Flat set of named run parameters.
///
/// Keys use the SCREAMING_SNAKE_CASE names of the classic YAML configs
/// (`BATTERY_SIZE`, `PRICE_DAY`, ...). Every key is optional and falls back to
/// the value in [`SimulationConfig::default`]; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SimulationConfig {
    /// First hour of the off-peak window. A start after `NIGHT_END` is
    /// accepted but leaves the window empty.
    pub night_start: u32,
    /// Last hour of the off-peak window (exclusive for billing, inclusive for charging).
    pub night_end: u32,
    /// Nameplate battery capacity (kWh).
    pub battery_size: f64,
    /// Charging efficiency (0.0-1.0].
    pub battery_loss: f64,
    /// Usable depth-of-discharge fraction.
    pub battery_dod: f64,
    /// Maximum energy drawn from the battery per hour (kWh).
    pub battery_peak_draw: f64,
    /// Maximum grid energy pushed into the battery per night hour (kWh).
    pub battery_max_charge_rate: f64,
    /// Whether the battery is topped up from the grid during the night window.
    pub night_charge: bool,
    /// Capacity added at the end of each year (kWh).
    pub battery_growth: f64,
    /// Cost of each capacity addition.
    pub battery_growth_cost: f64,
    /// Capacity ceiling for growth (kWh).
    pub battery_growth_max: f64,
    /// Panel nameplate size (kW).
    pub solar_size: f64,
    /// Site yield multiplier.
    pub solar_yield: f64,
    /// System derate applied on top of `solar_yield`.
    pub panel_derate: f64,
    /// Monthly average sun-hours per day, January first.
    pub sun_hours_per_day: [f64; 12],
    pub price_day: f64,
    pub price_night: f64,
    pub price_feedin: f64,
    /// Adapt the nightly charge target from the previous night's residual charge.
    pub dynamic_charge: bool,
    /// Capacity retained after each year (multiplier).
    pub annual_battery_loss: f64,
    /// Yearly day/night tariff multiplier.
    pub inflation: f64,
    /// One-time equipment cost subtracted from the savings.
    pub equipment_cost: f64,
    /// Number of years to project.
    pub years: u32,
    pub load_source: LoadSource,
    /// Consumption CSV path, used when `load_source = "file"`.
    pub consumption: PathBuf,
    /// Sunrise/sunset table path.
    pub sunrise: PathBuf,
    /// Mean hourly consumption of the synthetic profile (kWh).
    pub synthetic_base_kwh: f64,
    /// Daily sinusoid amplitude of the synthetic profile (kWh).
    pub synthetic_amp_kwh: f64,
    /// Daily sinusoid phase (radians).
    pub synthetic_phase_rad: f64,
    /// Extra winter consumption at the turn of the year (kWh).
    pub synthetic_seasonal_kwh: f64,
    /// Gaussian noise standard deviation (kWh).
    pub synthetic_noise_std: f64,
    /// Seed for the synthetic profile.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            night_start: 1,
            night_end: 5,
            battery_size: 0.0,
            battery_loss: 0.96,
            battery_dod: 0.90,
            battery_peak_draw: 3.0,
            battery_max_charge_rate: 3.0,
            night_charge: true,
            battery_growth: 0.0,
            battery_growth_cost: 0.0,
            battery_growth_max: 0.0,
            solar_size: 0.0,
            solar_yield: 1.0,
            panel_derate: 0.627,
            sun_hours_per_day: DEFAULT_SUN_HOURS_PER_DAY,
            price_day: 0.30,
            price_night: 0.075,
            price_feedin: 0.04,
            dynamic_charge: false,
            annual_battery_loss: 0.984,
            inflation: 1.03,
            equipment_cost: 0.0,
            years: 15,
            load_source: LoadSource::File,
            consumption: PathBuf::from("consumption.csv"),
            sunrise: PathBuf::from("sunrise.txt"),
            synthetic_base_kwh: 0.35,
            synthetic_amp_kwh: 0.2,
            synthetic_phase_rad: 4.0,
            synthetic_seasonal_kwh: 0.15,
            synthetic_noise_std: 0.05,
            seed: 42,
        }
    }
}

/// Configuration error with the offending key and the violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Parameter name (e.g., `"BATTERY_LOSS"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SimulationConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// Relative `CONSUMPTION` and `SUNRISE` paths are taken relative to the
    /// directory holding the file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            config.consumption = dir.join(&config.consumption);
            config.sunrise = dir.join(&config.sunrise);
        }
        Ok(config)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for unknown keys or values of the wrong kind.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.night_start >= 24 {
            errors.push(ConfigError::new("NIGHT_START", "must be in [0, 24)"));
        }
        if self.night_end >= 24 {
            errors.push(ConfigError::new("NIGHT_END", "must be in [0, 24)"));
        }

        let non_negative = [
            ("BATTERY_SIZE", self.battery_size),
            ("BATTERY_PEAK_DRAW", self.battery_peak_draw),
            ("BATTERY_MAX_CHARGE_RATE", self.battery_max_charge_rate),
            ("BATTERY_GROWTH", self.battery_growth),
            ("BATTERY_GROWTH_COST", self.battery_growth_cost),
            ("BATTERY_GROWTH_MAX", self.battery_growth_max),
            ("SOLAR_SIZE", self.solar_size),
            ("SOLAR_YIELD", self.solar_yield),
            ("PANEL_DERATE", self.panel_derate),
            ("PRICE_DAY", self.price_day),
            ("PRICE_NIGHT", self.price_night),
            ("PRICE_FEEDIN", self.price_feedin),
            ("EQUIPMENT_COST", self.equipment_cost),
            ("SYNTHETIC_BASE_KWH", self.synthetic_base_kwh),
            ("SYNTHETIC_NOISE_STD", self.synthetic_noise_std),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                errors.push(ConfigError::new(field, "must be >= 0"));
            }
        }

        if !(self.battery_loss > 0.0 && self.battery_loss <= 1.0) {
            errors.push(ConfigError::new("BATTERY_LOSS", "must be in (0.0, 1.0]"));
        }
        if !(0.0..=1.0).contains(&self.battery_dod) {
            errors.push(ConfigError::new("BATTERY_DOD", "must be in [0.0, 1.0]"));
        }
        if !(self.annual_battery_loss > 0.0) {
            errors.push(ConfigError::new("ANNUAL_BATTERY_LOSS", "must be > 0"));
        }
        if !(self.inflation > 0.0) {
            errors.push(ConfigError::new("INFLATION", "must be > 0"));
        }
        if self.years == 0 {
            errors.push(ConfigError::new("YEARS", "must be > 0"));
        }
        if let Some(month) = self.sun_hours_per_day.iter().position(|h| !(*h >= 0.0)) {
            errors.push(ConfigError::new(
                "SUN_HOURS_PER_DAY",
                format!("entry {} must be >= 0", month + 1),
            ));
        }

        errors
    }

    /// Off-peak window bounds.
    pub fn night_window(&self) -> NightWindow {
        NightWindow::new(self.night_start, self.night_end)
    }

    /// First-year unit prices.
    pub fn tariff(&self) -> Tariff {
        Tariff {
            day: self.price_day,
            night: self.price_night,
            feed_in: self.price_feedin,
        }
    }

    /// Installed equipment as configured.
    pub fn equipment(&self) -> Equipment {
        Equipment {
            battery_kwh: self.battery_size,
            solar_kw: self.solar_size,
        }
    }

    /// Effective panel efficiency: yield multiplier times system derate.
    pub fn panel_efficiency(&self) -> f64 {
        self.panel_derate * self.solar_yield
    }

    /// Whether end-of-year capacity growth is configured at all.
    pub fn battery_growth_enabled(&self) -> bool {
        self.battery_growth > 0.0
    }
}
