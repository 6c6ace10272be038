//! Core simulation types: tariffs, the night window, and per-hour records.

use std::fmt;

use serde::Serialize;

/// Number of simulated days per year.
pub const DAYS_PER_YEAR: u32 = 365;

/// Number of simulated hours per day.
pub const HOURS_PER_DAY: u32 = 24;

/// Off-peak hour window.
///
/// Billing and night charging deliberately use different end bounds:
/// `NIGHT_END` itself is billed at the day rate but is still eligible for
/// grid charging.
///
/// # Examples
///
/// ```
/// use solar_battery_sim::sim::types::NightWindow;
///
/// let window = NightWindow::new(1, 5);
/// assert!(window.is_night_rate(4));
/// assert!(!window.is_night_rate(5));
/// assert!(window.is_charging_hour(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NightWindow {
    /// First off-peak hour (inclusive).
    pub start: u32,
    /// Window end hour.
    pub end: u32,
}

impl NightWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns `true` when `start > end`; such a window matches no hour.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Returns `true` when `hour` is billed at the night rate (`start <= hour < end`).
    pub fn is_night_rate(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Returns `true` when `hour` may be used for grid charging (`start <= hour <= end`).
    pub fn is_charging_hour(&self, hour: u32) -> bool {
        hour >= self.start && hour <= self.end
    }
}

/// Unit prices for one simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tariff {
    /// Import price outside the night window.
    pub day: f64,
    /// Import price inside the night window.
    pub night: f64,
    /// Credit per exported kWh.
    pub feed_in: f64,
}

impl Tariff {
    /// Returns a copy with day and night import prices multiplied by `factor`.
    ///
    /// The feed-in credit is left unchanged.
    pub fn inflated(&self, factor: f64) -> Self {
        Self {
            day: self.day * factor,
            night: self.night * factor,
            feed_in: self.feed_in,
        }
    }
}

/// Installed equipment sizes for one simulated year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equipment {
    /// Nameplate battery capacity (kWh).
    pub battery_kwh: f64,
    /// Panel nameplate size (kW).
    pub solar_kw: f64,
}

impl Equipment {
    /// No battery and no panels.
    pub const NONE: Self = Self {
        battery_kwh: 0.0,
        solar_kw: 0.0,
    };
}

/// Which dispatch branch handled an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DispatchMode {
    /// Solar exceeded load; surplus charged the battery, remainder exported.
    Spare,
    /// Off-peak hour; load and battery top-up bought from the grid.
    Night,
    /// Shortfall met by the battery first, then the grid.
    Day,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spare => "Spare",
            Self::Night => "Night",
            Self::Day => "Day",
        })
    }
}

/// Complete record of one simulated hour.
///
/// Energy balance holds for every record:
/// `solar_kwh + grid_kwh == load_kwh + battery_kwh`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRecord {
    pub mode: DispatchMode,
    /// Day of year (1-365).
    pub day: u32,
    /// Hour of day (0-23).
    pub hour: u32,
    /// Household consumption (kWh).
    pub load_kwh: f64,
    /// Panel production (kWh).
    pub solar_kwh: f64,
    /// Energy sent into the battery before charging loss (kWh; negative = discharge).
    pub battery_kwh: f64,
    /// Net grid exchange (kWh; positive = import, negative = export).
    pub grid_kwh: f64,
    /// Battery charge after this hour (kWh).
    pub battery_level_kwh: f64,
}

impl fmt::Display for HourRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<5} d={:>3} h={:>2} | load={:.3}  solar={:.3}  bat={:>7.3}  grid={:>7.3} (level={:.3})",
            self.mode,
            self.day,
            self.hour,
            self.load_kwh,
            self.solar_kwh,
            self.battery_kwh,
            self.grid_kwh,
            self.battery_level_kwh,
        )
    }
}
