//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveTime};
use solar_battery_sim::config::SimulationConfig;
use solar_battery_sim::devices::{SunCalendar, SunModel};
use solar_battery_sim::load::{LoadProvider, LoadSeries};
use solar_battery_sim::sim::types::{DAYS_PER_YEAR, HOURS_PER_DAY, HourRecord};

/// Default configuration with a 10 kWh battery and 4 kW of panels.
pub fn equipped_config() -> SimulationConfig {
    SimulationConfig {
        battery_size: 10.0,
        solar_size: 4.0,
        equipment_cost: 6000.0,
        ..SimulationConfig::default()
    }
}

/// Sun rising at 06:30 and setting at 18:30 every day, default monthly table.
pub fn uniform_sun() -> SunModel {
    let rise = NaiveTime::from_hms_opt(6, 30, 0).unwrap();
    let set = NaiveTime::from_hms_opt(18, 30, 0).unwrap();
    SunModel::new(
        SunCalendar::uniform(rise, set),
        SimulationConfig::default().sun_hours_per_day,
    )
}

/// Evening-peaked household profile with a little winter bias.
pub fn household_load() -> LoadSeries {
    LoadSeries::from_fn(|day, hour| {
        let evening = if (17..22).contains(&hour) { 0.6 } else { 0.0 };
        let winter = if !(60..=300).contains(&day) { 0.2 } else { 0.0 };
        0.25 + evening + winter
    })
}

/// Grid cost of `load` with no equipment: every kWh bought at the rate of its hour.
pub fn no_equipment_cost(load: &LoadSeries, config: &SimulationConfig) -> f64 {
    let window = config.night_window();
    let mut cost = 0.0;
    for day in 1..=DAYS_PER_YEAR {
        for hour in 0..HOURS_PER_DAY {
            let rate = if window.is_night_rate(hour) {
                config.price_night
            } else {
                config.price_day
            };
            cost += load.get(day, hour) * rate;
        }
    }
    cost
}

/// `solar + grid == load + battery` for one record.
pub fn balance_holds(r: &HourRecord) -> bool {
    (r.solar_kwh + r.grid_kwh - r.load_kwh - r.battery_kwh).abs() < 1e-9
}

/// Writes a 365-line sunrise table and returns its path.
pub fn write_sunrise_file(dir: &Path) -> PathBuf {
    let path = dir.join("sunrise.txt");
    let text = "06:45:00 18:15:00\n".repeat(DAYS_PER_YEAR as usize);
    fs::write(&path, text).unwrap();
    path
}

/// Writes a year of hourly meter readings of `kwh` each and returns the path.
pub fn write_consumption_file(dir: &Path, kwh: f64) -> PathBuf {
    let path = dir.join("consumption.csv");
    let mut text = String::from("Consumption (kWh), Start, End\n");
    let mut t = NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    for _ in 0..(DAYS_PER_YEAR * HOURS_PER_DAY) {
        let end = t + Duration::hours(1);
        let _ = writeln!(
            text,
            "{kwh}, {}Z, {}Z",
            t.format("%Y-%m-%dT%H:%M:%S"),
            end.format("%Y-%m-%dT%H:%M:%S")
        );
        t = end;
    }
    fs::write(&path, text).unwrap();
    path
}
