//! Per-year results: the engine's ledgers and the driver's projection rows.

use std::fmt;

use serde::Serialize;

use super::grid::Grid;
use super::types::{Equipment, Tariff};

/// Ledgers left behind by one simulated year.
#[derive(Debug, Clone, Serialize)]
pub struct YearOutcome {
    /// Equipment the year was simulated with.
    pub equipment: Equipment,
    /// Prices the year was billed at.
    pub tariff: Tariff,
    /// Household consumption (kWh).
    pub load_used_kwh: f64,
    /// Panel production (kWh).
    pub solar_produced_kwh: f64,
    /// Usable battery capacity (kWh).
    pub battery_max_kwh: f64,
    /// Battery charge after the last hour (kWh).
    pub battery_level_kwh: f64,
    /// Energy stored in the battery, after loss (kWh).
    pub battery_in_kwh: f64,
    /// Energy delivered by the battery (kWh).
    pub battery_out_kwh: f64,
    pub grid: Grid,
}

impl YearOutcome {
    /// Net grid cost for the year.
    pub fn cost(&self) -> f64 {
        self.grid.cost
    }
}

impl fmt::Display for YearOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- Battery {:.2} kWh / Solar {:.2} kW ---",
            self.equipment.battery_kwh, self.equipment.solar_kw
        )?;
        writeln!(f, "Load used:             {:.3} kWh", self.load_used_kwh)?;
        writeln!(f, "Panel produced:        {:.3} kWh", self.solar_produced_kwh)?;
        writeln!(
            f,
            "Battery level:         {:.3} kWh / {:.3} kWh max",
            self.battery_level_kwh, self.battery_max_kwh
        )?;
        writeln!(
            f,
            "Battery in/out:        {:.3} kWh / {:.3} kWh",
            self.battery_in_kwh, self.battery_out_kwh
        )?;
        write!(f, "{}", self.grid)
    }
}

/// One row of the multi-year projection.
///
/// Totals and the saving are cumulative from the first year up to and
/// including this one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearReport {
    /// 1-based year number.
    pub year: u32,
    /// Nameplate battery capacity simulated this year (kWh).
    pub battery_kwh: f64,
    /// Panel size simulated this year (kW).
    pub solar_kw: f64,
    pub price_day: f64,
    pub price_night: f64,
    pub price_feedin: f64,
    /// Cost with the configured equipment.
    pub annual_cost: f64,
    /// Cost of the same year with no battery and no panels.
    pub base_annual_cost: f64,
    pub total_cost: f64,
    pub base_total_cost: f64,
    /// Equipment spend to date, including capacity growth.
    pub equipment_cost: f64,
    /// `base_total_cost - total_cost - equipment_cost`.
    pub saving: f64,
}

impl fmt::Display for YearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Year {} - Total cost: {:.2} base cost {:.2} saving {:.2}",
            self.year, self.total_cost, self.base_total_cost, self.saving
        )
    }
}

/// Result of a complete multi-year run.
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    /// One row per simulated year, in order.
    pub years: Vec<YearReport>,
    /// Ledgers of the first equipped year.
    pub first_year: Option<YearOutcome>,
}

impl Projection {
    /// Cumulative saving after the last year, or zero for an empty run.
    pub fn final_saving(&self) -> f64 {
        self.years.last().map_or(0.0, |r| r.saving)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::sim::types::NightWindow;

    fn report(year: u32, saving: f64) -> YearReport {
        YearReport {
            year,
            battery_kwh: 10.0,
            solar_kw: 4.0,
            price_day: 0.30,
            price_night: 0.075,
            price_feedin: 0.04,
            annual_cost: 500.0,
            base_annual_cost: 900.0,
            total_cost: 500.0 * f64::from(year),
            base_total_cost: 900.0 * f64::from(year),
            equipment_cost: 1000.0,
            saving,
        }
    }

    #[test]
    fn year_report_line() {
        let line = report(2, -200.0).to_string();
        assert_eq!(
            line,
            "Year 2 - Total cost: 1000.00 base cost 1800.00 saving -200.00"
        );
    }

    #[test]
    fn final_saving_is_last_row() {
        let projection = Projection {
            years: vec![report(1, -600.0), report(2, -200.0)],
            first_year: None,
        };
        assert_eq!(projection.final_saving(), -200.0);

        let empty = Projection {
            years: Vec::new(),
            first_year: None,
        };
        assert_eq!(empty.final_saving(), 0.0);
    }

    #[test]
    fn outcome_display_mentions_every_ledger() {
        let tariff = Tariff {
            day: 0.30,
            night: 0.075,
            feed_in: 0.04,
        };
        let mut grid = Grid::new(tariff, NightWindow::new(1, 5));
        grid.draw(3.0, 12);
        let outcome = YearOutcome {
            equipment: Equipment {
                battery_kwh: 10.0,
                solar_kw: 4.0,
            },
            tariff,
            load_used_kwh: 3000.0,
            solar_produced_kwh: 2500.0,
            battery_max_kwh: 9.0,
            battery_level_kwh: 1.5,
            battery_in_kwh: 800.0,
            battery_out_kwh: 790.0,
            grid,
        };
        assert_relative_eq!(outcome.cost(), 0.9);
        let text = outcome.to_string();
        assert!(text.contains("Load used"));
        assert!(text.contains("Panel produced"));
        assert!(text.contains("Battery in/out"));
        assert!(text.contains("Grid cost"));
    }
}
