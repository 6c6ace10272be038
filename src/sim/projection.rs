//! Multi-year cost projection: baseline versus equipped runs, year by year.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::devices::SunModel;
use crate::error::SimError;
use crate::io::diagnostics::DiagnosticSink;
use crate::load::LoadProvider;

use super::engine::Engine;
use super::report::{Projection, YearReport};
use super::types::{Equipment, Tariff};

/// Parameters the driver carries from one year to the next.
///
/// Starts from the configuration and is adjusted after every year; the
/// configuration itself is never modified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearParameters {
    pub equipment: Equipment,
    pub tariff: Tariff,
    /// Equipment spend to date.
    pub equipment_cost: f64,
}

impl YearParameters {
    /// First-year parameters from `config`.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            equipment: config.equipment(),
            tariff: config.tariff(),
            equipment_cost: config.equipment_cost,
        }
    }

    /// Parameters for the following year.
    ///
    /// Battery capacity degrades by `ANNUAL_BATTERY_LOSS`, then grows by
    /// `BATTERY_GROWTH` if that stays within `BATTERY_GROWTH_MAX`. Day and
    /// night prices rise by `INFLATION`; the feed-in price is fixed.
    pub fn advance(&self, config: &SimulationConfig) -> Self {
        let mut next = *self;
        next.equipment.battery_kwh *= config.annual_battery_loss;
        next.tariff = self.tariff.inflated(config.inflation);

        if config.battery_growth_enabled()
            && next.equipment.battery_kwh + config.battery_growth <= config.battery_growth_max
        {
            next.equipment.battery_kwh += config.battery_growth;
            next.equipment_cost += config.battery_growth_cost;
            debug!(
                battery_kwh = next.equipment.battery_kwh,
                equipment_cost = next.equipment_cost,
                "battery capacity grown"
            );
        }
        next
    }
}

/// Runs `config.years` years, each as a no-equipment baseline followed by
/// the equipped scenario.
///
/// `diagnostics` receives the per-hour records of the first equipped year
/// only.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfig`] listing every violated constraint;
/// nothing is simulated in that case.
pub fn run_projection(
    config: &SimulationConfig,
    sun: &SunModel,
    load: &mut dyn LoadProvider,
    mut diagnostics: Option<&mut dyn DiagnosticSink>,
) -> Result<Projection, SimError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(SimError::InvalidConfig(errors));
    }
    if config.night_window().is_empty() {
        warn!(
            night_start = config.night_start,
            night_end = config.night_end,
            "night window is empty; every hour is billed at the day rate"
        );
    }

    let mut params = YearParameters::from_config(config);
    let mut years = Vec::with_capacity(config.years as usize);
    let mut first_year = None;
    let mut total_cost = 0.0;
    let mut base_total_cost = 0.0;

    for index in 0..config.years {
        let base = Engine::new(config, sun, Equipment::NONE, params.tariff).run_year(load, None);

        let sink = if index == 0 { diagnostics.take() } else { None };
        let outcome =
            Engine::new(config, sun, params.equipment, params.tariff).run_year(load, sink);

        total_cost += outcome.cost();
        base_total_cost += base.cost();

        let report = YearReport {
            year: index + 1,
            battery_kwh: params.equipment.battery_kwh,
            solar_kw: params.equipment.solar_kw,
            price_day: params.tariff.day,
            price_night: params.tariff.night,
            price_feedin: params.tariff.feed_in,
            annual_cost: outcome.cost(),
            base_annual_cost: base.cost(),
            total_cost,
            base_total_cost,
            equipment_cost: params.equipment_cost,
            saving: base_total_cost - total_cost - params.equipment_cost,
        };
        info!(
            year = report.year,
            annual_cost = report.annual_cost,
            base_annual_cost = report.base_annual_cost,
            saving = report.saving,
            "year simulated"
        );
        years.push(report);

        if index == 0 {
            first_year = Some(outcome);
        }
        params = params.advance(config);
    }

    Ok(Projection { years, first_year })
}
