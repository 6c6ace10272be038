//! Hourly dispatch engine for one simulated year.

use crate::config::SimulationConfig;
use crate::devices::{Battery, Panel, SunModel};
use crate::io::diagnostics::DiagnosticSink;
use crate::load::LoadProvider;

use super::clock::Clock;
use super::grid::Grid;
use super::report::YearOutcome;
use super::types::{DispatchMode, Equipment, HourRecord, NightWindow, Tariff};

/// Simulation engine owning the battery, panels and grid ledger for one year.
///
/// Every engine is built fresh for a single pass and discarded afterwards;
/// configuration and sun data are borrowed read-only.
pub struct Engine<'a> {
    config: &'a SimulationConfig,
    sun: &'a SunModel,
    equipment: Equipment,
    window: NightWindow,
    battery: Battery,
    panel: Panel,
    grid: Grid,
}

impl<'a> Engine<'a> {
    /// Creates an engine for one pass.
    ///
    /// # Arguments
    ///
    /// * `config` - Battery, panel and night-window parameters
    /// * `sun` - Hourly sunshine model
    /// * `equipment` - Battery capacity and panel size for this pass
    /// * `tariff` - Prices for this pass
    ///
    /// # Panics
    ///
    /// Panics if `config` holds battery parameters that
    /// [`SimulationConfig::validate`] would reject.
    pub fn new(
        config: &'a SimulationConfig,
        sun: &'a SunModel,
        equipment: Equipment,
        tariff: Tariff,
    ) -> Self {
        let window = config.night_window();
        Self {
            config,
            sun,
            equipment,
            window,
            battery: Battery::new(
                equipment.battery_kwh,
                config.battery_loss,
                config.battery_dod,
                config.battery_peak_draw,
                config.dynamic_charge,
            ),
            panel: Panel::new(equipment.solar_kw, config.panel_efficiency()),
            grid: Grid::new(tariff, window),
        }
    }

    /// Settles one hour given its solar production and household load.
    ///
    /// - Surplus solar charges the battery; what does not fit is exported
    /// - A shortfall in a charging hour with night charging on buys the load
    ///   plus the battery top-up from the grid
    /// - Any other shortfall is met by the battery first, then the grid,
    ///   except that the battery is not discharged inside the charging window
    pub fn dispatch(&mut self, day: u32, hour: u32, solar_kwh: f64, load_kwh: f64) -> HourRecord {
        self.battery.tick_hour(hour);

        let spare = solar_kwh - load_kwh;
        let (mode, battery_kwh, grid_kwh) = if spare > 0.0 {
            let leftover = self.battery.charge(spare);
            if leftover > 0.0 {
                self.grid.draw(-leftover, hour);
                (DispatchMode::Spare, spare - leftover, -leftover)
            } else {
                (DispatchMode::Spare, spare, 0.0)
            }
        } else if self.window.is_charging_hour(hour) && self.config.night_charge {
            let to_battery = self
                .battery
                .recommended_charge_amount()
                .min(self.config.battery_max_charge_rate);
            let import = to_battery - spare;
            self.grid.draw(import, hour);
            self.battery.charge(to_battery);
            (DispatchMode::Night, to_battery, import)
        } else {
            let shortfall = -spare;
            let balance = if self.window.is_charging_hour(hour) {
                shortfall
            } else {
                self.battery.discharge(shortfall)
            };
            if balance > 0.0 {
                self.grid.draw(balance, hour);
            }
            (DispatchMode::Day, balance - shortfall, balance)
        };

        HourRecord {
            mode,
            day,
            hour,
            load_kwh,
            solar_kwh,
            battery_kwh,
            grid_kwh,
            battery_level_kwh: self.battery.charge,
        }
    }

    /// Produces solar for the slot, reads and records the load, then dispatches.
    pub fn step(&mut self, day: u32, hour: u32, load: &mut dyn LoadProvider) -> HourRecord {
        let sun_hours = self.sun.hours(day, hour);
        let solar_kwh = self.panel.energy(sun_hours);

        let load_kwh = load.get(day, hour);
        load.record_usage(load_kwh);

        self.dispatch(day, hour, solar_kwh, load_kwh)
    }

    /// Simulates days `1..=days` and returns the ledgers.
    ///
    /// The load's usage counter is reset first. `sink` receives every hour's
    /// record after that hour has been settled.
    pub fn run(
        self,
        days: u32,
        load: &mut dyn LoadProvider,
        sink: Option<&mut dyn DiagnosticSink>,
    ) -> YearOutcome {
        self.run_clock(Clock::new(days), load, sink)
    }

    /// Simulates a full year.
    pub fn run_year(
        self,
        load: &mut dyn LoadProvider,
        sink: Option<&mut dyn DiagnosticSink>,
    ) -> YearOutcome {
        self.run_clock(Clock::year(), load, sink)
    }

    fn run_clock(
        mut self,
        mut clock: Clock,
        load: &mut dyn LoadProvider,
        mut sink: Option<&mut dyn DiagnosticSink>,
    ) -> YearOutcome {
        load.reset();
        clock.run(|day, hour| {
            let record = self.step(day, hour, load);
            if let Some(sink) = sink.as_mut() {
                sink.record(&record);
            }
        });
        self.into_outcome(load)
    }

    /// Current battery state.
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    /// Current grid ledger.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn into_outcome(self, load: &dyn LoadProvider) -> YearOutcome {
        YearOutcome {
            equipment: self.equipment,
            tariff: self.grid.tariff(),
            load_used_kwh: load.total_used(),
            solar_produced_kwh: self.panel.total_produced,
            battery_max_kwh: self.battery.max,
            battery_level_kwh: self.battery.charge,
            battery_in_kwh: self.battery.charge_in,
            battery_out_kwh: self.battery.charge_out,
            grid: self.grid,
        }
    }
}
