use std::fmt;

use serde::Serialize;

use super::types::{NightWindow, Tariff};

/// Grid connection ledger accumulating energy and cost for one year.
///
/// Sign convention for [`Grid::draw`]:
/// - Positive values are imports, billed at the night or day rate
/// - Zero or negative values are exports, credited at the feed-in rate
///   (a negative cost contribution)
#[derive(Debug, Clone, Serialize)]
pub struct Grid {
    /// Total imported energy (kWh).
    pub total_drawn: f64,
    /// Energy imported outside the night window (kWh).
    pub draw_day: f64,
    /// Energy imported inside the night window (kWh).
    pub draw_night: f64,
    /// Exported energy (kWh, negative or zero).
    pub draw_feedin: f64,
    /// Net cost.
    pub cost: f64,
    pub cost_day: f64,
    pub cost_night: f64,
    /// Feed-in credit (negative or zero).
    pub cost_feedin: f64,
    #[serde(skip)]
    tariff: Tariff,
    #[serde(skip)]
    window: NightWindow,
}

impl Grid {
    /// Creates an empty ledger billing with `tariff` inside/outside `window`.
    pub fn new(tariff: Tariff, window: NightWindow) -> Self {
        Self {
            total_drawn: 0.0,
            draw_day: 0.0,
            draw_night: 0.0,
            draw_feedin: 0.0,
            cost: 0.0,
            cost_day: 0.0,
            cost_night: 0.0,
            cost_feedin: 0.0,
            tariff,
            window,
        }
    }

    /// Records a signed exchange of `kwh` during `hour`.
    pub fn draw(&mut self, kwh: f64, hour: u32) {
        if kwh > 0.0 {
            self.total_drawn += kwh;
            if self.window.is_night_rate(hour) {
                self.cost += self.tariff.night * kwh;
                self.cost_night += self.tariff.night * kwh;
                self.draw_night += kwh;
            } else {
                self.cost_day += self.tariff.day * kwh;
                self.cost += self.tariff.day * kwh;
                self.draw_day += kwh;
            }
        } else {
            self.cost += self.tariff.feed_in * kwh;
            self.cost_feedin += self.tariff.feed_in * kwh;
            self.draw_feedin += kwh;
        }
    }

    /// Unit prices in effect.
    pub fn tariff(&self) -> Tariff {
        self.tariff
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid drawn:            {:.3} kWh (day {:.3}, night {:.3}, feed-in {:.3})",
            self.total_drawn, self.draw_day, self.draw_night, self.draw_feedin
        )?;
        write!(
            f,
            "Grid cost:             {:.2} (day {:.2}, night {:.2}, feed-in {:.2})",
            self.cost, self.cost_day, self.cost_night, self.cost_feedin
        )
    }
}
