//! Household consumption: the provider contract and the validated hourly series.

/// Smart-meter consumption CSV reader.
pub mod meter;
/// Seeded synthetic household profile.
pub mod synthetic;

use crate::error::SimError;
use crate::sim::types::{DAYS_PER_YEAR, HOURS_PER_DAY};

pub use meter::{read_consumption_csv, read_consumption_from};
pub use synthetic::SyntheticLoad;

const SLOTS: usize = (DAYS_PER_YEAR * HOURS_PER_DAY) as usize;

fn slot(day: u32, hour: u32) -> usize {
    assert!(
        (1..=DAYS_PER_YEAR).contains(&day) && hour < HOURS_PER_DAY,
        "day {day} hour {hour} out of range"
    );
    ((day - 1) * HOURS_PER_DAY + hour) as usize
}

/// Source of hourly household consumption for one simulated year.
///
/// Implementations must return a defined value for every day 1-365 and
/// hour 0-23; the engine never interpolates or defaults.
pub trait LoadProvider {
    /// Consumption (kWh) during `hour` of `day`.
    fn get(&self, day: u32, hour: u32) -> f64;

    /// Adds `kwh` to the running usage counter.
    fn record_usage(&mut self, kwh: f64);

    /// Usage recorded since the last [`LoadProvider::reset`].
    fn total_used(&self) -> f64;

    /// Clears the running usage counter before a new simulated year.
    fn reset(&mut self);
}

/// Complete consumption table for days 1-365, hours 0-23.
///
/// Only constructed through [`LoadSeriesBuilder::build`] or the total
/// constructors below, so every slot is guaranteed to be filled.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSeries {
    values: Vec<f64>,
    total_used: f64,
}

impl LoadSeries {
    /// Builds a series by evaluating `f(day, hour)` for every slot.
    pub fn from_fn(mut f: impl FnMut(u32, u32) -> f64) -> Self {
        let mut values = Vec::with_capacity(SLOTS);
        for day in 1..=DAYS_PER_YEAR {
            for hour in 0..HOURS_PER_DAY {
                values.push(f(day, hour));
            }
        }
        Self {
            values,
            total_used: 0.0,
        }
    }

    /// The same consumption in every hour.
    pub fn constant(kwh: f64) -> Self {
        Self::from_fn(|_, _| kwh)
    }

    /// Sum of all 8760 hourly values (kWh).
    pub fn annual_total(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl LoadProvider for LoadSeries {
    fn get(&self, day: u32, hour: u32) -> f64 {
        self.values[slot(day, hour)]
    }

    fn record_usage(&mut self, kwh: f64) {
        self.total_used += kwh;
    }

    fn total_used(&self) -> f64 {
        self.total_used
    }

    fn reset(&mut self) {
        self.total_used = 0.0;
    }
}

/// Incrementally filled consumption table, validated on [`LoadSeriesBuilder::build`].
#[derive(Debug, Clone)]
pub struct LoadSeriesBuilder {
    slots: Vec<Option<f64>>,
}

impl Default for LoadSeriesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadSeriesBuilder {
    pub fn new() -> Self {
        Self {
            slots: vec![None; SLOTS],
        }
    }

    /// Current value of a slot, if any.
    ///
    /// # Panics
    ///
    /// Panics if `day` or `hour` is out of range.
    pub fn get(&self, day: u32, hour: u32) -> Option<f64> {
        self.slots[slot(day, hour)]
    }

    /// Overwrites a slot.
    ///
    /// # Panics
    ///
    /// Panics if `day` or `hour` is out of range.
    pub fn set(&mut self, day: u32, hour: u32, kwh: f64) {
        self.slots[slot(day, hour)] = Some(kwh);
    }

    /// Adds to a slot, treating an empty slot as zero.
    ///
    /// # Panics
    ///
    /// Panics if `day` or `hour` is out of range.
    pub fn add(&mut self, day: u32, hour: u32, kwh: f64) {
        let entry = &mut self.slots[slot(day, hour)];
        *entry = Some(entry.unwrap_or(0.0) + kwh);
    }

    /// Number of filled slots.
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|v| v.is_some()).count()
    }

    /// Validates completeness and returns the series.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::DataIncomplete`] for the first empty slot in
    /// day/hour order, or [`SimError::InvalidLoad`] for a negative or
    /// non-finite value.
    pub fn build(self) -> Result<LoadSeries, SimError> {
        let mut values = Vec::with_capacity(SLOTS);
        for (index, value) in self.slots.into_iter().enumerate() {
            let day = index as u32 / HOURS_PER_DAY + 1;
            let hour = index as u32 % HOURS_PER_DAY;
            let kwh = value.ok_or(SimError::DataIncomplete { day, hour })?;
            if !kwh.is_finite() || kwh < 0.0 {
                return Err(SimError::InvalidLoad { day, hour, kwh });
            }
            values.push(kwh);
        }
        Ok(LoadSeries {
            values,
            total_used: 0.0,
        })
    }
}
