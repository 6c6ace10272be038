use std::f64::consts::PI;

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::LoadSeries;
use crate::config::SimulationConfig;
use crate::sim::types::{DAYS_PER_YEAR, HOURS_PER_DAY};

/// A synthetic household consumption generator.
///
/// `SyntheticLoad` produces an hourly profile from a daily sinusoid, a
/// seasonal term peaking at the turn of the year, and Gaussian noise. The
/// same seed always yields the same profile.
///
/// # Examples
///
/// ```
/// use solar_battery_sim::load::{LoadProvider, SyntheticLoad};
///
/// let mut load = SyntheticLoad::new(
///     0.35, // base_kwh - average hourly consumption
///     0.2,  // amp_kwh - daily variation
///     4.0,  // phase_rad - evening peak
///     0.15, // seasonal_kwh - extra winter consumption
///     0.05, // noise_std - small random variation
///     42,   // seed - for reproducible noise
/// );
///
/// let series = load.series();
/// assert!(series.get(1, 19) >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct SyntheticLoad {
    /// Mean hourly consumption in kWh
    pub base_kwh: f64,

    /// Amplitude of the daily sinusoid in kWh
    pub amp_kwh: f64,

    /// Phase offset of the daily sinusoid in radians
    pub phase_rad: f64,

    /// Amplitude of the yearly cosine in kWh (maximum on 1 January)
    pub seasonal_kwh: f64,

    /// Standard deviation of the Gaussian noise in kWh
    pub noise_std: f64,

    rng: StdRng,
}

impl SyntheticLoad {
    /// Creates a new generator.
    ///
    /// # Arguments
    ///
    /// * `base_kwh` - Mean hourly consumption
    /// * `amp_kwh` - Amplitude of the daily variation
    /// * `phase_rad` - Phase offset of the daily variation in radians
    /// * `seasonal_kwh` - Amplitude of the yearly variation
    /// * `noise_std` - Standard deviation of Gaussian noise
    /// * `seed` - Random seed for reproducible noise
    pub fn new(
        base_kwh: f64,
        amp_kwh: f64,
        phase_rad: f64,
        seasonal_kwh: f64,
        noise_std: f64,
        seed: u64,
    ) -> Self {
        Self {
            base_kwh,
            amp_kwh,
            phase_rad,
            seasonal_kwh,
            noise_std,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator using the `SYNTHETIC_*` and `SEED` keys of `config`.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.synthetic_base_kwh,
            config.synthetic_amp_kwh,
            config.synthetic_phase_rad,
            config.synthetic_seasonal_kwh,
            config.synthetic_noise_std,
            config.seed,
        )
    }

    /// Consumption for one hour; never negative.
    ///
    /// Draws from the generator's random stream when noise is enabled, so
    /// successive calls for the same slot differ.
    pub fn demand_kwh(&mut self, day: u32, hour: u32) -> f64 {
        let day_pos = f64::from(hour % HOURS_PER_DAY) / f64::from(HOURS_PER_DAY);
        let daily = (2.0 * PI * day_pos + self.phase_rad).sin();

        let year_pos = f64::from(day.saturating_sub(1)) / f64::from(DAYS_PER_YEAR);
        let seasonal = (2.0 * PI * year_pos).cos();

        let noise = if self.noise_std > 0.0 {
            // Box-Muller
            let u1: f64 = self.rng.random::<f64>().clamp(1e-12, 1.0);
            let u2: f64 = self.rng.random::<f64>();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
            z0 * self.noise_std
        } else {
            0.0
        };

        let kwh = self.base_kwh + self.amp_kwh * daily + self.seasonal_kwh * seasonal + noise;
        kwh.max(0.0)
    }

    /// Samples a whole year in day/hour order.
    pub fn series(&mut self) -> LoadSeries {
        LoadSeries::from_fn(|day, hour| self.demand_kwh(day, hour))
    }
}
