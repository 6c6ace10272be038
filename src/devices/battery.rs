/// Charge level below which the dynamic controller raises the nightly target (kWh).
const TARGET_RAISE_BELOW_KWH: f64 = 0.5;

/// Charge level above which the dynamic controller lowers the nightly target (kWh).
const TARGET_LOWER_ABOVE_KWH: f64 = 1.0;

/// Fixed controller step (kWh).
const TARGET_STEP_KWH: f64 = 0.2;

/// A home battery holding a single charge level in kWh.
///
/// Charging applies the `loss` factor to the energy that is actually
/// absorbed; energy that does not fit is handed back untouched. Discharging
/// is lossless and limited by the peak draw rate.
///
/// The nightly charge target starts at the usable maximum. With dynamic
/// charging enabled it is nudged once per day at hour 0 by a fixed step,
/// based on how much charge was left over from the previous day.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Current stored energy (kWh).
    pub charge: f64,

    /// Usable capacity: nameplate capacity times depth-of-discharge (kWh).
    pub max: f64,

    /// Charging efficiency (0.0..=1.0].
    pub loss: f64,

    /// Cumulative energy stored, after loss (kWh).
    pub charge_in: f64,

    /// Cumulative energy delivered (kWh).
    pub charge_out: f64,

    /// Level the nightly grid top-up aims for (kWh).
    pub target_charge_level: f64,

    /// Charge recorded at the most recent midnight (kWh).
    pub last_charge_level: f64,

    /// Maximum energy delivered per hour (kWh).
    peak_draw: f64,

    dynamic_charge: bool,
}

impl Battery {
    /// Creates an empty battery.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Nameplate capacity in kWh
    /// * `loss` - Charging efficiency (0..1.0]
    /// * `dod` - Usable depth-of-discharge fraction
    /// * `peak_draw` - Maximum energy delivered per hour in kWh
    /// * `dynamic_charge` - Adapt the nightly target from the previous night
    ///
    /// # Panics
    ///
    /// Panics if capacity, depth-of-discharge or peak draw is negative, or
    /// the loss factor is outside (0, 1].
    pub fn new(capacity_kwh: f64, loss: f64, dod: f64, peak_draw: f64, dynamic_charge: bool) -> Self {
        assert!(capacity_kwh >= 0.0);
        assert!(loss > 0.0 && loss <= 1.0);
        assert!(dod >= 0.0);
        assert!(peak_draw >= 0.0);

        let max = capacity_kwh * dod;
        Self {
            charge: 0.0,
            max,
            loss,
            charge_in: 0.0,
            charge_out: 0.0,
            target_charge_level: max,
            last_charge_level: 0.0,
            peak_draw,
            dynamic_charge,
        }
    }

    /// Advances the daily bookkeeping; only hour 0 has an effect.
    pub fn tick_hour(&mut self, hour: u32) {
        if hour != 0 {
            return;
        }

        self.last_charge_level = self.charge;
        if self.dynamic_charge {
            if self.last_charge_level < TARGET_RAISE_BELOW_KWH {
                self.target_charge_level = self.max.min(self.target_charge_level + TARGET_STEP_KWH);
            }
            if self.last_charge_level > TARGET_LOWER_ABOVE_KWH {
                self.target_charge_level = (self.target_charge_level - TARGET_STEP_KWH).max(0.0);
            }
        }
    }

    /// Charges with `kw` of input energy and returns the part that did not fit.
    ///
    /// The returned energy has no loss applied.
    pub fn charge(&mut self, kw: f64) -> f64 {
        let mut charge_amount = kw * self.loss;
        if charge_amount + self.charge > self.max {
            charge_amount = self.max - self.charge;
        }

        let leftover = kw - charge_amount / self.loss;

        self.charge += charge_amount;
        self.charge_in += charge_amount;
        debug_assert!(self.charge <= self.max + 1e-9, "charge above usable capacity");

        leftover
    }

    /// Discharges up to `kw` and returns the energy still needed from elsewhere.
    pub fn discharge(&mut self, kw: f64) -> f64 {
        let drawn = self.charge.min(kw).min(self.peak_draw);
        self.charge -= drawn;
        self.charge_out += drawn;
        debug_assert!(self.charge >= -1e-9, "charge below zero");

        kw - drawn
    }

    /// Grid energy needed to reach the target level, compensating for loss.
    pub fn recommended_charge_amount(&self) -> f64 {
        (self.target_charge_level - self.charge).max(0.0) / self.loss
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_new_battery() {
        let battery = Battery::new(10.0, 0.96, 0.9, 3.0, false);
        assert_eq!(battery.max, 9.0);
        assert_eq!(battery.charge, 0.0);
        assert_eq!(battery.target_charge_level, 9.0);
        assert_eq!(battery.charge_in, 0.0);
        assert_eq!(battery.charge_out, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_invalid_loss() {
        Battery::new(10.0, 0.0, 0.9, 3.0, false);
    }

    #[test]
    #[should_panic]
    fn test_invalid_capacity() {
        Battery::new(-1.0, 0.96, 0.9, 3.0, false);
    }

    #[test]
    fn test_charge_applies_loss() {
        let mut battery = Battery::new(1000.0, 0.96, 1.0, 3.0, false);
        let leftover = battery.charge(3.0);
        assert_eq!(leftover, 0.0);
        assert_relative_eq!(battery.charge_in, 2.88);
        assert_relative_eq!(battery.charge, 2.88);
    }

    #[test]
    fn test_charge_clamps_and_returns_lossless_leftover() {
        // 1 kWh of room, 0.8 efficiency: 1.25 kWh absorbed, 0.75 handed back
        let mut battery = Battery::new(1.0, 0.8, 1.0, 3.0, false);
        let leftover = battery.charge(2.0);
        assert_relative_eq!(battery.charge, 1.0);
        assert_relative_eq!(leftover, 0.75, epsilon = 1e-12);
        assert_relative_eq!(battery.charge_in, 1.0);
    }

    #[test]
    fn test_full_battery_returns_everything() {
        let mut battery = Battery::new(2.0, 0.9, 1.0, 3.0, false);
        battery.charge(10.0);
        let leftover = battery.charge(1.5);
        assert_relative_eq!(leftover, 1.5);
        assert_relative_eq!(battery.charge, 2.0);
    }

    #[test]
    fn test_discharge_is_lossless() {
        let mut battery = Battery::new(10.0, 1.0, 1.0, 3.0, false);
        battery.charge(5.0);
        let unmet = battery.discharge(2.0);
        assert_eq!(unmet, 0.0);
        assert_relative_eq!(battery.charge, 3.0);
        assert_relative_eq!(battery.charge_out, 2.0);
    }

    #[test]
    fn test_discharge_limited_by_peak_draw() {
        let mut battery = Battery::new(10.0, 1.0, 1.0, 3.0, false);
        battery.charge(8.0);
        let unmet = battery.discharge(5.0);
        assert_relative_eq!(unmet, 2.0);
        assert_relative_eq!(battery.charge, 5.0);
    }

    #[test]
    fn test_discharge_limited_by_charge() {
        let mut battery = Battery::new(10.0, 1.0, 1.0, 3.0, false);
        battery.charge(1.0);
        let unmet = battery.discharge(2.5);
        assert_relative_eq!(unmet, 1.5);
        assert_eq!(battery.charge, 0.0);
    }

    #[test]
    fn test_zero_capacity_never_moves_energy() {
        let mut battery = Battery::new(0.0, 0.96, 0.9, 3.0, true);
        assert_eq!(battery.charge(4.0), 4.0);
        assert_eq!(battery.discharge(4.0), 4.0);
        for _ in 0..3 {
            battery.tick_hour(0);
        }
        assert_eq!(battery.charge_in, 0.0);
        assert_eq!(battery.charge_out, 0.0);
        assert_eq!(battery.target_charge_level, 0.0);
        assert_eq!(battery.recommended_charge_amount(), 0.0);
    }

    #[test]
    fn test_recommended_charge_compensates_loss() {
        let mut battery = Battery::new(10.0, 0.8, 1.0, 3.0, false);
        battery.charge(5.0); // 4.0 stored
        assert_relative_eq!(battery.recommended_charge_amount(), 6.0 / 0.8);

        battery.charge(battery.recommended_charge_amount());
        assert_relative_eq!(battery.charge, 10.0);
        assert!(battery.recommended_charge_amount() < 1e-9);
    }

    #[test]
    fn test_static_target_ignores_midnight() {
        let mut battery = Battery::new(5.0, 1.0, 1.0, 3.0, false);
        battery.tick_hour(0);
        assert_eq!(battery.target_charge_level, 5.0);
    }

    #[test]
    fn test_dynamic_target_lowers_when_charge_left_over() {
        let mut battery = Battery::new(5.0, 1.0, 1.0, 3.0, true);
        battery.charge(2.0);
        battery.tick_hour(0);
        assert_relative_eq!(battery.last_charge_level, 2.0);
        assert_relative_eq!(battery.target_charge_level, 4.8);

        // other hours leave the controller alone
        battery.tick_hour(7);
        assert_relative_eq!(battery.target_charge_level, 4.8);
    }

    #[test]
    fn test_dynamic_target_raises_when_nearly_empty_but_capped() {
        let mut battery = Battery::new(5.0, 1.0, 1.0, 3.0, true);
        battery.charge(3.0);
        battery.tick_hour(0);
        battery.tick_hour(0);
        assert_relative_eq!(battery.target_charge_level, 4.6);

        battery.discharge(3.0);
        battery.tick_hour(0);
        assert_relative_eq!(battery.target_charge_level, 4.8);
        battery.tick_hour(0);
        battery.tick_hour(0);
        assert_relative_eq!(battery.target_charge_level, 5.0);
    }

    #[test]
    fn test_dynamic_target_dead_band() {
        let mut battery = Battery::new(5.0, 1.0, 1.0, 3.0, true);
        battery.charge(3.0);
        battery.tick_hour(0);
        battery.discharge(2.25); // 0.75 kWh left: inside the dead band
        battery.tick_hour(0);
        assert_relative_eq!(battery.target_charge_level, 4.8);
    }

    #[test]
    fn test_dynamic_target_floors_at_zero() {
        let mut battery = Battery::new(1.5, 1.0, 1.0, 3.0, true);
        battery.charge(1.5);
        for _ in 0..10 {
            battery.tick_hour(0);
        }
        assert_eq!(battery.target_charge_level, 0.0);
    }
}
