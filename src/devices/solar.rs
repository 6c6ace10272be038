/// A fixed solar array converting sun-hours into energy.
///
/// Output for one hour is `size * sun_hours * efficiency`, where
/// `efficiency` folds the site yield and system derate together.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Nameplate size in kilowatts.
    pub size: f64,

    /// Yield multiplier applied to every hour.
    pub efficiency: f64,

    /// Energy produced by the most recent call (kWh).
    pub producing: f64,

    /// Energy produced since construction (kWh).
    pub total_produced: f64,
}

impl Panel {
    /// Creates a new panel array.
    ///
    /// Negative sizes are clamped to zero.
    pub fn new(size: f64, efficiency: f64) -> Self {
        Self {
            size: size.max(0.0),
            efficiency,
            producing: 0.0,
            total_produced: 0.0,
        }
    }

    /// Energy produced from `sun_hours` of sunshine; accumulates the total.
    pub fn energy(&mut self, sun_hours: f64) -> f64 {
        let energy = self.size * sun_hours * self.efficiency;
        self.total_produced += energy;
        self.producing = energy;
        energy
    }
}
