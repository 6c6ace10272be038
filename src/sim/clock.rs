use super::types::{DAYS_PER_YEAR, HOURS_PER_DAY};

/// A simulation clock walking day-of-year and hour-of-day slots.
///
/// Days are 1-based and form the outer loop; hours run 0-23 inside each day.
///
/// # Examples
///
/// ```
/// use solar_battery_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(2);
/// let mut slots = Vec::new();
///
/// clock.run(|day, hour| slots.push((day, hour)));
/// assert_eq!(slots.len(), 48);
/// assert_eq!(slots[0], (1, 0));
/// assert_eq!(slots[25], (2, 1));
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    /// Index of the next slot to hand out
    current: u32,
    /// Number of days to walk
    days: u32,
}

impl Clock {
    /// Creates a clock covering days `1..=days`.
    ///
    /// # Arguments
    ///
    /// * `days` - The number of days the clock will run
    pub fn new(days: u32) -> Self {
        Self { current: 0, days }
    }

    /// A clock covering one full simulated year.
    pub fn year() -> Self {
        Self::new(DAYS_PER_YEAR)
    }

    /// Advances the clock by one hour.
    ///
    /// # Returns
    ///
    /// * `Some((day, hour))` - The slot before advancing
    /// * `None` - If every day has been walked
    pub fn tick(&mut self) -> Option<(u32, u32)> {
        if self.current < self.days * HOURS_PER_DAY {
            let slot = (
                self.current / HOURS_PER_DAY + 1,
                self.current % HOURS_PER_DAY,
            );
            self.current += 1;
            Some(slot)
        } else {
            None
        }
    }

    /// Runs a function for each remaining slot.
    ///
    /// # Arguments
    ///
    /// * `f` - A function taking the day (1-based) and hour (0-23)
    pub fn run(&mut self, mut f: impl FnMut(u32, u32)) {
        while let Some((day, hour)) = self.tick() {
            f(day, hour);
        }
    }
}
