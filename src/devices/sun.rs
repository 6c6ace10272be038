//! Daily sunrise/sunset calendar and the intraday sunshine curve.

use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use crate::error::SimError;
use crate::sim::types::DAYS_PER_YEAR;

/// Non-leap reference year used to derive the month of each day of year.
const CALENDAR_YEAR: i32 = 2023;

/// Date stamped on `day`'s times: `day` days after 1 January, so the last
/// day of each month already counts as the next month and day 365 falls in
/// January.
fn stamp_date(day: u32) -> Option<NaiveDate> {
    NaiveDate::from_yo_opt(CALENDAR_YEAR, 1)?.checked_add_days(Days::new(u64::from(day)))
}

/// Shape factor that stretches the half-sine so a day's curve sums close to
/// the month's average sun-hours.
const CURVE_SCALE: f64 = 1.5;

/// Sunrise and sunset wall-clock times for every day of the year.
#[derive(Debug, Clone)]
pub struct SunCalendar {
    days: Vec<(NaiveDateTime, NaiveDateTime)>,
}

impl SunCalendar {
    /// Builds a calendar from per-day `(sunrise, sunset)` times, day 1 first.
    ///
    /// Entries beyond day 365 are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::SunDataIncomplete`] naming the first missing day
    /// when fewer than 365 entries are given.
    pub fn from_times(times: &[(NaiveTime, NaiveTime)]) -> Result<Self, SimError> {
        let mut days = Vec::with_capacity(DAYS_PER_YEAR as usize);
        for day in 1..=DAYS_PER_YEAR {
            let &(rise, set) = times
                .get(day as usize - 1)
                .ok_or(SimError::SunDataIncomplete { day })?;
            let date = stamp_date(day).ok_or(SimError::SunDataIncomplete { day })?;
            days.push((date.and_time(rise), date.and_time(set)));
        }
        Ok(Self { days })
    }

    /// Same sunrise and sunset on every day.
    pub fn uniform(sunrise: NaiveTime, sunset: NaiveTime) -> Self {
        let days = (1..=DAYS_PER_YEAR)
            .filter_map(stamp_date)
            .map(|date| (date.and_time(sunrise), date.and_time(sunset)))
            .collect();
        Self { days }
    }

    /// Reads a sunrise table: one `HH:MM:SS HH:MM:SS` line per day.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened, a parse error for a
    /// malformed line, or [`SimError::SunDataIncomplete`] for short files.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let file = File::open(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Reads a sunrise table from any buffered reader.
    ///
    /// `path` is only used to label errors.
    ///
    /// # Errors
    ///
    /// See [`SunCalendar::from_file`].
    pub fn from_reader(reader: impl BufRead, path: &Path) -> Result<Self, SimError> {
        let mut times = Vec::with_capacity(DAYS_PER_YEAR as usize);
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| SimError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parse_error = |message: String| SimError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                message,
            };
            let mut fields = line.split_whitespace();
            let (Some(rise), Some(set)) = (fields.next(), fields.next()) else {
                return Err(parse_error(format!(
                    "expected \"sunrise sunset\", got \"{line}\""
                )));
            };
            let rise = NaiveTime::parse_from_str(rise, "%H:%M:%S")
                .map_err(|e| parse_error(format!("bad sunrise \"{rise}\": {e}")))?;
            let set = NaiveTime::parse_from_str(set, "%H:%M:%S")
                .map_err(|e| parse_error(format!("bad sunset \"{set}\": {e}")))?;
            times.push((rise, set));
        }

        debug!(path = %path.display(), days = times.len(), "sunrise table read");
        Self::from_times(&times)
    }

    /// Sunrise for `day` (1-365).
    ///
    /// # Panics
    ///
    /// Panics if `day` is outside 1-365.
    pub fn sunrise(&self, day: u32) -> NaiveDateTime {
        self.days[day as usize - 1].0
    }

    /// Sunset for `day` (1-365).
    ///
    /// # Panics
    ///
    /// Panics if `day` is outside 1-365.
    pub fn sunset(&self, day: u32) -> NaiveDateTime {
        self.days[day as usize - 1].1
    }
}

/// Hourly sunshine derived from the calendar and monthly averages.
#[derive(Debug, Clone)]
pub struct SunModel {
    calendar: SunCalendar,
    /// Monthly average sun-hours per day, January first.
    pub sun_hours_per_day: [f64; 12],
}

impl SunModel {
    pub fn new(calendar: SunCalendar, sun_hours_per_day: [f64; 12]) -> Self {
        Self {
            calendar,
            sun_hours_per_day,
        }
    }

    /// Sun-hours falling in `hour` of `day`.
    ///
    /// Zero before the sunrise hour and from the sunset hour on. Inside the
    /// window the month's average is spread over a half-sine with
    /// `L = sunset.hour - sunrise.hour + 1` slots, sampled at slot centres.
    ///
    /// # Panics
    ///
    /// Panics if `day` is outside 1-365.
    pub fn hours(&self, day: u32, hour: u32) -> f64 {
        let rise = self.calendar.sunrise(day);
        let fall = self.calendar.sunset(day);
        let hours_per_day = self.sun_hours_per_day[rise.month0() as usize];

        if hour < rise.hour() || hour >= fall.hour() {
            return 0.0;
        }

        let window = f64::from(fall.hour() - rise.hour() + 1);
        let offset = f64::from(hour - rise.hour()) + 0.5;
        let place = (PI * offset / window).sin() * CURVE_SCALE;

        hours_per_day / window * place
    }
}
