use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Julian date of the J2000.0 epoch (2000-01-01T12:00:00 TDB)
pub const J2000: f64 = 2_451_545.0;

pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

pub(crate) const HOURS_PER_DAY: f64 = 24.0;
pub(crate) const MINUTES_PER_DAY: f64 = 1_440.0;

/// Julian centuries elapsed between J2000.0 and the TDB Julian date `jd`.
pub fn julian_centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000) / DAYS_PER_JULIAN_CENTURY
}

/// A time span using f64 precision.
///
/// The `Time` struct represents durations with days as the base unit, matching
/// the Julian day time scale used for every ephemeris query.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let earth_year = Time::from_years(1.0);
/// let moon_period = Time::from_days(27.321661);
///
/// let days = earth_year.to_days();
/// let hours = moon_period.to_hours();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: days

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in days.
    pub fn from_days(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in Julian years (365.25 days).
    pub fn from_years(value: f64) -> Self {
        Self(value * DAYS_PER_JULIAN_YEAR)
    }

    /// Creates a new `Time` from a value in hours.
    pub fn from_hours(value: f64) -> Self {
        Self(value / HOURS_PER_DAY)
    }

    /// Creates a new `Time` from a value in minutes.
    pub fn from_minutes(value: f64) -> Self {
        Self(value / MINUTES_PER_DAY)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self(value / SECONDS_PER_DAY)
    }

    /// Returns the time in days.
    pub fn to_days(&self) -> f64 {
        self.0
    }

    /// Converts the time to Julian years.
    pub fn to_years(&self) -> f64 {
        self.0 / DAYS_PER_JULIAN_YEAR
    }

    /// Converts the time to hours.
    pub fn to_hours(&self) -> f64 {
        self.0 * HOURS_PER_DAY
    }

    /// Converts the time to minutes.
    pub fn to_minutes(&self) -> f64 {
        self.0 * MINUTES_PER_DAY
    }

    /// Converts the time to seconds.
    pub fn to_seconds(&self) -> f64 {
        self.0 * SECONDS_PER_DAY
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}
