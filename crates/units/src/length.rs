use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Kilometres per astronomical unit (IAU 2012 exact definition)
pub const KM_PER_AU: f64 = 149_597_870.7;

/// Kilometres per Julian light year
pub const KM_PER_LIGHT_YEAR: f64 = 9.460_730_472_580_8e12;

const METERS_PER_KM: f64 = 1_000.0;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with kilometres as the base unit,
/// which is the unit every orbit and reference frame in the ephemeris works in.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let earth_orbit = Length::from_au(1.0);
/// let moon_distance = Length::from_km(384_400.0);
///
/// let orbit_in_km = earth_orbit.to_km();
/// let moon_in_au = moon_distance.to_au();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: km

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in kilometres.
    pub fn from_km(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in metres.
    pub fn from_meters(value: f64) -> Self {
        Self(value / METERS_PER_KM)
    }

    /// Creates a new `Length` from a value in astronomical units.
    pub fn from_au(value: f64) -> Self {
        Self(value * KM_PER_AU)
    }

    /// Creates a new `Length` from a value in light years.
    pub fn from_light_years(value: f64) -> Self {
        Self(value * KM_PER_LIGHT_YEAR)
    }

    /// Returns the length in kilometres.
    pub fn to_km(&self) -> f64 {
        self.0
    }

    /// Converts the length to metres.
    pub fn to_meters(&self) -> f64 {
        self.0 * METERS_PER_KM
    }

    /// Converts the length to astronomical units.
    pub fn to_au(&self) -> f64 {
        self.0 / KM_PER_AU
    }

    /// Converts the length to light years.
    pub fn to_light_years(&self) -> f64 {
        self.0 / KM_PER_LIGHT_YEAR
    }

    /// Returns the maximum of two lengths.
    pub fn max(self, other: Self) -> Self {
        if self.0 > other.0 { self } else { other }
    }

    /// Raise to integer power (returns dimensionless f64 in km^n)
    pub fn powi(&self, n: i32) -> f64 {
        self.0.powi(n)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
