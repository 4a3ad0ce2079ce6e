use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use crate::time::SECONDS_PER_DAY;

/// Mass of the Sun in kilograms (1.98847 × 10³⁰ kg)
pub const SOLAR_MASS_KG: f64 = 1.98847e30;

/// Mass of the Earth in kilograms (5.9722 × 10²⁴ kg)
pub const EARTH_MASS_KG: f64 = 5.9722e24;

/// Mass of Jupiter in kilograms (1.89813 × 10²⁷ kg)
const JUPITER_MASS_KG: f64 = 1.89813e27;

/// Newtonian constant of gravitation in km³ kg⁻¹ s⁻²
pub const G_KM3_PER_KG_S2: f64 = 6.674_30e-20;

/// A physical mass quantity using f64 precision.
///
/// The `Mass` struct represents mass values with kilograms as the base unit.
/// Orbit construction only ever needs the mass of a central body to derive
/// its gravitational parameter, see [`Mass::gravitational_parameter`].
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let sun = Mass::from_solar_masses(1.0);
/// let earth = Mass::from_earth_masses(1.0);
///
/// let earth_in_solar = earth.to_solar_masses();
/// let mu = sun.gravitational_parameter(); // km³/day²
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: kg

impl Mass {
    /// Creates a new `Mass` from a value in kilograms.
    pub fn from_kg(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in solar masses.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::Mass;
    ///
    /// let sun = Mass::from_solar_masses(1.0);
    /// let massive_star = Mass::from_solar_masses(25.0);
    /// ```
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value * SOLAR_MASS_KG)
    }

    /// Creates a new `Mass` from a value in Earth masses.
    pub fn from_earth_masses(value: f64) -> Self {
        Self(value * EARTH_MASS_KG)
    }

    /// Creates a new `Mass` from a value in Jupiter masses.
    pub fn from_jupiter_masses(value: f64) -> Self {
        Self(value * JUPITER_MASS_KG)
    }

    /// Returns the mass in kilograms.
    pub fn to_kg(&self) -> f64 {
        self.0
    }

    /// Converts the mass to solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0 / SOLAR_MASS_KG
    }

    /// Converts the mass to Earth masses.
    pub fn to_earth_masses(&self) -> f64 {
        self.0 / EARTH_MASS_KG
    }

    /// Converts the mass to Jupiter masses.
    pub fn to_jupiter_masses(&self) -> f64 {
        self.0 / JUPITER_MASS_KG
    }

    /// Gravitational parameter μ = G·M in km³/day², the unit system orbits
    /// are evaluated in.
    pub fn gravitational_parameter(&self) -> f64 {
        G_KM3_PER_KG_S2 * self.0 * SECONDS_PER_DAY * SECONDS_PER_DAY
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}
