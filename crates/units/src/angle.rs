use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, Neg, Sub};

const ARCSECONDS_PER_DEGREE: f64 = 3_600.0;

/// A plane angle using f64 precision.
///
/// Radians are the base unit; catalog data is usually written in degrees,
/// so both constructors are provided.
///
/// # Examples
///
/// ```rust
/// use units::Angle;
///
/// let inclination = Angle::from_degrees(7.155);
/// let radians = inclination.to_radians();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle(f64); // Base unit: radians

impl Angle {
    /// Creates a zero angle
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Angle` from a value in radians.
    pub fn from_radians(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Angle` from a value in degrees.
    pub fn from_degrees(value: f64) -> Self {
        Self(value.to_radians())
    }

    /// Creates a new `Angle` from a value in arcseconds.
    pub fn from_arcseconds(value: f64) -> Self {
        Self::from_degrees(value / ARCSECONDS_PER_DEGREE)
    }

    /// Returns the angle in radians.
    pub fn to_radians(&self) -> f64 {
        self.0
    }

    /// Converts the angle to degrees.
    pub fn to_degrees(&self) -> f64 {
        self.0.to_degrees()
    }

    /// Converts the angle to arcseconds.
    pub fn to_arcseconds(&self) -> f64 {
        self.to_degrees() * ARCSECONDS_PER_DEGREE
    }

    /// The same direction expressed in [0, 2π).
    pub fn normalized(self) -> Self {
        Self(self.0.rem_euclid(TAU))
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}
