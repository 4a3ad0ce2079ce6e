//! Closed-form Keplerian orbits.
//!
//! Positions come from solving Kepler's equation for the eccentric anomaly
//! and rotating the resulting perifocal coordinates into the orbit frame.

use std::f64::consts::{PI, TAU};

use nalgebra::{Matrix3, Rotation3, Vector3};
use serde::Deserialize;
use units::{Angle, J2000, Length, Time};

use crate::error::EphemerisError;
use crate::orbit::Orbit;

/// Newton–Raphson iteration cap for Kepler's equation
pub const KEPLER_MAX_ITERATIONS: usize = 20;

/// Convergence tolerance on the eccentric anomaly (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-10;

/// Classical orbital elements of a bound orbit.
///
/// Pericenter distance is used instead of semi-major axis so that the element
/// set stays well defined as eccentricity approaches one.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrbitalElements {
    /// Closest approach to the focus
    pub pericenter_distance: Length,

    /// Eccentricity (dimensionless, 0 ≤ e < 1)
    pub eccentricity: f64,

    /// Inclination to the reference plane of the orbit frame
    pub inclination: Angle,

    /// Longitude of the ascending node
    pub ascending_node: Angle,

    /// Argument of periapsis
    pub arg_of_periapsis: Angle,

    /// Mean anomaly at `epoch`
    pub mean_anomaly: Angle,

    /// Orbital period
    pub period: Time,

    /// TDB Julian date at which `mean_anomaly` applies
    #[serde(default = "default_epoch")]
    pub epoch: f64,
}

fn default_epoch() -> f64 {
    J2000
}

/// A Keplerian ellipse evaluated in closed form.
///
/// # Examples
///
/// ```
/// use ephemeris::{EllipticalOrbit, Orbit, OrbitalElements};
/// use units::{Angle, Length, Time};
///
/// let earth = EllipticalOrbit::new(OrbitalElements {
///     pericenter_distance: Length::from_au(0.98329),
///     eccentricity: 0.0167,
///     inclination: Angle::zero(),
///     ascending_node: Angle::zero(),
///     arg_of_periapsis: Angle::from_degrees(102.9),
///     mean_anomaly: Angle::from_degrees(357.5),
///     period: Time::from_days(365.256),
///     epoch: units::J2000,
/// })
/// .unwrap();
///
/// let p0 = earth.position_at_time(units::J2000);
/// let p1 = earth.position_at_time(units::J2000 + earth.period());
/// assert!((p0 - p1).norm() < 1e-2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalOrbit {
    pericenter_distance: f64,
    eccentricity: f64,
    inclination: f64,
    ascending_node: f64,
    arg_of_periapsis: f64,
    mean_anomaly_at_epoch: f64,
    period: f64,
    epoch: f64,
    orbit_plane_rotation: Matrix3<f64>,
}

impl EllipticalOrbit {
    /// Builds an orbit from its elements, rejecting anything that is not a
    /// proper ellipse with a positive period.
    pub fn new(elements: OrbitalElements) -> Result<Self, EphemerisError> {
        Self::from_raw(
            elements.pericenter_distance.to_km(),
            elements.eccentricity,
            elements.inclination.to_radians(),
            elements.ascending_node.to_radians(),
            elements.arg_of_periapsis.to_radians(),
            elements.mean_anomaly.to_radians(),
            elements.period.to_days(),
            elements.epoch,
        )
    }

    /// Builds an orbit from raw km / radian / day values
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_raw(
        pericenter_distance: f64,
        eccentricity: f64,
        inclination: f64,
        ascending_node: f64,
        arg_of_periapsis: f64,
        mean_anomaly_at_epoch: f64,
        period: f64,
        epoch: f64,
    ) -> Result<Self, EphemerisError> {
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(EphemerisError::InvalidEccentricity(eccentricity));
        }
        if !(period > 0.0) || !period.is_finite() {
            return Err(EphemerisError::InvalidPeriod(period));
        }
        if !(pericenter_distance > 0.0) || !pericenter_distance.is_finite() {
            return Err(EphemerisError::InvalidPericenter(pericenter_distance));
        }

        let orbit_plane_rotation = (Rotation3::from_axis_angle(&Vector3::z_axis(), ascending_node)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), inclination)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), arg_of_periapsis))
        .into_inner();

        Ok(Self {
            pericenter_distance,
            eccentricity,
            inclination,
            ascending_node,
            arg_of_periapsis,
            mean_anomaly_at_epoch,
            period,
            epoch,
            orbit_plane_rotation,
        })
    }

    pub fn pericenter_distance(&self) -> f64 {
        self.pericenter_distance
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.pericenter_distance / (1.0 - self.eccentricity)
    }

    pub fn apocenter_distance(&self) -> f64 {
        self.pericenter_distance * (1.0 + self.eccentricity) / (1.0 - self.eccentricity)
    }

    pub fn inclination(&self) -> f64 {
        self.inclination
    }

    pub fn ascending_node(&self) -> f64 {
        self.ascending_node
    }

    pub fn arg_of_periapsis(&self) -> f64 {
        self.arg_of_periapsis
    }

    pub fn mean_anomaly_at_epoch(&self) -> f64 {
        self.mean_anomaly_at_epoch
    }

    pub fn epoch(&self) -> f64 {
        self.epoch
    }

    /// Mean motion in radians per day
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period
    }

    /// Mean anomaly at TDB Julian date `tdb` (not normalised)
    pub fn mean_anomaly_at(&self, tdb: f64) -> f64 {
        self.mean_anomaly_at_epoch + (tdb - self.epoch) * self.mean_motion()
    }

    /// Solves Kepler's equation `E - e·sin(E) = M` for the eccentric anomaly.
    ///
    /// Newton–Raphson from a starting guess of `M` (or `π` for e > 0.8),
    /// stopping once an update is smaller than [`KEPLER_TOLERANCE`] or after
    /// [`KEPLER_MAX_ITERATIONS`]. On non-convergence the last iterate is
    /// returned. The result lies in the same revolution as `M` reduced to
    /// `[0, 2π)`.
    pub fn eccentric_anomaly(&self, mean_anomaly: f64) -> f64 {
        let e = self.eccentricity;
        let m = mean_anomaly.rem_euclid(TAU);
        if e == 0.0 {
            return m;
        }

        let mut ecc_anomaly = if e > 0.8 { PI } else { m };
        for _ in 0..KEPLER_MAX_ITERATIONS {
            let delta =
                (ecc_anomaly - e * ecc_anomaly.sin() - m) / (1.0 - e * ecc_anomaly.cos());
            ecc_anomaly -= delta;
            if delta.abs() < KEPLER_TOLERANCE {
                return ecc_anomaly;
            }
        }

        tracing::debug!(
            eccentricity = e,
            mean_anomaly = m,
            "Kepler solver reached iteration cap"
        );
        ecc_anomaly
    }

    fn position_at_eccentric_anomaly(&self, ecc_anomaly: f64) -> Vector3<f64> {
        let e = self.eccentricity;
        let a = self.semi_major_axis();
        let (sin_e, cos_e) = ecc_anomaly.sin_cos();

        let x = a * (cos_e - e);
        let y = a * (1.0 - e * e).sqrt() * sin_e;

        self.orbit_plane_rotation * Vector3::new(x, y, 0.0)
    }

    fn velocity_at_eccentric_anomaly(&self, ecc_anomaly: f64) -> Vector3<f64> {
        let e = self.eccentricity;
        let a = self.semi_major_axis();
        let (sin_e, cos_e) = ecc_anomaly.sin_cos();
        let ecc_anomaly_rate = self.mean_motion() / (1.0 - e * cos_e);

        let vx = -a * sin_e * ecc_anomaly_rate;
        let vy = a * (1.0 - e * e).sqrt() * cos_e * ecc_anomaly_rate;

        self.orbit_plane_rotation * Vector3::new(vx, vy, 0.0)
    }
}

impl Orbit for EllipticalOrbit {
    fn position_at_time(&self, tdb: f64) -> Vector3<f64> {
        let ecc_anomaly = self.eccentric_anomaly(self.mean_anomaly_at(tdb));
        self.position_at_eccentric_anomaly(ecc_anomaly)
    }

    fn velocity_at_time(&self, tdb: f64) -> Vector3<f64> {
        let ecc_anomaly = self.eccentric_anomaly(self.mean_anomaly_at(tdb));
        self.velocity_at_eccentric_anomaly(ecc_anomaly)
    }

    fn period(&self) -> f64 {
        self.period
    }

    fn bounding_radius(&self) -> f64 {
        self.apocenter_distance()
    }
}
