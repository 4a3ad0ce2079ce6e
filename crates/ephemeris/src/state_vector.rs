//! Conversion from Cartesian state to Keplerian elements.
//!
//! Used to build elliptical approximations that continue a trajectory past
//! the end of its valid span.

use std::f64::consts::TAU;

use nalgebra::Vector3;
use units::Mass;

use crate::elliptical::EllipticalOrbit;
use crate::error::EphemerisError;

/// Below this, eccentricity and inclination are treated as exactly zero when
/// choosing reference directions for the angular elements.
const ANGLE_EPSILON: f64 = 1e-12;

/// Derive the elliptical orbit passing through `position` (km) with
/// `velocity` (km/day) at TDB Julian date `epoch`, around a central body of
/// mass `central_mass`.
///
/// Circular orbits place the periapsis on the ascending node; equatorial
/// orbits place the node on the +x axis. The returned orbit reproduces
/// `position` at `epoch`.
///
/// # Errors
///
/// - [`EphemerisError::DegenerateStateVector`] for a zero radius or purely
///   radial motion
/// - [`EphemerisError::UnboundOrbit`] when the state is parabolic or hyperbolic
///
/// # Examples
///
/// ```
/// use ephemeris::{Orbit, state_vector_to_orbit};
/// use nalgebra::Vector3;
/// use units::Mass;
///
/// let earth = Mass::from_earth_masses(1.0);
/// let r = 42_164.0;
/// let v = (earth.gravitational_parameter() / r).sqrt();
/// let geo = state_vector_to_orbit(
///     Vector3::new(r, 0.0, 0.0),
///     Vector3::new(0.0, v, 0.0),
///     earth,
///     units::J2000,
/// )
/// .unwrap();
///
/// assert!((geo.period() - 0.99727).abs() < 1e-3);
/// ```
pub fn state_vector_to_orbit(
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    central_mass: Mass,
    epoch: f64,
) -> Result<EllipticalOrbit, EphemerisError> {
    let mu = central_mass.gravitational_parameter();
    let radius = position.norm();
    let angular_momentum = position.cross(&velocity);
    let h = angular_momentum.norm();
    if !(radius > 0.0) || !(h > 0.0) {
        return Err(EphemerisError::DegenerateStateVector);
    }

    let eccentricity_vector = velocity.cross(&angular_momentum) / mu - position / radius;
    let eccentricity = eccentricity_vector.norm();
    let inverse_semi_major_axis = 2.0 / radius - velocity.norm_squared() / mu;
    if eccentricity >= 1.0 || !(inverse_semi_major_axis > 0.0) {
        return Err(EphemerisError::UnboundOrbit { eccentricity });
    }
    let semi_major_axis = 1.0 / inverse_semi_major_axis;

    let normal = angular_momentum / h;
    let inclination = normal.z.clamp(-1.0, 1.0).acos();
    let ascending_node = if inclination.sin() > ANGLE_EPSILON {
        normal.x.atan2(-normal.y)
    } else {
        0.0
    };

    // Basis in the orbit plane: node direction and its in-plane perpendicular
    let node = Vector3::new(ascending_node.cos(), ascending_node.sin(), 0.0);
    let node_perpendicular = normal.cross(&node);

    let periapsis = if eccentricity > ANGLE_EPSILON {
        eccentricity_vector / eccentricity
    } else {
        node
    };
    let arg_of_periapsis = periapsis
        .dot(&node_perpendicular)
        .atan2(periapsis.dot(&node));

    let semi_latus_direction = normal.cross(&periapsis);
    let radial = position / radius;
    let true_anomaly = radial
        .dot(&semi_latus_direction)
        .atan2(radial.dot(&periapsis));

    let (sin_nu, cos_nu) = true_anomaly.sin_cos();
    let ecc_anomaly = ((1.0 - eccentricity * eccentricity).sqrt() * sin_nu).atan2(eccentricity + cos_nu);
    let mean_anomaly = ecc_anomaly - eccentricity * ecc_anomaly.sin();

    let period = TAU * (semi_major_axis.powi(3) / mu).sqrt();

    EllipticalOrbit::from_raw(
        semi_major_axis * (1.0 - eccentricity),
        eccentricity,
        inclination,
        ascending_node,
        arg_of_periapsis,
        mean_anomaly,
        period,
        epoch,
    )
}
