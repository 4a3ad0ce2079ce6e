//! The orbit abstraction shared by every trajectory model.
//!
//! An orbit is a pure function of time: given a TDB Julian date it returns a
//! position (km) and velocity (km/day) in the orbit's own reference frame. The
//! frame itself is supplied by whoever owns the orbit; orbits know nothing
//! about frame centres or the body they move.

use std::fmt;

use nalgebra::Vector3;

use crate::sampling::{AdaptiveSampler, AdaptiveSamplingParameters, UniformSampler};

/// Finite-difference step used when an orbit has no closed-form velocity (one minute, in days)
pub const VELOCITY_DIFF_DELTA: f64 = 1.0 / 1440.0;

/// A lazily produced sequence of orbit samples
pub type Samples<'a> = Box<dyn Iterator<Item = OrbitSample> + 'a>;

/// A single point on a sampled trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    /// TDB Julian date of the sample
    pub time: f64,
    /// Position in the orbit frame (km)
    pub position: Vector3<f64>,
    /// Velocity in the orbit frame (km/day)
    pub velocity: Vector3<f64>,
}

/// Time span over which an orbit is valid.
///
/// A range whose `begin` equals its `end` means the orbit is valid at all
/// times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidRange {
    pub begin: f64,
    pub end: f64,
}

impl ValidRange {
    /// Valid for all time
    pub const ALWAYS: ValidRange = ValidRange {
        begin: 0.0,
        end: 0.0,
    };

    pub fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// True when the range places no limit on valid times
    pub fn is_unbounded(&self) -> bool {
        self.begin == self.end
    }

    /// True when `tdb` lies in `[begin, end)` or the range is unbounded
    pub fn contains(&self, tdb: f64) -> bool {
        self.is_unbounded() || (self.begin <= tdb && tdb < self.end)
    }
}

/// A trajectory model: position and velocity as functions of time.
///
/// Implementations must be deterministic. Times outside [`Orbit::valid_range`]
/// are never an error; each model extrapolates in its own way.
///
/// # Examples
///
/// ```
/// use ephemeris::{FixedOrbit, Orbit};
/// use nalgebra::Vector3;
///
/// let marker = FixedOrbit::new(Vector3::new(6378.0, 0.0, 0.0));
/// assert_eq!(marker.position_at_time(2451545.0), Vector3::new(6378.0, 0.0, 0.0));
/// assert!(!marker.is_periodic());
/// ```
pub trait Orbit: Send + Sync + fmt::Debug {
    /// Position (km) in the orbit frame at TDB Julian date `tdb`
    fn position_at_time(&self, tdb: f64) -> Vector3<f64>;

    /// Velocity (km/day) in the orbit frame at `tdb`.
    ///
    /// The default implementation differentiates position symmetrically
    /// around `tdb` with a step of [`VELOCITY_DIFF_DELTA`].
    fn velocity_at_time(&self, tdb: f64) -> Vector3<f64> {
        let half = VELOCITY_DIFF_DELTA / 2.0;
        let before = self.position_at_time(tdb - half);
        let after = self.position_at_time(tdb + half);
        (after - before) / VELOCITY_DIFF_DELTA
    }

    /// Orbital period in days; zero for non-periodic trajectories
    fn period(&self) -> f64;

    /// Radius (km) of a sphere around the frame origin containing the whole orbit
    fn bounding_radius(&self) -> f64;

    fn is_periodic(&self) -> bool {
        true
    }

    fn valid_range(&self) -> ValidRange {
        ValidRange::ALWAYS
    }

    /// Uniformly spaced samples covering `[start_time, end_time]`.
    ///
    /// Spacing defaults to a fixed fraction of the period for periodic
    /// orbits and a fixed fraction of the span otherwise.
    fn sample(&self, start_time: f64, end_time: f64) -> Samples<'_> {
        Box::new(UniformSampler::with_default_step(self, start_time, end_time))
    }
}

/// Non-overridable operations available on every orbit.
pub trait OrbitExt: Orbit {
    /// Samples dense enough that the polyline through them stays within
    /// `params.tolerance` of the true curve.
    ///
    /// # Examples
    ///
    /// ```
    /// use ephemeris::{AdaptiveSamplingParameters, EllipticalOrbit, OrbitExt, OrbitalElements};
    /// use units::{Angle, Length, Time};
    ///
    /// let orbit = EllipticalOrbit::new(OrbitalElements {
    ///     pericenter_distance: Length::from_km(7000.0),
    ///     eccentricity: 0.1,
    ///     inclination: Angle::zero(),
    ///     ascending_node: Angle::zero(),
    ///     arg_of_periapsis: Angle::zero(),
    ///     mean_anomaly: Angle::zero(),
    ///     period: Time::from_hours(1.8),
    ///     epoch: units::J2000,
    /// })
    /// .unwrap();
    ///
    /// let params = AdaptiveSamplingParameters {
    ///     tolerance: 5.0,
    ///     start_step: 0.01,
    ///     min_step: 1.0e-5,
    ///     max_step: 0.05,
    /// };
    /// let samples: Vec<_> = orbit
    ///     .adaptive_sample(units::J2000, units::J2000 + 0.075, &params)
    ///     .collect();
    /// assert!(samples.len() > 2);
    /// ```
    fn adaptive_sample(
        &self,
        start_time: f64,
        end_time: f64,
        params: &AdaptiveSamplingParameters,
    ) -> AdaptiveSampler<'_, Self>;
}

impl<O: Orbit + ?Sized> OrbitExt for O {
    fn adaptive_sample(
        &self,
        start_time: f64,
        end_time: f64,
        params: &AdaptiveSamplingParameters,
    ) -> AdaptiveSampler<'_, Self> {
        AdaptiveSampler::new(self, start_time, end_time, params)
    }
}
