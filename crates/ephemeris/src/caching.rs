//! Memoisation for expensive orbit computations.
//!
//! Custom trajectory models (long periodic series, interpolated tables) can
//! be costly, and a body's position is typically requested several times per
//! frame at the same simulated time. [`CachingOrbit`] remembers the last
//! result and reuses it when the requested time matches exactly.

use std::fmt;

use nalgebra::Vector3;
use parking_lot::Mutex;

use crate::orbit::{Orbit, VELOCITY_DIFF_DELTA, ValidRange};

/// The computation behind a [`CachingOrbit`].
///
/// Mirrors [`Orbit`], with `compute_*` in place of the `*_at_time` queries.
pub trait OrbitComputation: Send + Sync + fmt::Debug {
    /// Position (km) at TDB Julian date `tdb`
    fn compute_position(&self, tdb: f64) -> Vector3<f64>;

    /// Velocity (km/day) at `tdb`; differentiates position by default
    fn compute_velocity(&self, tdb: f64) -> Vector3<f64> {
        let half = VELOCITY_DIFF_DELTA / 2.0;
        (self.compute_position(tdb + half) - self.compute_position(tdb - half))
            / VELOCITY_DIFF_DELTA
    }

    fn period(&self) -> f64;

    fn bounding_radius(&self) -> f64;

    fn is_periodic(&self) -> bool {
        true
    }

    fn valid_range(&self) -> ValidRange {
        ValidRange::ALWAYS
    }
}

/// Single-slot memo keyed by exact time.
///
/// Both slots describe `time`; asking for any other time clears them.
#[derive(Debug, Clone, Copy)]
struct CacheSlot {
    time: f64,
    position: Vector3<f64>,
    position_valid: bool,
    velocity: Vector3<f64>,
    velocity_valid: bool,
}

impl CacheSlot {
    fn empty() -> Self {
        Self {
            time: f64::NAN,
            position: Vector3::zeros(),
            position_valid: false,
            velocity: Vector3::zeros(),
            velocity_valid: false,
        }
    }

    fn retarget(&mut self, tdb: f64) {
        // NaN never compares equal, so NaN queries always recompute
        if self.time != tdb {
            self.time = tdb;
            self.position_valid = false;
            self.velocity_valid = false;
        }
    }
}

/// An orbit that memoises the last position and velocity of an
/// [`OrbitComputation`].
///
/// Results are bit-identical to calling the computation directly.
///
/// # Examples
///
/// ```
/// use ephemeris::{CachingOrbit, Orbit, SampledTrajectory};
/// use nalgebra::Vector3;
///
/// let table = SampledTrajectory::new(vec![
///     (0.0, Vector3::new(0.0, 0.0, 0.0)),
///     (1.0, Vector3::new(10.0, 0.0, 0.0)),
/// ])
/// .unwrap();
/// let orbit = CachingOrbit::new(table);
///
/// assert_eq!(orbit.position_at_time(0.5), orbit.position_at_time(0.5));
/// ```
pub struct CachingOrbit<C> {
    computation: C,
    cache: Mutex<CacheSlot>,
}

impl<C: OrbitComputation> CachingOrbit<C> {
    pub fn new(computation: C) -> Self {
        Self {
            computation,
            cache: Mutex::new(CacheSlot::empty()),
        }
    }

    /// The wrapped computation
    pub fn computation(&self) -> &C {
        &self.computation
    }

    pub fn into_inner(self) -> C {
        self.computation
    }
}

impl<C: fmt::Debug> fmt::Debug for CachingOrbit<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingOrbit")
            .field("computation", &self.computation)
            .finish_non_exhaustive()
    }
}

impl<C: OrbitComputation> Orbit for CachingOrbit<C> {
    fn position_at_time(&self, tdb: f64) -> Vector3<f64> {
        let mut slot = self.cache.lock();
        slot.retarget(tdb);
        if !slot.position_valid {
            slot.position = self.computation.compute_position(tdb);
            slot.position_valid = true;
        }
        slot.position
    }

    fn velocity_at_time(&self, tdb: f64) -> Vector3<f64> {
        let mut slot = self.cache.lock();
        slot.retarget(tdb);
        if !slot.velocity_valid {
            slot.velocity = self.computation.compute_velocity(tdb);
            slot.velocity_valid = true;
        }
        slot.velocity
    }

    fn period(&self) -> f64 {
        self.computation.period()
    }

    fn bounding_radius(&self) -> f64 {
        self.computation.bounding_radius()
    }

    fn is_periodic(&self) -> bool {
        self.computation.is_periodic()
    }

    fn valid_range(&self) -> ValidRange {
        self.computation.valid_range()
    }
}
