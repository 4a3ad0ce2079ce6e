//! Trajectories valid only over a window, extended by Keplerian approximations.

use std::sync::Arc;

use nalgebra::Vector3;
use units::Mass;

use crate::elliptical::EllipticalOrbit;
use crate::error::EphemerisError;
use crate::orbit::{Orbit, Samples, VELOCITY_DIFF_DELTA};
use crate::state_vector::state_vector_to_orbit;

/// A primary orbit valid on `[begin, end)`, continued before and after the
/// window by elliptical orbits fitted to the primary's state at each edge.
///
/// Queries never fail outside the window: they degrade to the osculating
/// ellipse, which is continuous with the primary at both edges.
#[derive(Debug, Clone)]
pub struct MixedOrbit {
    primary: Arc<dyn Orbit>,
    begin: f64,
    end: f64,
    before: EllipticalOrbit,
    after: EllipticalOrbit,
    bounding_radius: f64,
}

impl MixedOrbit {
    /// Wraps `primary`, fitting the approximations around `central_mass`.
    ///
    /// Edge velocities are one-sided one-minute differences taken inside
    /// the window.
    pub fn new(
        primary: Arc<dyn Orbit>,
        begin: f64,
        end: f64,
        central_mass: Mass,
    ) -> Result<Self, EphemerisError> {
        if !(begin < end) {
            return Err(EphemerisError::EmptyInterval { begin, end });
        }

        let p0 = primary.position_at_time(begin);
        let p1 = primary.position_at_time(end);
        let v0 = (primary.position_at_time(begin + VELOCITY_DIFF_DELTA) - p0) / VELOCITY_DIFF_DELTA;
        let v1 = (p1 - primary.position_at_time(end - VELOCITY_DIFF_DELTA)) / VELOCITY_DIFF_DELTA;

        let before = state_vector_to_orbit(p0, v0, central_mass, begin)?;
        let after = state_vector_to_orbit(p1, v1, central_mass, end)?;

        let bounding_radius = primary
            .bounding_radius()
            .max(before.bounding_radius())
            .max(after.bounding_radius());

        Ok(Self {
            primary,
            begin,
            end,
            before,
            after,
            bounding_radius,
        })
    }

    pub fn primary(&self) -> &Arc<dyn Orbit> {
        &self.primary
    }

    pub fn begin(&self) -> f64 {
        self.begin
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Approximation used for times before `begin`
    pub fn before(&self) -> &EllipticalOrbit {
        &self.before
    }

    /// Approximation used for times at or after `end`
    pub fn after(&self) -> &EllipticalOrbit {
        &self.after
    }

    fn orbit_at(&self, tdb: f64) -> &dyn Orbit {
        if tdb < self.begin {
            &self.before
        } else if tdb < self.end {
            self.primary.as_ref()
        } else {
            &self.after
        }
    }
}

impl Orbit for MixedOrbit {
    fn position_at_time(&self, tdb: f64) -> Vector3<f64> {
        self.orbit_at(tdb).position_at_time(tdb)
    }

    fn velocity_at_time(&self, tdb: f64) -> Vector3<f64> {
        self.orbit_at(tdb).velocity_at_time(tdb)
    }

    fn period(&self) -> f64 {
        self.primary.period()
    }

    fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    fn is_periodic(&self) -> bool {
        self.primary.is_periodic()
    }

    fn sample(&self, start_time: f64, end_time: f64) -> Samples<'_> {
        let mut pieces: Vec<Samples<'_>> = Vec::with_capacity(3);
        if start_time < self.begin {
            pieces.push(self.before.sample(start_time, end_time.min(self.begin)));
        }
        if start_time < self.end && end_time > self.begin {
            pieces.push(
                self.primary
                    .sample(start_time.max(self.begin), end_time.min(self.end)),
            );
        }
        if end_time > self.end {
            pieces.push(self.after.sample(start_time.max(self.end), end_time));
        }

        // Adjacent pieces share their boundary sample
        let mut last_time = f64::NEG_INFINITY;
        Box::new(pieces.into_iter().flatten().filter(move |sample| {
            if sample.time > last_time {
                last_time = sample.time;
                true
            } else {
                false
            }
        }))
    }
}
