//! Tabulated trajectories with cubic Hermite interpolation.

use nalgebra::Vector3;

use crate::caching::{CachingOrbit, OrbitComputation};
use crate::error::EphemerisError;
use crate::orbit::ValidRange;

/// A trajectory given as a table of `(time, position)` samples.
///
/// Positions between samples are interpolated with a cubic Hermite spline
/// whose tangents come from finite differences of neighbouring samples.
/// Outside the table the position is clamped to the first or last entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledTrajectory {
    times: Vec<f64>,
    positions: Vec<Vector3<f64>>,
    tangents: Vec<Vector3<f64>>,
    bounding_radius: f64,
}

impl SampledTrajectory {
    /// Builds the table. Needs at least two samples with strictly increasing
    /// times.
    pub fn new(samples: Vec<(f64, Vector3<f64>)>) -> Result<Self, EphemerisError> {
        if samples.len() < 2 {
            return Err(EphemerisError::TooFewSamples(samples.len()));
        }
        if let Some(index) = samples
            .windows(2)
            .position(|pair| !(pair[1].0 > pair[0].0))
        {
            return Err(EphemerisError::UnorderedSamples(index + 1));
        }

        let (times, positions): (Vec<f64>, Vec<Vector3<f64>>) = samples.into_iter().unzip();
        let last = times.len() - 1;
        let tangents = (0..=last)
            .map(|i| {
                let (lo, hi) = match i {
                    0 => (0, 1),
                    i if i == last => (last - 1, last),
                    i => (i - 1, i + 1),
                };
                (positions[hi] - positions[lo]) / (times[hi] - times[lo])
            })
            .collect();
        let bounding_radius = positions.iter().map(|p| p.norm()).fold(0.0, f64::max);

        Ok(Self {
            times,
            positions,
            tangents,
            bounding_radius,
        })
    }

    /// Wraps the table in a memoising orbit
    pub fn cached(self) -> CachingOrbit<Self> {
        CachingOrbit::new(self)
    }

    pub fn sample_count(&self) -> usize {
        self.times.len()
    }

    pub fn start_time(&self) -> f64 {
        self.times[0]
    }

    pub fn end_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Index `i` of the interval `[times[i], times[i + 1]]` containing `tdb`,
    /// or `None` when `tdb` is outside the table
    fn interval(&self, tdb: f64) -> Option<usize> {
        if !(tdb >= self.start_time() && tdb <= self.end_time()) {
            return None;
        }
        let upper = self.times.partition_point(|&t| t <= tdb);
        Some(upper.saturating_sub(1).min(self.times.len() - 2))
    }
}

impl OrbitComputation for SampledTrajectory {
    fn compute_position(&self, tdb: f64) -> Vector3<f64> {
        let Some(i) = self.interval(tdb) else {
            return if tdb < self.start_time() {
                self.positions[0]
            } else {
                self.positions[self.positions.len() - 1]
            };
        };

        let h = self.times[i + 1] - self.times[i];
        let s = (tdb - self.times[i]) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        self.positions[i] * h00
            + self.tangents[i] * (h10 * h)
            + self.positions[i + 1] * h01
            + self.tangents[i + 1] * (h11 * h)
    }

    fn compute_velocity(&self, tdb: f64) -> Vector3<f64> {
        let Some(i) = self.interval(tdb) else {
            return Vector3::zeros();
        };

        let h = self.times[i + 1] - self.times[i];
        let s = (tdb - self.times[i]) / h;
        let s2 = s * s;

        let d00 = 6.0 * s2 - 6.0 * s;
        let d10 = 3.0 * s2 - 4.0 * s + 1.0;
        let d01 = -6.0 * s2 + 6.0 * s;
        let d11 = 3.0 * s2 - 2.0 * s;

        (self.positions[i] * d00 + self.positions[i + 1] * d01) / h
            + self.tangents[i] * d10
            + self.tangents[i + 1] * d11
    }

    fn period(&self) -> f64 {
        self.end_time() - self.start_time()
    }

    fn bounding_radius(&self) -> f64 {
        self.bounding_radius
    }

    fn is_periodic(&self) -> bool {
        false
    }

    fn valid_range(&self) -> ValidRange {
        ValidRange::new(self.start_time(), self.end_time())
    }
}
