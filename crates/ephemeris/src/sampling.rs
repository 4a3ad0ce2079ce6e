//! Trajectory sampling for orbit visualisation.
//!
//! Two strategies are provided, both as lazy iterators that borrow the orbit:
//!
//! - [`UniformSampler`]: fixed spacing, period-scaled by default
//! - [`AdaptiveSampler`]: step size chosen so that the straight segment
//!   between consecutive samples never strays from the true curve by more
//!   than a tolerance

use nalgebra::Vector3;
use serde::Deserialize;

use crate::orbit::{Orbit, OrbitSample};

/// Samples per orbital period used by the default uniform sampling
pub const DEFAULT_SAMPLES_PER_ORBIT: usize = 100;

/// Upper bound on the number of intervals a uniform sampler will produce
pub const MAX_UNIFORM_INTERVALS: usize = 100_000;

/// Smallest absolute step (days) the adaptive sampler will ever take,
/// whatever the configured minimum. Near present-day Julian dates this is
/// well above the spacing of representable times; a relative floor takes
/// over for larger ones.
pub const MIN_STEP_FLOOR: f64 = 1.0e-9;

/// Smallest step as a multiple of the current time. Keeps `time + step`
/// distinct from `time` for far-future dates.
const RELATIVE_STEP_FLOOR: f64 = 4.0 * f64::EPSILON;

/// Factor by which the adaptive step grows while tolerance allows
const STEP_GROWTH: f64 = 1.25;

/// Parameters for adaptive sampling
///
/// # Examples
///
/// ```
/// use ephemeris::AdaptiveSamplingParameters;
///
/// // Defaults: 1 km tolerance, steps between one minute and 30 days
/// let params = AdaptiveSamplingParameters::default();
/// assert_eq!(params.max_step, 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveSamplingParameters {
    /// Maximum allowed chord-to-arc deviation (km)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Initial step (days)
    #[serde(default = "default_start_step")]
    pub start_step: f64,
    /// Smallest step the sampler may shrink to (days)
    #[serde(default = "default_min_step")]
    pub min_step: f64,
    /// Largest step the sampler may grow to (days)
    #[serde(default = "default_max_step")]
    pub max_step: f64,
}

fn default_tolerance() -> f64 {
    1.0
}

fn default_start_step() -> f64 {
    1.0
}

fn default_min_step() -> f64 {
    1.0 / 1440.0
}

fn default_max_step() -> f64 {
    30.0
}

impl Default for AdaptiveSamplingParameters {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            start_step: default_start_step(),
            min_step: default_min_step(),
            max_step: default_max_step(),
        }
    }
}

/// Uniformly spaced samples over a closed interval.
///
/// The first sample is at the start time and the last exactly at the end
/// time. A reversed interval produces no samples.
#[derive(Debug)]
pub struct UniformSampler<'a, O: Orbit + ?Sized> {
    orbit: &'a O,
    start_time: f64,
    end_time: f64,
    intervals: usize,
    next_index: usize,
    exhausted: bool,
}

impl<'a, O: Orbit + ?Sized> UniformSampler<'a, O> {
    /// Samples spaced no more than `step` days apart
    pub fn new(orbit: &'a O, start_time: f64, end_time: f64, step: f64) -> Self {
        let span = end_time - start_time;
        // NaN spans fall through to the empty case
        let (intervals, exhausted) = if !(span >= 0.0) {
            (0, true)
        } else if span == 0.0 || !(step > 0.0) {
            (0, false)
        } else {
            let intervals = (span / step).ceil().min(MAX_UNIFORM_INTERVALS as f64) as usize;
            (intervals.max(1), false)
        };

        Self {
            orbit,
            start_time,
            end_time,
            intervals,
            next_index: 0,
            exhausted,
        }
    }

    /// Samples spaced by the orbit's characteristic step
    pub fn with_default_step(orbit: &'a O, start_time: f64, end_time: f64) -> Self {
        let period = orbit.period();
        let step = if orbit.is_periodic() && period > 0.0 {
            period / DEFAULT_SAMPLES_PER_ORBIT as f64
        } else {
            (end_time - start_time) / DEFAULT_SAMPLES_PER_ORBIT as f64
        };
        Self::new(orbit, start_time, end_time, step)
    }
}

impl<O: Orbit + ?Sized> Iterator for UniformSampler<'_, O> {
    type Item = OrbitSample;

    fn next(&mut self) -> Option<OrbitSample> {
        if self.exhausted || self.next_index > self.intervals {
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;

        let time = if index == self.intervals {
            self.end_time
        } else {
            let fraction = index as f64 / self.intervals as f64;
            self.start_time + (self.end_time - self.start_time) * fraction
        };

        Some(OrbitSample {
            time,
            position: self.orbit.position_at_time(time),
            velocity: self.orbit.velocity_at_time(time),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.exhausted {
            0
        } else {
            (self.intervals + 1).saturating_sub(self.next_index)
        };
        (remaining, Some(remaining))
    }
}

/// Adaptive-step samples over a closed interval.
///
/// Each step starts from the previously accepted step length. While the
/// deviation between the chord midpoint and the true midpoint position
/// exceeds the tolerance the step is bisected, down to the minimum step;
/// otherwise it grows geometrically as long as the grown step still meets
/// the tolerance, up to the maximum step. Sample times strictly increase and
/// the final sample lands on the end time.
#[derive(Debug)]
pub struct AdaptiveSampler<'a, O: Orbit + ?Sized> {
    orbit: &'a O,
    end_time: f64,
    tolerance: f64,
    min_step: f64,
    max_step: f64,
    step: f64,
    time: f64,
    last_position: Vector3<f64>,
    last_velocity: Vector3<f64>,
    started: bool,
    finished: bool,
}

impl<'a, O: Orbit + ?Sized> AdaptiveSampler<'a, O> {
    pub fn new(
        orbit: &'a O,
        start_time: f64,
        end_time: f64,
        params: &AdaptiveSamplingParameters,
    ) -> Self {
        let min_step = if params.min_step > MIN_STEP_FLOOR {
            params.min_step
        } else {
            MIN_STEP_FLOOR
        };
        let max_step = if params.max_step > min_step {
            params.max_step
        } else {
            min_step
        };
        let step = if params.start_step.is_finite() {
            params.start_step.clamp(min_step, max_step)
        } else {
            max_step
        };
        let tolerance = if params.tolerance > 0.0 {
            params.tolerance
        } else {
            0.0
        };

        Self {
            orbit,
            end_time,
            tolerance,
            min_step,
            max_step,
            step,
            time: start_time,
            last_position: orbit.position_at_time(start_time),
            last_velocity: orbit.velocity_at_time(start_time),
            started: false,
            // NaN bounds and reversed intervals produce nothing
            finished: !(end_time >= start_time),
        }
    }

    /// Distance between the chord midpoint and the curve midpoint for a step of `dt`
    fn deviation(&self, dt: f64) -> f64 {
        let end = self.orbit.position_at_time(self.time + dt);
        let middle = self.orbit.position_at_time(self.time + dt / 2.0);
        ((self.last_position + end) / 2.0 - middle).norm()
    }
}

impl<O: Orbit + ?Sized> Iterator for AdaptiveSampler<'_, O> {
    type Item = OrbitSample;

    fn next(&mut self) -> Option<OrbitSample> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            if self.time >= self.end_time {
                self.finished = true;
            }
            return Some(OrbitSample {
                time: self.time,
                position: self.last_position,
                velocity: self.last_velocity,
            });
        }

        let remaining = self.end_time - self.time;
        let max_step = self.max_step.min(remaining);
        // Steps below a few ulps of the current time would not advance it
        let min_step = self
            .min_step
            .max(self.time.abs() * RELATIVE_STEP_FLOOR)
            .min(max_step);
        let mut dt = self.step.clamp(min_step, max_step);

        if self.deviation(dt) > self.tolerance {
            while dt > min_step {
                dt = (dt / 2.0).max(min_step);
                if self.deviation(dt) <= self.tolerance {
                    break;
                }
            }
        } else {
            while dt < max_step {
                let grown = (dt * STEP_GROWTH).min(max_step);
                if self.deviation(grown) > self.tolerance {
                    break;
                }
                dt = grown;
            }
        }

        self.step = dt;
        self.time = if dt >= remaining {
            self.end_time
        } else {
            self.time + dt
        };
        if self.time >= self.end_time {
            self.finished = true;
        }

        self.last_position = self.orbit.position_at_time(self.time);
        self.last_velocity = self.orbit.velocity_at_time(self.time);

        Some(OrbitSample {
            time: self.time,
            position: self.last_position,
            velocity: self.last_velocity,
        })
    }
}
