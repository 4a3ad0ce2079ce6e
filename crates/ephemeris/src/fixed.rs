use nalgebra::Vector3;

use crate::orbit::{Orbit, Samples};

/// A body held at a constant position in its frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOrbit {
    position: Vector3<f64>,
}

impl FixedOrbit {
    pub fn new(position: Vector3<f64>) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Vector3<f64> {
        self.position
    }
}

impl Orbit for FixedOrbit {
    fn position_at_time(&self, _tdb: f64) -> Vector3<f64> {
        self.position
    }

    fn velocity_at_time(&self, _tdb: f64) -> Vector3<f64> {
        Vector3::zeros()
    }

    fn period(&self) -> f64 {
        0.0
    }

    fn bounding_radius(&self) -> f64 {
        self.position.norm()
    }

    fn is_periodic(&self) -> bool {
        false
    }

    // Nothing to draw for a stationary point
    fn sample(&self, _start_time: f64, _end_time: f64) -> Samples<'_> {
        Box::new(std::iter::empty())
    }
}
