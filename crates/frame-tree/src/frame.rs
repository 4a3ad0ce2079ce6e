//! Reference frames used to place orbits in the universe.
//!
//! A frame is an origin (the centre object) plus a set of axes. Universal
//! coordinates are J2000 ecliptic axes; every frame reports the rotation from
//! its own axes to those.

use std::fmt;

use nalgebra::{UnitQuaternion, Vector3};

use crate::selection::Selection;

/// Obliquity of the ecliptic at J2000 (degrees)
pub const J2000_OBLIQUITY_DEGREES: f64 = 23.439_291_1;

/// A time-dependent coordinate frame centred on a star or body.
pub trait ReferenceFrame: Send + Sync + fmt::Debug {
    /// Object the frame origin follows
    fn center(&self) -> Selection;

    /// Rotation taking frame axes to universal axes at `tdb`
    fn orientation(&self, tdb: f64) -> UnitQuaternion<f64>;

    /// Converts a frame-relative point to universal coordinates, given the
    /// universal position of the frame centre at `tdb`.
    fn to_universal(
        &self,
        local: Vector3<f64>,
        center_position: Vector3<f64>,
        tdb: f64,
    ) -> Vector3<f64> {
        center_position + self.orientation(tdb) * local
    }

    /// Inverse of [`ReferenceFrame::to_universal`]
    fn from_universal(
        &self,
        universal: Vector3<f64>,
        center_position: Vector3<f64>,
        tdb: f64,
    ) -> Vector3<f64> {
        self.orientation(tdb).inverse() * (universal - center_position)
    }
}

/// Mean ecliptic and equinox of J2000; axes coincide with universal axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct J2000EclipticFrame {
    center: Selection,
}

impl J2000EclipticFrame {
    pub fn new(center: impl Into<Selection>) -> Self {
        Self {
            center: center.into(),
        }
    }
}

impl ReferenceFrame for J2000EclipticFrame {
    fn center(&self) -> Selection {
        self.center
    }

    fn orientation(&self, _tdb: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::identity()
    }
}

/// Mean Earth equator and equinox of J2000
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct J2000EquatorFrame {
    center: Selection,
}

impl J2000EquatorFrame {
    pub fn new(center: impl Into<Selection>) -> Self {
        Self {
            center: center.into(),
        }
    }
}

impl ReferenceFrame for J2000EquatorFrame {
    fn center(&self) -> Selection {
        self.center
    }

    fn orientation(&self, _tdb: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -J2000_OBLIQUITY_DEGREES.to_radians())
    }
}

/// Equatorial frame of a body with a fixed pole.
///
/// `equator` rotates body-equator axes into universal axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMeanEquatorFrame {
    center: Selection,
    equator: UnitQuaternion<f64>,
}

impl BodyMeanEquatorFrame {
    pub fn new(center: impl Into<Selection>, equator: UnitQuaternion<f64>) -> Self {
        Self {
            center: center.into(),
            equator,
        }
    }
}

impl ReferenceFrame for BodyMeanEquatorFrame {
    fn center(&self) -> Selection {
        self.center
    }

    fn orientation(&self, _tdb: f64) -> UnitQuaternion<f64> {
        self.equator
    }
}
