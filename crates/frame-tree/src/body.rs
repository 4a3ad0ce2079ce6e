//! Stars and solar-system bodies as seen by the frame hierarchy.
//!
//! Only the properties that feed culling aggregates are kept here: size,
//! classification, and whether the body reflects enough light to illuminate
//! its neighbours.

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::frame_tree::FrameTree;
use crate::timeline::Timeline;

/// Classification of a solar-system body
///
/// Each class maps to one bit of a frame tree's child class mask, so a
/// renderer can skip whole subtrees that contain nothing it wants to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyClass {
    Planet,
    Moon,
    Asteroid,
    Comet,
    Spacecraft,
    Invisible,
    Barycenter,
    SmallBody,
    DwarfPlanet,
    SurfaceFeature,
    Component,
    MinorMoon,
    Diffuse,
    Unknown,
}

impl BodyClass {
    /// Bit used for this class in [`CullingBounds::child_class_mask`](crate::CullingBounds)
    pub fn bit(self) -> u32 {
        match self {
            Self::Planet => 0x0001,
            Self::Moon => 0x0002,
            Self::Asteroid => 0x0004,
            Self::Comet => 0x0008,
            Self::Spacecraft => 0x0010,
            Self::Invisible => 0x0020,
            Self::Barycenter => 0x0040,
            Self::SmallBody => 0x0080,
            Self::DwarfPlanet => 0x0100,
            Self::SurfaceFeature => 0x0400,
            Self::Component => 0x0800,
            Self::MinorMoon => 0x1000,
            Self::Diffuse => 0x2000,
            Self::Unknown => 0x1_0000,
        }
    }
}

/// A planet, moon, spacecraft or other object that moves along a timeline.
#[derive(Debug)]
pub struct Body {
    name: String,
    radius: f64,
    culling_radius: f64,
    class: BodyClass,
    secondary_illuminator: bool,
    equator: UnitQuaternion<f64>,
    pub(crate) timeline: Timeline,
    pub(crate) frame_tree: Option<FrameTree>,
}

impl Body {
    /// A body of mean radius `radius` km. The culling radius starts equal to
    /// the radius.
    pub fn new(name: impl Into<String>, radius: f64) -> Self {
        Self {
            name: name.into(),
            radius,
            culling_radius: radius,
            class: BodyClass::Unknown,
            secondary_illuminator: false,
            equator: UnitQuaternion::identity(),
            timeline: Timeline::new(),
            frame_tree: None,
        }
    }

    pub fn with_class(mut self, class: BodyClass) -> Self {
        self.class = class;
        self
    }

    /// Radius of the sphere enclosing everything drawn for the body (rings,
    /// atmosphere); never smaller than the body radius
    pub fn with_culling_radius(mut self, culling_radius: f64) -> Self {
        self.culling_radius = culling_radius.max(self.radius);
        self
    }

    pub fn with_secondary_illuminator(mut self, secondary_illuminator: bool) -> Self {
        self.secondary_illuminator = secondary_illuminator;
        self
    }

    /// Rotation from the body's mean equator axes to universal axes
    pub fn with_equator(mut self, equator: UnitQuaternion<f64>) -> Self {
        self.equator = equator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn culling_radius(&self) -> f64 {
        self.culling_radius
    }

    pub fn class(&self) -> BodyClass {
        self.class
    }

    pub fn is_secondary_illuminator(&self) -> bool {
        self.secondary_illuminator
    }

    pub fn equator(&self) -> UnitQuaternion<f64> {
        self.equator
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The tree of objects orbiting this body, once anything does
    pub fn frame_tree(&self) -> Option<&FrameTree> {
        self.frame_tree.as_ref()
    }

    pub(crate) fn set_radius(&mut self, radius: f64) {
        self.radius = radius;
        self.culling_radius = self.culling_radius.max(radius);
    }

    pub(crate) fn set_culling_radius(&mut self, culling_radius: f64) {
        self.culling_radius = culling_radius.max(self.radius);
    }

    pub(crate) fn set_class(&mut self, class: BodyClass) {
        self.class = class;
    }

    pub(crate) fn set_secondary_illuminator(&mut self, secondary_illuminator: bool) {
        self.secondary_illuminator = secondary_illuminator;
    }
}

/// A star: the fixed root of a planetary system.
#[derive(Debug)]
pub struct Star {
    name: String,
    position: Vector3<f64>,
    radius: f64,
    pub(crate) frame_tree: FrameTree,
}

impl Star {
    pub(crate) fn new(name: String, position: Vector3<f64>, radius: f64, frame_tree: FrameTree) -> Self {
        Self {
            name,
            position,
            radius,
            frame_tree,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universal position (km)
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn frame_tree(&self) -> &FrameTree {
        &self.frame_tree
    }
}
