//! Per-object frame trees and their culling aggregates.
//!
//! A star's tree holds every phase whose orbit frame is centred on the star;
//! a body's tree holds the phases centred on that body. The aggregates let a
//! renderer reject an entire subtree with one sphere test.
//!
//! Trees only store data. The operations that walk between trees (dirty
//! propagation, recomputation) need the bodies and phases as well and live on
//! [`Universe`](crate::Universe).

use std::sync::Arc;

use nalgebra::UnitQuaternion;

use crate::frame::{BodyMeanEquatorFrame, J2000EclipticFrame, ReferenceFrame};
use crate::ids::{BodyId, PhaseId, StarId};
use crate::selection::Selection;

/// Aggregate culling data for everything below a frame tree node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CullingBounds {
    /// Radius (km) around the owner containing every child orbit, every
    /// child's culling sphere and every grandchild subtree
    pub bounding_sphere_radius: f64,
    /// Largest plain body radius (km) anywhere in the subtree
    pub max_child_radius: f64,
    pub contains_secondary_illuminators: bool,
    /// Bitwise OR of [`BodyClass::bit`](crate::BodyClass::bit) over the subtree
    pub child_class_mask: u32,
}

#[derive(Debug)]
pub struct FrameTree {
    owner: Selection,
    default_frame: Arc<dyn ReferenceFrame>,
    children: Vec<PhaseId>,
    bounds: CullingBounds,
    changed: bool,
}

impl FrameTree {
    /// Tree rooted at a star; default frame is J2000 ecliptic on the star
    pub(crate) fn for_star(star: StarId) -> Self {
        Self::new(Selection::Star(star), Arc::new(J2000EclipticFrame::new(star)))
    }

    /// Tree of a body; default frame is the body's mean equator
    pub(crate) fn for_body(body: BodyId, equator: UnitQuaternion<f64>) -> Self {
        Self::new(
            Selection::Body(body),
            Arc::new(BodyMeanEquatorFrame::new(body, equator)),
        )
    }

    fn new(owner: Selection, default_frame: Arc<dyn ReferenceFrame>) -> Self {
        Self {
            owner,
            default_frame,
            children: Vec::new(),
            bounds: CullingBounds::default(),
            changed: false,
        }
    }

    pub fn owner(&self) -> Selection {
        self.owner
    }

    /// Trees owned by stars are roots; dirtiness does not propagate past them
    pub fn is_root(&self) -> bool {
        matches!(self.owner, Selection::Star(_))
    }

    pub fn default_frame(&self) -> &Arc<dyn ReferenceFrame> {
        &self.default_frame
    }

    pub fn children(&self) -> &[PhaseId] {
        &self.children
    }

    pub fn child(&self, n: usize) -> Option<PhaseId> {
        self.children.get(n).copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn contains_child(&self, phase: PhaseId) -> bool {
        self.children.contains(&phase)
    }

    /// Aggregates as of the last recomputation
    pub fn bounds(&self) -> CullingBounds {
        self.bounds
    }

    pub fn bounding_sphere_radius(&self) -> f64 {
        self.bounds.bounding_sphere_radius
    }

    pub fn max_child_radius(&self) -> f64 {
        self.bounds.max_child_radius
    }

    pub fn contains_secondary_illuminators(&self) -> bool {
        self.bounds.contains_secondary_illuminators
    }

    pub fn child_class_mask(&self) -> u32 {
        self.bounds.child_class_mask
    }

    /// True when the aggregates may be stale
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn push_child(&mut self, phase: PhaseId) {
        self.children.push(phase);
    }

    /// Removes the first occurrence, keeping the order of the rest
    pub(crate) fn remove_child(&mut self, phase: PhaseId) -> bool {
        match self.children.iter().position(|&child| child == phase) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_changed(&mut self, changed: bool) {
        self.changed = changed;
    }

    pub(crate) fn set_bounds(&mut self, bounds: CullingBounds) {
        self.bounds = bounds;
    }
}
