//! The registry of stars, bodies and phases, and every operation that has
//! to look across them.
//!
//! # Dirty tracking
//!
//! Culling aggregates are maintained in two passes:
//!
//! 1. Structural edits call [`Universe::mark_changed`] on the affected tree.
//!    The flag climbs eagerly toward the star through the timeline of the
//!    tree's owner, stopping at trees that are already dirty.
//! 2. Before culling, the host calls [`Universe::update_culling_bounds`] on
//!    a star. Only dirty subtrees are recomputed; clean ones contribute their
//!    stored aggregates.

use std::collections::{HashMap, HashSet};

use nalgebra::Vector3;

use crate::arena::Arena;
use crate::body::{Body, BodyClass, Star};
use crate::config::UniverseConfig;
use crate::error::FrameTreeError;
use crate::frame_tree::{CullingBounds, FrameTree};
use crate::ids::{BodyId, PhaseId, StarId};
use crate::phase::{PhaseArena, TimelinePhase};
use crate::selection::Selection;

/// Owner of a frame hierarchy.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use ephemeris::FixedOrbit;
/// use frame_tree::{Body, J2000EclipticFrame, Selection, TimelinePhase, Universe};
/// use nalgebra::Vector3;
///
/// let mut universe = Universe::default();
/// let sun = universe.add_star("Sun", Vector3::zeros(), 695_700.0).unwrap();
/// let probe = universe.add_body(Body::new("Probe", 0.01)).unwrap();
///
/// let phase = TimelinePhase::new(
///     probe,
///     0.0,
///     1.0e7,
///     Arc::new(FixedOrbit::new(Vector3::new(1.0e6, 0.0, 0.0))),
///     Arc::new(J2000EclipticFrame::new(sun)),
/// )
/// .unwrap();
/// universe.append_phase(phase).unwrap();
///
/// let position = universe.position_at(Selection::Body(probe), 2_451_545.0).unwrap();
/// assert_eq!(position, Vector3::new(1.0e6, 0.0, 0.0));
/// ```
#[derive(Debug, Default)]
pub struct Universe {
    pub(crate) config: UniverseConfig,
    pub(crate) stars: Arena<StarId, Star>,
    pub(crate) bodies: Arena<BodyId, Body>,
    pub(crate) phases: PhaseArena,
    names: HashMap<String, Selection>,
}

impl Universe {
    pub fn new(config: UniverseConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }

    /// Adds a star fixed at universal `position` (km). Its frame tree is
    /// created with it.
    pub fn add_star(
        &mut self,
        name: impl Into<String>,
        position: Vector3<f64>,
        radius: f64,
    ) -> Result<StarId, FrameTreeError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(FrameTreeError::DuplicateName(name));
        }

        let id = self
            .stars
            .insert_with(|id| Star::new(name.clone(), position, radius, FrameTree::for_star(id)));
        tracing::debug!(star = %id, name = %name, "added star");
        self.names.insert(name, Selection::Star(id));
        Ok(id)
    }

    /// Adds a body with an empty timeline
    pub fn add_body(&mut self, body: Body) -> Result<BodyId, FrameTreeError> {
        if self.names.contains_key(body.name()) {
            return Err(FrameTreeError::DuplicateName(body.name().to_string()));
        }

        let name = body.name().to_string();
        let id = self.bodies.insert(body);
        tracing::debug!(body = %id, name = %name, "added body");
        self.names.insert(name, Selection::Body(id));
        Ok(id)
    }

    pub fn star(&self, id: StarId) -> Option<&Star> {
        self.stars.get(id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn phase(&self, id: PhaseId) -> Option<&TimelinePhase> {
        self.phases.get(id)
    }

    /// Number of holders (timeline, frame tree) of a live phase
    pub fn phase_ref_count(&self, id: PhaseId) -> Option<u32> {
        self.phases.ref_count(id)
    }

    pub fn phases(&self) -> &PhaseArena {
        &self.phases
    }

    pub fn stars(&self) -> impl Iterator<Item = (StarId, &Star)> + '_ {
        self.stars.iter()
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.bodies.iter()
    }

    pub fn find(&self, name: &str) -> Option<Selection> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, object: Selection) -> bool {
        match object {
            Selection::Star(id) => self.stars.contains(id),
            Selection::Body(id) => self.bodies.contains(id),
        }
    }

    /// The frame tree owned by `object`; bodies have one only once something
    /// has orbited them
    pub fn frame_tree(&self, object: Selection) -> Option<&FrameTree> {
        match object {
            Selection::Star(id) => self.stars.get(id).map(|star| &star.frame_tree),
            Selection::Body(id) => self.bodies.get(id).and_then(|body| body.frame_tree.as_ref()),
        }
    }

    fn frame_tree_mut(&mut self, object: Selection) -> Option<&mut FrameTree> {
        match object {
            Selection::Star(id) => self.stars.get_mut(id).map(|star| &mut star.frame_tree),
            Selection::Body(id) => self
                .bodies
                .get_mut(id)
                .and_then(|body| body.frame_tree.as_mut()),
        }
    }

    fn ensure_frame_tree(&mut self, object: Selection) -> Result<&mut FrameTree, FrameTreeError> {
        match object {
            Selection::Star(id) => self
                .stars
                .get_mut(id)
                .map(|star| &mut star.frame_tree)
                .ok_or(FrameTreeError::UnknownStar(id)),
            Selection::Body(id) => {
                let body = self
                    .bodies
                    .get_mut(id)
                    .ok_or(FrameTreeError::UnknownBody(id))?;
                let equator = body.equator();
                Ok(body.frame_tree.get_or_insert_with(|| {
                    tracing::debug!(body = %id, "created frame tree");
                    FrameTree::for_body(id, equator)
                }))
            }
        }
    }

    fn check_exists(&self, object: Selection) -> Result<(), FrameTreeError> {
        match object {
            Selection::Star(id) if !self.stars.contains(id) => Err(FrameTreeError::UnknownStar(id)),
            Selection::Body(id) if !self.bodies.contains(id) => Err(FrameTreeError::UnknownBody(id)),
            _ => Ok(()),
        }
    }

    /// Parents of every phase in a body's timeline, in timeline order
    fn timeline_parents(&self, body: BodyId) -> Vec<Selection> {
        self.bodies
            .get(body)
            .map(|body| {
                body.timeline
                    .phases()
                    .filter_map(|id| self.phases.get(id))
                    .map(TimelinePhase::parent)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True if some chain of phase parents starting at `from` reaches `target`
    fn frame_reaches(&self, from: Selection, target: BodyId) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![from];
        while let Some(object) = pending.pop() {
            if object == Selection::Body(target) {
                return true;
            }
            if let Selection::Body(body) = object {
                if visited.insert(body) {
                    pending.extend(self.timeline_parents(body));
                }
            }
        }
        false
    }

    /// Appends a phase to its body's timeline and adds it to the frame tree
    /// of its parent, creating that tree if needed.
    ///
    /// # Errors
    ///
    /// - unknown body or parent
    /// - [`FrameTreeError::CyclicFrame`] if the parent already moves, at some
    ///   time, in a frame centred on this body or its descendants
    /// - [`FrameTreeError::PhaseDiscontinuity`] if the phase does not start
    ///   where the timeline ends
    pub fn append_phase(&mut self, phase: TimelinePhase) -> Result<PhaseId, FrameTreeError> {
        let body = phase.body();
        let parent = phase.parent();
        let start = phase.start_time();
        if !self.bodies.contains(body) {
            return Err(FrameTreeError::UnknownBody(body));
        }
        self.check_exists(parent)?;
        if self.frame_reaches(parent, body) {
            return Err(FrameTreeError::CyclicFrame { body, parent });
        }

        let id = self.phases.insert(phase);
        let appended = match self.bodies.get_mut(body) {
            Some(target) => target.timeline.append_phase(&mut self.phases, id),
            None => false,
        };
        if !appended {
            self.phases.discard_unreferenced(id);
            let expected = self
                .bodies
                .get(body)
                .and_then(|target| target.timeline.end_time())
                .unwrap_or(start);
            tracing::warn!(
                body = %body,
                expected,
                found = start,
                "rejected discontinuous timeline phase"
            );
            return Err(FrameTreeError::PhaseDiscontinuity {
                expected,
                found: start,
            });
        }

        self.add_child(parent, id)?;
        tracing::debug!(body = %body, parent = %parent, phase = %id, "appended timeline phase");
        Ok(id)
    }

    /// Adds `phase` to the frame tree of `owner`, taking a reference to it.
    ///
    /// The owner must be the phase's parent.
    pub fn add_child(&mut self, owner: Selection, phase: PhaseId) -> Result<(), FrameTreeError> {
        let parent = self
            .phases
            .get(phase)
            .ok_or(FrameTreeError::UnknownPhase(phase))?
            .parent();
        if parent != owner {
            return Err(FrameTreeError::ParentMismatch {
                expected: parent,
                found: owner,
            });
        }
        self.check_exists(owner)?;

        self.phases.add_ref(phase)?;
        self.ensure_frame_tree(owner)?.push_child(phase);
        self.mark_changed(owner);
        Ok(())
    }

    /// Removes `phase` from the frame tree of `owner` and drops the tree's
    /// reference. Returns `false`, doing nothing, if the phase is not a child.
    pub fn remove_child(&mut self, owner: Selection, phase: PhaseId) -> bool {
        let removed = self
            .frame_tree_mut(owner)
            .is_some_and(|tree| tree.remove_child(phase));
        if !removed {
            return false;
        }

        if let Ok(Some(freed)) = self.phases.release(phase) {
            tracing::debug!(phase = %phase, body = %freed.body(), "freed timeline phase");
        }
        self.mark_changed(owner);
        true
    }

    /// Flags the tree of `owner` as stale.
    ///
    /// For a body-owned tree the flag propagates to the tree of every parent
    /// in the body's timeline; star trees are roots. Already-dirty trees stop
    /// the propagation. Objects without a tree are ignored.
    pub fn mark_changed(&mut self, owner: Selection) {
        let mut pending = vec![owner];
        while let Some(object) = pending.pop() {
            let Some(tree) = self.frame_tree_mut(object) else {
                continue;
            };
            if tree.is_changed() {
                continue;
            }
            tree.set_changed(true);
            if let Selection::Body(body) = object {
                pending.extend(self.timeline_parents(body));
            }
        }
    }

    /// Flags the parent trees of every phase of `body` as stale.
    ///
    /// Used when a body property that feeds culling changes.
    pub fn mark_timeline_changed(&mut self, body: BodyId) -> Result<(), FrameTreeError> {
        if !self.bodies.contains(body) {
            return Err(FrameTreeError::UnknownBody(body));
        }
        for parent in self.timeline_parents(body) {
            self.mark_changed(parent);
        }
        Ok(())
    }

    /// Clears the stale flag of `owner` and of every dirty tree below it
    pub fn mark_updated(&mut self, owner: Selection) {
        let mut pending = vec![owner];
        while let Some(object) = pending.pop() {
            let Some(tree) = self.frame_tree_mut(object) else {
                continue;
            };
            if !tree.is_changed() {
                continue;
            }
            tree.set_changed(false);
            let children = tree.children().to_vec();
            pending.extend(
                children
                    .into_iter()
                    .filter_map(|id| self.phases.get(id))
                    .map(|phase| Selection::Body(phase.body())),
            );
        }
    }

    /// Recomputes the culling aggregates of `owner` and of every dirty tree
    /// below it, children first. Clean trees are left alone.
    ///
    /// Stale flags are not cleared; see [`Universe::update_culling_bounds`].
    pub fn recompute_bounding_sphere(&mut self, owner: Selection) {
        self.recompute_subtree(owner, 0);
    }

    /// Recomputes aggregates below `owner`, then marks the subtree fresh
    pub fn update_culling_bounds(&mut self, owner: Selection) {
        self.recompute_bounding_sphere(owner);
        self.mark_updated(owner);
    }

    fn recompute_subtree(&mut self, owner: Selection, depth: usize) -> Option<CullingBounds> {
        let tree = self.frame_tree(owner)?;
        if !tree.is_changed() {
            return Some(tree.bounds());
        }
        if depth > self.config.max_frame_depth {
            tracing::warn!(owner = %owner, depth, "frame tree too deep, keeping stale bounds");
            return Some(tree.bounds());
        }

        let children = tree.children().to_vec();
        let mut bounds = CullingBounds::default();
        for phase_id in children {
            let Some(phase) = self.phases.get(phase_id) else {
                continue;
            };
            let child = phase.body();
            let orbit_radius = phase.orbit().bounding_radius();
            let Some(body) = self.bodies.get(child) else {
                continue;
            };

            let mut radius = body.culling_radius() + orbit_radius;
            bounds.max_child_radius = bounds.max_child_radius.max(body.radius());
            bounds.contains_secondary_illuminators |= body.is_secondary_illuminator();
            bounds.child_class_mask |= body.class().bit();

            if body.frame_tree.is_some() {
                if let Some(subtree) = self.recompute_subtree(Selection::Body(child), depth + 1) {
                    radius += subtree.bounding_sphere_radius;
                    bounds.max_child_radius = bounds.max_child_radius.max(subtree.max_child_radius);
                    bounds.contains_secondary_illuminators |=
                        subtree.contains_secondary_illuminators;
                    bounds.child_class_mask |= subtree.child_class_mask;
                }
            }

            bounds.bounding_sphere_radius = bounds.bounding_sphere_radius.max(radius);
        }

        tracing::trace!(
            owner = %owner,
            radius = bounds.bounding_sphere_radius,
            max_child_radius = bounds.max_child_radius,
            "recomputed culling bounds"
        );
        if let Some(tree) = self.frame_tree_mut(owner) {
            tree.set_bounds(bounds);
        }
        Some(bounds)
    }

    /// Culling aggregates of the tree owned by `object`, as last computed
    pub fn culling_bounds(&self, object: Selection) -> Option<CullingBounds> {
        self.frame_tree(object).map(FrameTree::bounds)
    }

    pub fn set_radius(&mut self, body: BodyId, radius: f64) -> Result<(), FrameTreeError> {
        self.body_mut(body)?.set_radius(radius);
        self.mark_timeline_changed(body)
    }

    pub fn set_culling_radius(&mut self, body: BodyId, culling_radius: f64) -> Result<(), FrameTreeError> {
        self.body_mut(body)?.set_culling_radius(culling_radius);
        self.mark_timeline_changed(body)
    }

    pub fn set_classification(&mut self, body: BodyId, class: BodyClass) -> Result<(), FrameTreeError> {
        self.body_mut(body)?.set_class(class);
        self.mark_timeline_changed(body)
    }

    pub fn set_secondary_illuminator(
        &mut self,
        body: BodyId,
        secondary_illuminator: bool,
    ) -> Result<(), FrameTreeError> {
        self.body_mut(body)?
            .set_secondary_illuminator(secondary_illuminator);
        self.mark_timeline_changed(body)
    }

    fn body_mut(&mut self, body: BodyId) -> Result<&mut Body, FrameTreeError> {
        self.bodies
            .get_mut(body)
            .ok_or(FrameTreeError::UnknownBody(body))
    }

    /// Empties a body's timeline: each phase leaves its parent's frame tree
    /// and the timeline's reference is dropped. Returns the number of phases
    /// removed.
    pub fn clear_timeline(&mut self, body: BodyId) -> Result<usize, FrameTreeError> {
        let phase_ids = self.body_mut(body)?.timeline.take_phases();
        for &id in &phase_ids {
            if let Some(parent) = self.phases.get(id).map(TimelinePhase::parent) {
                self.remove_child(parent, id);
            }
            if let Ok(Some(freed)) = self.phases.release(id) {
                tracing::debug!(phase = %id, body = %freed.body(), "freed timeline phase");
            }
        }
        tracing::debug!(body = %body, phases = phase_ids.len(), "cleared timeline");
        Ok(phase_ids.len())
    }

    /// Removes a body and its timeline.
    ///
    /// Refused while anything still orbits the body.
    pub fn remove_body(&mut self, body: BodyId) -> Result<Body, FrameTreeError> {
        let has_children = self
            .bodies
            .get(body)
            .ok_or(FrameTreeError::UnknownBody(body))?
            .frame_tree
            .as_ref()
            .is_some_and(|tree| tree.child_count() > 0);
        if has_children {
            return Err(FrameTreeError::BodyHasChildren(body));
        }

        self.clear_timeline(body)?;
        let removed = self
            .bodies
            .remove(body)
            .ok_or(FrameTreeError::UnknownBody(body))?;
        self.names.remove(removed.name());
        tracing::debug!(body = %body, name = removed.name(), "removed body");
        Ok(removed)
    }
}
