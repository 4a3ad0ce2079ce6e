//! Read-only queries that resolve positions through the frame hierarchy.

use ephemeris::{OrbitExt, OrbitSample};
use nalgebra::Vector3;

use crate::error::FrameTreeError;
use crate::frame::ReferenceFrame;
use crate::ids::{BodyId, PhaseId, StarId};
use crate::phase::TimelinePhase;
use crate::selection::Selection;
use crate::universe::Universe;

/// Universal position (km) and velocity (km/day) of an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl Universe {
    /// Universal state of `object` at `tdb`.
    ///
    /// Bodies are placed by the phase active at `tdb`: the orbit position is
    /// taken through the phase's frame and added to the state of the frame
    /// centre, recursively down to a star.
    ///
    /// # Errors
    ///
    /// - unknown object
    /// - [`FrameTreeError::EmptyTimeline`] for a body, or an ancestor, with
    ///   no phases
    /// - [`FrameTreeError::FrameDepthExceeded`] past
    ///   [`UniverseConfig::max_frame_depth`](crate::UniverseConfig::max_frame_depth)
    pub fn state_at(&self, object: Selection, tdb: f64) -> Result<StateVector, FrameTreeError> {
        self.state_at_depth(object, tdb, 0)
    }

    fn state_at_depth(
        &self,
        object: Selection,
        tdb: f64,
        depth: usize,
    ) -> Result<StateVector, FrameTreeError> {
        if depth > self.config.max_frame_depth {
            return Err(FrameTreeError::FrameDepthExceeded(self.config.max_frame_depth));
        }

        match object {
            Selection::Star(id) => {
                let star = self.stars.get(id).ok_or(FrameTreeError::UnknownStar(id))?;
                Ok(StateVector {
                    position: star.position(),
                    velocity: Vector3::zeros(),
                })
            }
            Selection::Body(id) => {
                let phase = self.active_phase_entry(id, tdb)?;
                let frame = phase.orbit_frame();
                let center = self.state_at_depth(frame.center(), tdb, depth + 1)?;
                let orbit = phase.orbit();

                Ok(StateVector {
                    position: frame.to_universal(orbit.position_at_time(tdb), center.position, tdb),
                    velocity: center.velocity + frame.orientation(tdb) * orbit.velocity_at_time(tdb),
                })
            }
        }
    }

    pub fn position_at(&self, object: Selection, tdb: f64) -> Result<Vector3<f64>, FrameTreeError> {
        self.state_at(object, tdb).map(|state| state.position)
    }

    /// Phase of `body` active at `tdb`
    pub fn active_phase(&self, body: BodyId, tdb: f64) -> Result<PhaseId, FrameTreeError> {
        self.bodies
            .get(body)
            .ok_or(FrameTreeError::UnknownBody(body))?
            .timeline()
            .find_phase(tdb)
            .ok_or(FrameTreeError::EmptyTimeline(body))
    }

    fn active_phase_entry(&self, body: BodyId, tdb: f64) -> Result<&TimelinePhase, FrameTreeError> {
        let id = self.active_phase(body, tdb)?;
        self.phases.get(id).ok_or(FrameTreeError::UnknownPhase(id))
    }

    /// Converts a point given in `frame` to universal coordinates
    pub fn frame_to_universal(
        &self,
        frame: &dyn ReferenceFrame,
        local: Vector3<f64>,
        tdb: f64,
    ) -> Result<Vector3<f64>, FrameTreeError> {
        let center = self.position_at(frame.center(), tdb)?;
        Ok(frame.to_universal(local, center, tdb))
    }

    pub fn frame_from_universal(
        &self,
        frame: &dyn ReferenceFrame,
        universal: Vector3<f64>,
        tdb: f64,
    ) -> Result<Vector3<f64>, FrameTreeError> {
        let center = self.position_at(frame.center(), tdb)?;
        Ok(frame.from_universal(universal, center, tdb))
    }

    /// Bodies in the system of `star` whose culling sphere, at `tdb`, comes
    /// within `radius` of `point`.
    ///
    /// Subtrees are skipped when their stored bounding sphere cannot reach
    /// the query sphere. Dirty subtrees are always descended, so stale
    /// aggregates never hide a body. A phase places its body only while it is
    /// the body's active phase.
    pub fn bodies_within(
        &self,
        star: StarId,
        point: Vector3<f64>,
        radius: f64,
        tdb: f64,
    ) -> Result<Vec<BodyId>, FrameTreeError> {
        let origin = self
            .stars
            .get(star)
            .ok_or(FrameTreeError::UnknownStar(star))?
            .position();

        let mut found = Vec::new();
        let mut pending = vec![(Selection::Star(star), origin, 0usize)];
        while let Some((owner, owner_position, depth)) = pending.pop() {
            if depth > self.config.max_frame_depth {
                return Err(FrameTreeError::FrameDepthExceeded(self.config.max_frame_depth));
            }
            let Some(tree) = self.frame_tree(owner) else {
                continue;
            };

            for &phase_id in tree.children() {
                let Some(phase) = self.phases.get(phase_id) else {
                    continue;
                };
                let child = phase.body();
                if self.active_phase(child, tdb).ok() != Some(phase_id) {
                    continue;
                }
                let Some(body) = self.bodies.get(child) else {
                    continue;
                };

                let local = phase.orbit().position_at_time(tdb);
                let position = phase.orbit_frame().to_universal(local, owner_position, tdb);
                let distance = (position - point).norm();
                if distance <= radius + body.culling_radius() {
                    found.push(child);
                }

                if let Some(subtree) = body.frame_tree() {
                    let reach = radius + body.culling_radius() + subtree.bounding_sphere_radius();
                    if subtree.is_changed() || distance <= reach {
                        pending.push((Selection::Body(child), position, depth + 1));
                    }
                }
            }
        }

        tracing::trace!(star = %star, found = found.len(), "proximity query");
        Ok(found)
    }

    /// Adaptive samples of a phase's orbit over `[start, end]`, using the
    /// universe's sampling parameters
    pub fn trajectory(
        &self,
        phase: PhaseId,
        start: f64,
        end: f64,
    ) -> Result<Vec<OrbitSample>, FrameTreeError> {
        let phase = self
            .phases
            .get(phase)
            .ok_or(FrameTreeError::UnknownPhase(phase))?;
        Ok(phase
            .orbit()
            .as_ref()
            .adaptive_sample(start, end, &self.config.sampling)
            .collect())
    }
}
