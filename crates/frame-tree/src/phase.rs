//! Timeline phases and their shared storage.
//!
//! A phase is reachable from two places: the timeline of the body it moves
//! and the frame tree of the object it orbits. Neither owns it outright, so
//! phases sit in a [`PhaseArena`] with an explicit reference count and are
//! dropped when the last holder releases them.

use std::sync::Arc;

use ephemeris::Orbit;

use crate::arena::Arena;
use crate::error::FrameTreeError;
use crate::frame::ReferenceFrame;
use crate::ids::{BodyId, PhaseId};
use crate::selection::Selection;

/// One stretch of a body's history: a single orbit in a single frame over
/// `[start, end)`.
#[derive(Debug, Clone)]
pub struct TimelinePhase {
    body: BodyId,
    parent: Selection,
    start: f64,
    end: f64,
    orbit: Arc<dyn Orbit>,
    orbit_frame: Arc<dyn ReferenceFrame>,
}

impl TimelinePhase {
    /// The parent is whatever `orbit_frame` is centred on.
    ///
    /// # Errors
    ///
    /// - [`FrameTreeError::EmptyPhaseInterval`] unless `start < end`
    /// - [`FrameTreeError::SelfCenteredFrame`] when the frame is centred on `body`
    pub fn new(
        body: BodyId,
        start: f64,
        end: f64,
        orbit: Arc<dyn Orbit>,
        orbit_frame: Arc<dyn ReferenceFrame>,
    ) -> Result<Self, FrameTreeError> {
        if !(start < end) {
            return Err(FrameTreeError::EmptyPhaseInterval { start, end });
        }
        let parent = orbit_frame.center();
        if parent == Selection::Body(body) {
            return Err(FrameTreeError::SelfCenteredFrame(body));
        }

        Ok(Self {
            body,
            parent,
            start,
            end,
            orbit,
            orbit_frame,
        })
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    /// Object whose frame tree holds this phase
    pub fn parent(&self) -> Selection {
        self.parent
    }

    pub fn start_time(&self) -> f64 {
        self.start
    }

    pub fn end_time(&self) -> f64 {
        self.end
    }

    pub fn orbit(&self) -> &Arc<dyn Orbit> {
        &self.orbit
    }

    pub fn orbit_frame(&self) -> &Arc<dyn ReferenceFrame> {
        &self.orbit_frame
    }

    /// True for `start <= tdb < end`
    pub fn includes(&self, tdb: f64) -> bool {
        self.start <= tdb && tdb < self.end
    }
}

#[derive(Debug)]
struct PhaseEntry {
    phase: TimelinePhase,
    ref_count: u32,
}

/// Reference-counted phase storage.
///
/// Freshly inserted phases have a count of zero; each holder calls
/// [`PhaseArena::add_ref`] when it starts referring to a phase and
/// [`PhaseArena::release`] when it stops.
#[derive(Debug, Default)]
pub struct PhaseArena {
    entries: Arena<PhaseId, PhaseEntry>,
}

impl PhaseArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, phase: TimelinePhase) -> PhaseId {
        self.entries.insert(PhaseEntry {
            phase,
            ref_count: 0,
        })
    }

    pub fn get(&self, id: PhaseId) -> Option<&TimelinePhase> {
        self.entries.get(id).map(|entry| &entry.phase)
    }

    pub fn contains(&self, id: PhaseId) -> bool {
        self.entries.contains(id)
    }

    pub fn ref_count(&self, id: PhaseId) -> Option<u32> {
        self.entries.get(id).map(|entry| entry.ref_count)
    }

    /// Returns the new count
    pub fn add_ref(&mut self, id: PhaseId) -> Result<u32, FrameTreeError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(FrameTreeError::UnknownPhase(id))?;
        entry.ref_count += 1;
        Ok(entry.ref_count)
    }

    /// Drops one reference, freeing the phase when none remain.
    ///
    /// Returns the phase if this call freed it.
    pub fn release(&mut self, id: PhaseId) -> Result<Option<TimelinePhase>, FrameTreeError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(FrameTreeError::UnknownPhase(id))?;
        entry.ref_count = entry.ref_count.saturating_sub(1);
        if entry.ref_count > 0 {
            return Ok(None);
        }
        Ok(self.entries.remove(id).map(|entry| entry.phase))
    }

    /// Removes a phase nobody has referenced yet
    pub(crate) fn discard_unreferenced(&mut self, id: PhaseId) -> Option<TimelinePhase> {
        match self.entries.get(id) {
            Some(entry) if entry.ref_count == 0 => self.entries.remove(id).map(|entry| entry.phase),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PhaseId, &TimelinePhase)> + '_ {
        self.entries.iter().map(|(id, entry)| (id, &entry.phase))
    }
}
