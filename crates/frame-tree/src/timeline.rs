//! Ordered, gap-free sequences of phases for one body.

use crate::ids::PhaseId;
use crate::phase::PhaseArena;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PhaseSpan {
    id: PhaseId,
    start: f64,
    end: f64,
}

/// The phases of a single body in time order.
///
/// Consecutive phases meet exactly: each phase starts at the previous one's
/// end time. Phase intervals are half-open, while [`Timeline::includes`]
/// treats the timeline as a whole as closed.
///
/// Spans are cached alongside the ids so time lookups need no arena access.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    phases: Vec<PhaseSpan>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a phase that begins where the timeline currently ends.
    ///
    /// On success the timeline takes a reference to the phase. Returns `false`
    /// and leaves everything untouched if the phase is unknown or would leave
    /// a gap or overlap.
    pub fn append_phase(&mut self, arena: &mut PhaseArena, id: PhaseId) -> bool {
        let Some(phase) = arena.get(id) else {
            return false;
        };
        let span = PhaseSpan {
            id,
            start: phase.start_time(),
            end: phase.end_time(),
        };
        if let Some(last) = self.phases.last() {
            if span.start != last.end {
                return false;
            }
        }
        if arena.add_ref(id).is_err() {
            return false;
        }
        self.phases.push(span);
        true
    }

    /// Phase active at `tdb`.
    ///
    /// Times before the first phase map to the first phase and times at or
    /// after the end map to the last. `None` only for an empty timeline.
    pub fn find_phase(&self, tdb: f64) -> Option<PhaseId> {
        if let [only] = self.phases.as_slice() {
            return Some(only.id);
        }
        self.phases
            .iter()
            .find(|span| tdb < span.end)
            .or(self.phases.last())
            .map(|span| span.id)
    }

    /// True for `start_time() <= tdb <= end_time()`
    pub fn includes(&self, tdb: f64) -> bool {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => start <= tdb && tdb <= end,
            _ => false,
        }
    }

    pub fn start_time(&self) -> Option<f64> {
        self.phases.first().map(|span| span.start)
    }

    pub fn end_time(&self) -> Option<f64> {
        self.phases.last().map(|span| span.end)
    }

    pub fn phase(&self, n: usize) -> Option<PhaseId> {
        self.phases.get(n).map(|span| span.id)
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> impl Iterator<Item = PhaseId> + '_ {
        self.phases.iter().map(|span| span.id)
    }

    /// Empties the timeline, handing back the phase ids in order. The
    /// caller becomes responsible for releasing them.
    pub(crate) fn take_phases(&mut self) -> Vec<PhaseId> {
        self.phases.drain(..).map(|span| span.id).collect()
    }
}
