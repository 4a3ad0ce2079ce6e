use thiserror::Error;

use crate::ids::{BodyId, PhaseId, StarId};
use crate::selection::Selection;

/// Errors from building or querying a frame hierarchy.
///
/// Every failing mutation leaves the universe unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameTreeError {
    #[error("unknown body {0}")]
    UnknownBody(BodyId),

    #[error("unknown star {0}")]
    UnknownStar(StarId),

    #[error("unknown timeline phase {0}")]
    UnknownPhase(PhaseId),

    #[error("phase interval [{start}, {end}) is empty")]
    EmptyPhaseInterval { start: f64, end: f64 },

    #[error("phase starting at {found} does not continue the timeline ending at {expected}")]
    PhaseDiscontinuity { expected: f64, found: f64 },

    #[error("orbit frame of {0} is centred on the body itself")]
    SelfCenteredFrame(BodyId),

    #[error("placing {body} in the frame of {parent} would create a cycle")]
    CyclicFrame { body: BodyId, parent: Selection },

    #[error("phase belongs to the frame tree of {expected}, not {found}")]
    ParentMismatch {
        expected: Selection,
        found: Selection,
    },

    #[error("{0} has an empty timeline")]
    EmptyTimeline(BodyId),

    #[error("frame hierarchy deeper than {0} levels")]
    FrameDepthExceeded(usize),

    #[error("{0} still has bodies in its frame tree")]
    BodyHasChildren(BodyId),

    #[error("an object named `{0}` already exists")]
    DuplicateName(String),
}
