//! Hierarchical reference frames for a simulated universe.
//!
//! Every body moves along a [`Timeline`] of [`TimelinePhase`]s. A phase pairs
//! an orbit with the reference frame it is expressed in, and the frame's
//! centre decides which [`FrameTree`] the phase hangs from. Stars own the
//! root trees; a body gets a tree once something orbits it.
//!
//! All objects live in a [`Universe`] and are addressed by generational ids.

pub mod arena;
pub mod body;
pub mod config;
pub mod error;
pub mod frame;
pub mod frame_tree;
pub mod ids;
pub mod phase;
pub mod query;
pub mod selection;
pub mod timeline;
pub mod universe;

#[cfg(test)]
mod arena_test;
#[cfg(test)]
mod universe_test;

pub use arena::{Arena, ArenaId, SlotKey};
pub use body::{Body, BodyClass, Star};
pub use config::UniverseConfig;
pub use error::FrameTreeError;
pub use frame::{
    BodyMeanEquatorFrame, J2000_OBLIQUITY_DEGREES, J2000EclipticFrame, J2000EquatorFrame,
    ReferenceFrame,
};
pub use frame_tree::{CullingBounds, FrameTree};
pub use ids::{BodyId, PhaseId, StarId};
pub use phase::{PhaseArena, TimelinePhase};
pub use query::StateVector;
pub use selection::Selection;
pub use timeline::Timeline;
pub use universe::Universe;
