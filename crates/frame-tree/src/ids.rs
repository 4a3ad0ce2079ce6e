use std::fmt;

use crate::arena::{ArenaId, SlotKey};

/// Handle to a star in a [`Universe`](crate::Universe)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StarId(SlotKey);

/// Handle to a body (planet, moon, spacecraft, ...) in a [`Universe`](crate::Universe)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(SlotKey);

/// Handle to a timeline phase in a [`PhaseArena`](crate::PhaseArena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseId(SlotKey);

impl ArenaId for StarId {
    fn from_key(key: SlotKey) -> Self {
        StarId(key)
    }

    fn key(self) -> SlotKey {
        self.0
    }
}

impl ArenaId for BodyId {
    fn from_key(key: SlotKey) -> Self {
        BodyId(key)
    }

    fn key(self) -> SlotKey {
        self.0
    }
}

impl ArenaId for PhaseId {
    fn from_key(key: SlotKey) -> Self {
        PhaseId(key)
    }

    fn key(self) -> SlotKey {
        self.0
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "star#{}", self.0)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase#{}", self.0)
    }
}
