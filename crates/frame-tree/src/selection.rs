use std::fmt;

use crate::ids::{BodyId, StarId};

/// Something a reference frame can be centred on, or a frame tree owned by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selection {
    Star(StarId),
    Body(BodyId),
}

impl Selection {
    pub fn star(self) -> Option<StarId> {
        match self {
            Selection::Star(id) => Some(id),
            Selection::Body(_) => None,
        }
    }

    pub fn body(self) -> Option<BodyId> {
        match self {
            Selection::Body(id) => Some(id),
            Selection::Star(_) => None,
        }
    }
}

impl From<StarId> for Selection {
    fn from(id: StarId) -> Self {
        Selection::Star(id)
    }
}

impl From<BodyId> for Selection {
    fn from(id: BodyId) -> Self {
        Selection::Body(id)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Star(id) => id.fmt(f),
            Selection::Body(id) => id.fmt(f),
        }
    }
}
