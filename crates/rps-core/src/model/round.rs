use crate::model::moves::Move;
use crate::model::winner::Winner;
use serde::{Deserialize, Serialize};

/// Both throws of one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Round {
    pub human: Move,
    pub computer: Move,
}

impl Round {
    pub const fn new(human: Move, computer: Move) -> Self {
        Self { human, computer }
    }

    pub const fn winner(&self) -> Winner {
        Winner::decide(self.human, self.computer)
    }
}
