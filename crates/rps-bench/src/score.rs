use rps_core::model::Winner;
use serde::Serialize;

/// Running totals for one match. Ties score for nobody but are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBoard {
    human: u32,
    computer: u32,
    ties: u32,
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self {
            human: 0,
            computer: 0,
            ties: 0,
        }
    }

    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Human => self.human += 1,
            Winner::Computer => self.computer += 1,
            Winner::Tie => self.ties += 1,
        }
    }

    pub fn human(&self) -> u32 {
        self.human
    }

    pub fn computer(&self) -> u32 {
        self.computer
    }

    pub fn ties(&self) -> u32 {
        self.ties
    }

    pub fn rounds(&self) -> u32 {
        self.human + self.computer + self.ties
    }

    /// Side ahead on points, or `Winner::Tie` when level.
    pub fn leader(&self) -> Winner {
        match self.human.cmp(&self.computer) {
            std::cmp::Ordering::Greater => Winner::Human,
            std::cmp::Ordering::Less => Winner::Computer,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }
}
