mod advised;
mod opponent;
mod scripted;

pub use advised::AdvisedPlayer;
pub use opponent::AdaptiveOpponent;
pub use scripted::ScriptedPlayer;

use rps_core::game::Advice;
use rps_core::model::{Move, Round};

/// Context provided to players before each throw
pub struct PlayerContext<'a> {
    /// Completed rounds, oldest first.
    pub rounds: &'a [Round],
    /// Recommendation for the human side, when the session has one.
    pub advice: Option<&'a Advice>,
}

impl<'a> PlayerContext<'a> {
    pub fn new(rounds: &'a [Round], advice: Option<&'a Advice>) -> Self {
        Self { rounds, advice }
    }

    pub fn last_round(&self) -> Option<&'a Round> {
        self.rounds.last()
    }

    pub fn round_index(&self) -> usize {
        self.rounds.len()
    }
}

/// Unified interface for both sides of a match
pub trait Player: Send {
    /// Choose the next throw
    fn choose(&mut self, ctx: &PlayerContext) -> Move;

    /// Optional: observe the completed round
    fn observe(&mut self, _round: &Round) {}

    fn name(&self) -> &'static str;
}
