use super::{Player, PlayerContext};
use rps_core::model::Move;

/// Plays a fixed list of moves in order, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    script: Vec<Move>,
    cursor: usize,
}

impl ScriptedPlayer {
    /// Returns `None` for an empty script.
    pub fn new(script: Vec<Move>) -> Option<Self> {
        if script.is_empty() {
            return None;
        }
        Some(Self { script, cursor: 0 })
    }

    pub fn script(&self) -> &[Move] {
        &self.script
    }
}

impl Player for ScriptedPlayer {
    fn choose(&mut self, _ctx: &PlayerContext) -> Move {
        let mv = self.script[self.cursor % self.script.len()];
        self.cursor = (self.cursor + 1) % self.script.len();
        mv
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
