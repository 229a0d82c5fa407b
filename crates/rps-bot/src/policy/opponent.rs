use super::{Player, PlayerContext};
use crate::strategy::{StrategyKind, next_adaptive_move};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rps_core::model::Move;

/// Simulated computer side driven by a [`StrategyKind`].
#[derive(Debug, Clone)]
pub struct AdaptiveOpponent {
    kind: StrategyKind,
    rng: StdRng,
}

impl AdaptiveOpponent {
    pub fn new(kind: StrategyKind, seed: u64) -> Self {
        Self {
            kind,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }
}

impl Player for AdaptiveOpponent {
    fn choose(&mut self, ctx: &PlayerContext) -> Move {
        next_adaptive_move(ctx.last_round(), self.kind, &mut self.rng)
    }

    fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}
