pub mod policy;
pub mod strategy;

pub use policy::{AdaptiveOpponent, AdvisedPlayer, Player, PlayerContext, ScriptedPlayer};
pub use strategy::{ParseStrategyError, StrategyKind, next_adaptive_move};
