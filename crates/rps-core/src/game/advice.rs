use crate::model::Move;
use crate::network::{Evidence, Posterior};
use serde::{Deserialize, Serialize};

/// The move that beats `predicted`: rock → paper, paper → scissors, scissors → rock.
pub const fn counter_move(predicted: Move) -> Move {
    predicted.counter()
}

/// Recommendation derived from one network query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Advice {
    pub evidence: Evidence,
    pub predicted: Move,
    pub recommended: Move,
    /// Posterior mass on `predicted`.
    pub confidence: f64,
}

impl Advice {
    pub fn from_posterior(evidence: Evidence, posterior: &Posterior) -> Self {
        let predicted = posterior.predicted();
        Self {
            evidence,
            predicted,
            recommended: counter_move(predicted),
            confidence: posterior.target().probability_of(predicted),
        }
    }
}
