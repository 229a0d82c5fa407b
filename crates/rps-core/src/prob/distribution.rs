use super::error::ValidationError;
use crate::model::Move;
use serde::{Deserialize, Serialize};

/// Tolerance used for every sum-to-one check.
pub const TOLERANCE: f64 = 1e-9;

/// Probability mass over the three moves, indexed by [`Move::index`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionRepr")]
pub struct Distribution {
    probs: [f64; Move::COUNT],
}

#[derive(Deserialize)]
struct DistributionRepr {
    probs: [f64; Move::COUNT],
}

impl TryFrom<DistributionRepr> for Distribution {
    type Error = ValidationError;

    fn try_from(repr: DistributionRepr) -> Result<Self, Self::Error> {
        if let Some(&value) = repr.probs.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(ValidationError::InvalidProbability { value });
        }
        let dist = Self { probs: repr.probs };
        if !dist.is_normalized() {
            return Err(ValidationError::NotNormalized { total: dist.total() });
        }
        Ok(dist)
    }
}

impl Distribution {
    pub const fn uniform() -> Self {
        Self {
            probs: [1.0 / 3.0; Move::COUNT],
        }
    }

    /// Point mass on an observed move.
    pub const fn point(mv: Move) -> Self {
        let mut probs = [0.0; Move::COUNT];
        probs[mv.index()] = 1.0;
        Self { probs }
    }

    /// Normalizes raw non-negative weights into a distribution.
    pub fn from_weights(weights: [f64; Move::COUNT]) -> Result<Self, ValidationError> {
        if let Some(&value) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ValidationError::InvalidProbability { value });
        }
        let mut dist = Self { probs: weights };
        dist.normalize()?;
        Ok(dist)
    }

    /// Relative frequencies of `counts`; `None` when nothing was counted.
    pub fn from_counts(counts: [u32; Move::COUNT]) -> Option<Self> {
        let total: u64 = counts.iter().map(|&c| c as u64).sum();
        if total == 0 {
            return None;
        }
        let mut probs = [0.0; Move::COUNT];
        for (slot, &count) in probs.iter_mut().zip(counts.iter()) {
            *slot = count as f64 / total as f64;
        }
        Some(Self { probs })
    }

    pub fn probability_of(&self, mv: Move) -> f64 {
        self.probs[mv.index()]
    }

    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }

    pub fn is_normalized(&self) -> bool {
        self.probs.iter().all(|p| p.is_finite() && *p >= 0.0)
            && (self.total() - 1.0).abs() <= TOLERANCE
    }

    /// Rescales in place so the masses sum to one.
    pub fn normalize(&mut self) -> Result<(), ValidationError> {
        let total = self.total();
        if total == 0.0 {
            return Err(ValidationError::ZeroMass);
        }
        if !total.is_finite() {
            return Err(ValidationError::InvalidProbability { value: total });
        }
        for p in &mut self.probs {
            *p /= total;
        }
        Ok(())
    }

    /// Most probable move; the earliest move in canonical order wins ties.
    pub fn argmax(&self) -> Move {
        let mut best = Move::Rock;
        for mv in Move::ALL {
            if self.probability_of(mv) > self.probability_of(best) {
                best = mv;
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (Move, f64)> + '_ {
        Move::ALL.into_iter().map(|mv| (mv, self.probability_of(mv)))
    }

    pub fn as_array(&self) -> &[f64; Move::COUNT] {
        &self.probs
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self::uniform()
    }
}
