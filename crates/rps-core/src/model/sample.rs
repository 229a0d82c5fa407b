use crate::model::moves::Move;
use crate::model::round::Round;
use serde::{Deserialize, Serialize};

/// Training row: the previous round's throws and the computer throw that followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    pub previous_human: Move,
    pub previous_computer: Move,
    pub next_computer: Move,
}

impl Sample {
    pub const fn new(previous_human: Move, previous_computer: Move, next_computer: Move) -> Self {
        Self {
            previous_human,
            previous_computer,
            next_computer,
        }
    }

    /// Builds the row linking `previous` to the round played after it.
    pub const fn between(previous: &Round, current: &Round) -> Self {
        Self::new(previous.human, previous.computer, current.computer)
    }

    /// Pairs every round with its successor. The first round has no predecessor, so
    /// `n` rounds yield `n - 1` samples.
    pub fn from_rounds(rounds: &[Round]) -> Vec<Sample> {
        rounds
            .windows(2)
            .map(|pair| Sample::between(&pair[0], &pair[1]))
            .collect()
    }

    /// The `(human, computer)` parent pair the direct network conditions on.
    pub const fn evidence_pair(&self) -> [Move; 2] {
        [self.previous_human, self.previous_computer]
    }
}

#[cfg(test)]
mod tests {
    use super::Sample;
    use crate::model::moves::Move;
    use crate::model::round::Round;

    #[test]
    fn from_rounds_skips_the_first_round() {
        let rounds = [
            Round::new(Move::Rock, Move::Paper),
            Round::new(Move::Scissors, Move::Scissors),
            Round::new(Move::Paper, Move::Rock),
        ];
        let samples = Sample::from_rounds(&rounds);
        assert_eq!(
            samples,
            vec![
                Sample::new(Move::Rock, Move::Paper, Move::Scissors),
                Sample::new(Move::Scissors, Move::Scissors, Move::Rock),
            ]
        );
    }

    #[test]
    fn from_rounds_handles_short_histories() {
        assert!(Sample::from_rounds(&[]).is_empty());
        assert!(Sample::from_rounds(&[Round::new(Move::Rock, Move::Rock)]).is_empty());
    }
}
