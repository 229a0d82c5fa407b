use crate::model::moves::Move;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Human,
    Computer,
    Tie,
}

impl Winner {
    pub const fn decide(human: Move, computer: Move) -> Winner {
        if human.beats(computer) {
            Winner::Human
        } else if computer.beats(human) {
            Winner::Computer
        } else {
            Winner::Tie
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Winner::Human => "human",
            Winner::Computer => "computer",
            Winner::Tie => "tie",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Winner;
    use crate::model::moves::Move;

    #[test]
    fn same_move_is_a_tie() {
        for mv in Move::ALL {
            assert_eq!(Winner::decide(mv, mv), Winner::Tie);
        }
    }

    #[test]
    fn rock_crushes_scissors() {
        assert_eq!(Winner::decide(Move::Rock, Move::Scissors), Winner::Human);
        assert_eq!(Winner::decide(Move::Scissors, Move::Rock), Winner::Computer);
    }

    #[test]
    fn paper_covers_rock() {
        assert_eq!(Winner::decide(Move::Paper, Move::Rock), Winner::Human);
        assert_eq!(Winner::decide(Move::Rock, Move::Paper), Winner::Computer);
    }
}
