use super::StrategyKind;
use rand::Rng;
use rps_core::model::{Move, Round, Winner};

/// Next computer throw given the previous round, if there was one.
///
/// The first round and every tie draw uniformly from `rng`, as does the `Random`
/// kind. After a human win both shift variants play the move after the human's last
/// throw in the rock → paper → scissors cycle.
pub fn next_adaptive_move<R: Rng + ?Sized>(
    last_round: Option<&Round>,
    kind: StrategyKind,
    rng: &mut R,
) -> Move {
    let Some(last) = last_round else {
        return Move::random(rng);
    };

    match (kind, last.winner()) {
        (StrategyKind::Random, _) | (_, Winner::Tie) => Move::random(rng),
        (StrategyKind::WinStayLoseShift, Winner::Computer) => last.computer,
        (StrategyKind::WinShiftLoseShift, Winner::Computer) => last.human,
        (StrategyKind::WinStayLoseShift | StrategyKind::WinShiftLoseShift, Winner::Human) => {
            last.human.next()
        }
    }
}
