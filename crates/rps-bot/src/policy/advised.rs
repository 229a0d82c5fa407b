use super::{Player, PlayerContext};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rps_core::game::Advice;
use rps_core::model::Move;
use tracing::{Level, event};

/// Simulated human who takes the adviser's recommendation.
///
/// With `compliance` below one the player ignores the advice on that share of rounds
/// and throws at random instead. Without advice (the opening round) it always throws at
/// random.
#[derive(Debug, Clone)]
pub struct AdvisedPlayer {
    compliance: f64,
    rng: StdRng,
    followed: usize,
    ignored: usize,
}

impl AdvisedPlayer {
    pub fn new(seed: u64) -> Self {
        Self::with_compliance(seed, 1.0)
    }

    /// `compliance` is clamped into `[0, 1]`; NaN counts as zero.
    pub fn with_compliance(seed: u64, compliance: f64) -> Self {
        let compliance = if compliance.is_nan() {
            0.0
        } else {
            compliance.clamp(0.0, 1.0)
        };
        Self {
            compliance,
            rng: StdRng::seed_from_u64(seed),
            followed: 0,
            ignored: 0,
        }
    }

    pub fn compliance(&self) -> f64 {
        self.compliance
    }

    /// Rounds where advice existed and was taken.
    pub fn followed(&self) -> usize {
        self.followed
    }

    /// Rounds where advice existed but was ignored.
    pub fn ignored(&self) -> usize {
        self.ignored
    }
}

impl Player for AdvisedPlayer {
    fn choose(&mut self, ctx: &PlayerContext) -> Move {
        let Some(advice) = ctx.advice else {
            return Move::random(&mut self.rng);
        };

        let follow = self.rng.gen_bool(self.compliance);
        let chosen = if follow {
            self.followed += 1;
            advice.recommended
        } else {
            self.ignored += 1;
            Move::random(&mut self.rng)
        };
        log_advice(ctx.round_index(), advice, follow, chosen);
        chosen
    }

    fn name(&self) -> &'static str {
        "advised"
    }
}

fn log_advice(round: usize, advice: &Advice, followed: bool, chosen: Move) {
    if !tracing::enabled!(target: "rps_bot::advice", Level::INFO) {
        return;
    }

    event!(
        target: "rps_bot::advice",
        Level::INFO,
        round,
        evidence_human = %advice.evidence.human,
        evidence_computer = %advice.evidence.computer,
        predicted = %advice.predicted,
        recommended = %advice.recommended,
        confidence = advice.confidence,
        followed,
        chosen = %chosen,
        "recommended next move"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rps_core::network::Evidence;

    fn advice(recommended: Move) -> Advice {
        Advice {
            evidence: Evidence::new(Move::Rock, Move::Rock),
            predicted: recommended.next().next(),
            recommended,
            confidence: 0.5,
        }
    }

    #[test]
    fn full_compliance_always_plays_the_recommendation() {
        let mut player = AdvisedPlayer::new(3);
        for mv in Move::ALL {
            let advice = advice(mv);
            let ctx = PlayerContext::new(&[], Some(&advice));
            assert_eq!(player.choose(&ctx), mv);
        }
        assert_eq!(player.followed(), 3);
        assert_eq!(player.ignored(), 0);
    }

    #[test]
    fn zero_compliance_never_consults_the_recommendation() {
        let mut player = AdvisedPlayer::with_compliance(3, 0.0);
        let advice = advice(Move::Paper);
        let ctx = PlayerContext::new(&[], Some(&advice));
        for _ in 0..20 {
            player.choose(&ctx);
        }
        assert_eq!(player.followed(), 0);
        assert_eq!(player.ignored(), 20);
    }

    #[test]
    fn compliance_is_clamped() {
        assert_eq!(AdvisedPlayer::with_compliance(0, 4.0).compliance(), 1.0);
        assert_eq!(AdvisedPlayer::with_compliance(0, -1.0).compliance(), 0.0);
        assert_eq!(AdvisedPlayer::with_compliance(0, f64::NAN).compliance(), 0.0);
    }

    #[test]
    fn opening_round_is_random_and_reproducible() {
        let ctx = PlayerContext::new(&[], None);
        let mut a = AdvisedPlayer::new(12);
        let mut b = AdvisedPlayer::new(12);
        for _ in 0..8 {
            assert_eq!(a.choose(&ctx), b.choose(&ctx));
        }
        assert_eq!(a.followed() + a.ignored(), 0);
    }
}
