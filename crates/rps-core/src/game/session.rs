use crate::game::advice::{Advice, counter_move};
use crate::model::{Move, Round, Sample, Winner};
use crate::network::{Evidence, InferenceNetwork, NetworkVariant, OpponentModel, Posterior};
use crate::prob::FitReport;
use tracing::debug;

/// State of one play session: the network, its training set and the rounds played.
///
/// Everything mutates only through [`MatchSession::record_round`] and the refit calls,
/// which the controller invokes between rounds.
#[derive(Debug, Clone)]
pub struct MatchSession {
    network: InferenceNetwork,
    feedback: bool,
    training: Vec<Sample>,
    historical: usize,
    rounds: Vec<Round>,
    last_fit: FitReport,
}

/// Result of [`MatchSession::play_round`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundReport {
    pub round: Round,
    pub winner: Winner,
    pub sample: Option<Sample>,
    pub fit: FitReport,
    pub advice: Option<Advice>,
}

impl MatchSession {
    pub fn new(variant: NetworkVariant) -> Self {
        Self::with_training(variant, true, Vec::new())
    }

    /// Session seeded with previously collected samples. With `feedback` off, rounds
    /// played in this session are kept in history but never join the training set.
    pub fn with_training(variant: NetworkVariant, feedback: bool, training: Vec<Sample>) -> Self {
        let mut session = Self {
            network: InferenceNetwork::new(variant),
            feedback,
            historical: training.len(),
            training,
            rounds: Vec::new(),
            last_fit: FitReport::default(),
        };
        session.refit_current();
        session
    }

    pub fn variant(&self) -> NetworkVariant {
        self.network.variant()
    }

    pub fn feedback(&self) -> bool {
        self.feedback
    }

    pub fn network(&self) -> &InferenceNetwork {
        &self.network
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn last_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    pub fn training(&self) -> &[Sample] {
        &self.training
    }

    /// Samples the session was seeded with, excluding anything recorded since.
    pub fn historical_training(&self) -> &[Sample] {
        &self.training[..self.historical]
    }

    pub fn last_fit(&self) -> FitReport {
        self.last_fit
    }

    /// Stores a completed round and returns the training sample it produced, if any.
    pub fn record_round(&mut self, human: Move, computer: Move) -> Option<Sample> {
        let round = Round::new(human, computer);
        let sample = self
            .rounds
            .last()
            .map(|previous| Sample::between(previous, &round));
        self.rounds.push(round);

        let sample = sample.filter(|_| self.feedback)?;
        self.training.push(sample);
        Some(sample)
    }

    /// Rebuilds the network from `samples` alone.
    pub fn refit(&mut self, samples: &[Sample]) -> FitReport {
        self.last_fit = self.network.fit(samples);
        self.last_fit
    }

    /// Rebuilds the network from the session's own training set.
    pub fn refit_current(&mut self) -> FitReport {
        self.last_fit = self.network.fit(&self.training);
        debug!(
            target: "rps_core::fit",
            network = %self.network.variant(),
            samples = self.last_fit.samples,
            observed = self.last_fit.observed_groups,
            unseen = self.last_fit.unseen_groups,
            "refit"
        );
        self.last_fit
    }

    pub fn predict_opponent_move(&self, evidence: Evidence) -> Move {
        self.network.predict(evidence)
    }

    pub fn predict_posterior(&self, evidence: Evidence) -> Posterior {
        self.network.predict_distribution(evidence)
    }

    pub fn recommend_move(&self, predicted_opponent_move: Move) -> Move {
        counter_move(predicted_opponent_move)
    }

    /// Advice for the next round, using the last round as evidence.
    pub fn advise(&self) -> Option<Advice> {
        let evidence = Evidence::from(self.last_round()?);
        let posterior = self.predict_posterior(evidence);
        Some(Advice::from_posterior(evidence, &posterior))
    }

    /// Records, refits and advises in the order one round transition requires.
    pub fn play_round(&mut self, human: Move, computer: Move) -> RoundReport {
        let sample = self.record_round(human, computer);
        let fit = self.refit_current();
        let round = Round::new(human, computer);
        RoundReport {
            round,
            winner: round.winner(),
            sample,
            fit,
            advice: self.advise(),
        }
    }
}
