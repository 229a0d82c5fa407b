use super::posterior::{NodeBelief, Posterior};
use super::topology::{COMPUTER, HUMAN, PREDICTION, Topology};
use super::{Evidence, OpponentModel};
use crate::model::{Move, Sample};
use crate::prob::{ConditionalTable, Distribution, FitReport};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// `P(next computer | previous human, previous computer)` with uniform root nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectNetwork {
    human: Distribution,
    computer: Distribution,
    prediction: ConditionalTable<2>,
    prior: ConditionalTable<2>,
}

impl DirectNetwork {
    pub fn new() -> Self {
        Self::with_prior(ConditionalTable::uniform())
    }

    /// Network whose prediction table starts from (and refits on top of) `prior`.
    pub fn with_prior(prior: ConditionalTable<2>) -> Self {
        Self {
            human: Distribution::uniform(),
            computer: Distribution::uniform(),
            prediction: prior.clone(),
            prior,
        }
    }

    pub fn prediction_table(&self) -> &ConditionalTable<2> {
        &self.prediction
    }

    /// Root marginals. These are never re-estimated from data.
    pub fn roots(&self) -> (&Distribution, &Distribution) {
        (&self.human, &self.computer)
    }
}

impl Default for DirectNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentModel for DirectNetwork {
    fn fit(&mut self, samples: &[Sample]) -> FitReport {
        self.prediction = self.prior.clone();
        if samples.is_empty() {
            debug!(target: "rps_core::fit", network = "direct", "no samples; keeping prior");
        }
        self.prediction
            .fit(samples, Sample::evidence_pair, |sample| sample.next_computer)
    }

    fn predict(&self, evidence: Evidence) -> Move {
        self.prediction
            .get([evidence.human, evidence.computer])
            .argmax()
    }

    fn predict_distribution(&self, evidence: Evidence) -> Posterior {
        let target = *self.prediction.get([evidence.human, evidence.computer]);
        Posterior::new(
            PREDICTION,
            target,
            vec![
                (HUMAN, NodeBelief::Observed(evidence.human)),
                (COMPUTER, NodeBelief::Observed(evidence.computer)),
                (PREDICTION, NodeBelief::Inferred(target)),
            ],
        )
    }

    fn topology(&self) -> Topology {
        Topology::direct()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prob::TOLERANCE;

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(Move::Rock, Move::Paper, Move::Scissors),
            Sample::new(Move::Paper, Move::Scissors, Move::Rock),
        ]
    }

    #[test]
    fn only_observed_outcome_wins_the_argmax() {
        let mut net = DirectNetwork::new();
        net.fit(&samples());
        let evidence = Evidence::new(Move::Rock, Move::Paper);
        assert_eq!(net.predict(evidence), Move::Scissors);
        assert_eq!(net.predict_distribution(evidence).predicted(), Move::Scissors);
    }

    #[test]
    fn roots_stay_uniform_after_fit() {
        let mut net = DirectNetwork::new();
        net.fit(&samples());
        let (human, computer) = net.roots();
        assert_eq!(human, &Distribution::uniform());
        assert_eq!(computer, &Distribution::uniform());
    }

    #[test]
    fn posterior_reports_evidence_as_point_masses() {
        let mut net = DirectNetwork::new();
        net.fit(&samples());
        let posterior = net.predict_distribution(Evidence::new(Move::Rock, Move::Paper));
        assert_eq!(
            posterior.get(HUMAN).unwrap(),
            &NodeBelief::Observed(Move::Rock)
        );
        let computer = posterior.distribution(COMPUTER).unwrap();
        assert_eq!(computer.probability_of(Move::Paper), 1.0);
        let target = posterior.distribution(PREDICTION).unwrap();
        assert!((target.probability_of(Move::Scissors) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn unseen_evidence_falls_back_to_uniform() {
        let mut net = DirectNetwork::new();
        net.fit(&samples());
        let posterior = net.predict_distribution(Evidence::new(Move::Scissors, Move::Scissors));
        assert_eq!(posterior.target(), &Distribution::uniform());
        assert_eq!(posterior.predicted(), Move::Rock);
    }

    #[test]
    fn refit_is_a_full_recompute() {
        let mut net = DirectNetwork::new();
        net.fit(&samples());
        net.fit(&[Sample::new(Move::Scissors, Move::Rock, Move::Paper)]);
        let table = net.prediction_table();
        assert_eq!(table.get([Move::Rock, Move::Paper]), &Distribution::uniform());
        assert_eq!(table.get([Move::Scissors, Move::Rock]).argmax(), Move::Paper);
    }

    #[test]
    fn empty_fit_restores_the_prior() {
        let mut net = DirectNetwork::new();
        net.fit(&samples());
        let report = net.fit(&[]);
        assert_eq!(report.samples, 0);
        assert_eq!(report.observed_groups, 0);
        assert_eq!(report.unseen_groups, 9);
        assert_eq!(net.prediction_table(), &ConditionalTable::uniform());
    }

    #[test]
    fn decoding_rejects_a_truncated_prediction_table() {
        let mut net = DirectNetwork::new();
        net.fit(&samples());
        let mut json: serde_json::Value = serde_json::to_value(&net).unwrap();
        assert!(serde_json::from_value::<DirectNetwork>(json.clone()).is_ok());

        json["prediction"]["rows"] = serde_json::json!([]);
        assert!(serde_json::from_value::<DirectNetwork>(json).is_err());
    }
}
