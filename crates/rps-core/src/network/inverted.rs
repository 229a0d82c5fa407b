use super::posterior::{NodeBelief, Posterior};
use super::topology::{COMPUTER, HUMAN, LABEL, Topology};
use super::{Evidence, OpponentModel};
use crate::model::{Move, Sample};
use crate::prob::{ConditionalTable, Distribution, FitReport};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Naive-Bayes network: a label (the next computer move) explains both previous moves.
///
/// The label is the observed next computer move, so its marginal is a plain frequency
/// count rather than a latent estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedNetwork {
    label: Distribution,
    human_given_label: ConditionalTable<1>,
    computer_given_label: ConditionalTable<1>,
}

impl InvertedNetwork {
    pub fn new() -> Self {
        Self {
            label: Distribution::uniform(),
            human_given_label: ConditionalTable::uniform(),
            computer_given_label: ConditionalTable::uniform(),
        }
    }

    pub fn label_prior(&self) -> &Distribution {
        &self.label
    }

    pub fn human_given_label(&self) -> &ConditionalTable<1> {
        &self.human_given_label
    }

    pub fn computer_given_label(&self) -> &ConditionalTable<1> {
        &self.computer_given_label
    }

    /// Unnormalized `P(label) * P(human | label) * P(computer | label)` per label.
    pub fn joint_scores(&self, evidence: Evidence) -> [f64; Move::COUNT] {
        Move::ALL.map(|label| {
            self.label.probability_of(label)
                * self
                    .human_given_label
                    .get([label])
                    .probability_of(evidence.human)
                * self
                    .computer_given_label
                    .get([label])
                    .probability_of(evidence.computer)
        })
    }

    fn label_posterior(&self, evidence: Evidence) -> Distribution {
        match Distribution::from_weights(self.joint_scores(evidence)) {
            Ok(posterior) => posterior,
            Err(err) => {
                debug!(
                    target: "rps_core::infer",
                    human = %evidence.human,
                    computer = %evidence.computer,
                    error = %err,
                    "evidence has zero likelihood under every label; using label prior"
                );
                self.label
            }
        }
    }
}

impl Default for InvertedNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentModel for InvertedNetwork {
    fn fit(&mut self, samples: &[Sample]) -> FitReport {
        *self = Self::new();
        if samples.is_empty() {
            debug!(target: "rps_core::fit", network = "inverted", "no samples; keeping prior");
        }

        let mut label_counts = [0u32; Move::COUNT];
        for sample in samples {
            label_counts[sample.next_computer.index()] += 1;
        }
        if let Some(label) = Distribution::from_counts(label_counts) {
            self.label = label;
        }

        let human = self.human_given_label.fit(
            samples,
            |sample| [sample.next_computer],
            |sample| sample.previous_human,
        );
        let computer = self.computer_given_label.fit(
            samples,
            |sample| [sample.next_computer],
            |sample| sample.previous_computer,
        );

        FitReport {
            samples: samples.len(),
            observed_groups: human.observed_groups + computer.observed_groups,
            unseen_groups: human.unseen_groups + computer.unseen_groups,
        }
    }

    fn predict_distribution(&self, evidence: Evidence) -> Posterior {
        let target = self.label_posterior(evidence);
        Posterior::new(
            LABEL,
            target,
            vec![
                (HUMAN, NodeBelief::Observed(evidence.human)),
                (COMPUTER, NodeBelief::Observed(evidence.computer)),
                (LABEL, NodeBelief::Inferred(target)),
            ],
        )
    }

    fn topology(&self) -> Topology {
        Topology::inverted()
    }
}
