//! Bayesian networks that predict the computer's next throw from the previous round.
//!
//! Two fixed graphs are supported:
//! - `direct`: the prediction node is conditioned jointly on both previous moves.
//! - `inverted`: a label node (the next computer move) explains both previous moves,
//!   which are assumed independent given the label.
//!
//! Both refit from the full sample history on every call to [`OpponentModel::fit`].

mod direct;
mod inverted;
mod posterior;
pub mod topology;

pub use direct::DirectNetwork;
pub use inverted::InvertedNetwork;
pub use posterior::{NodeBelief, Posterior};
pub use topology::{NodeKind, NodeSpec, Topology};

use crate::model::{Move, Round, Sample};
use crate::prob::{FitReport, LookupError, NetworkError};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Observed throws of the round preceding the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Evidence {
    pub human: Move,
    pub computer: Move,
}

impl Evidence {
    pub const fn new(human: Move, computer: Move) -> Self {
        Self { human, computer }
    }

    /// Parses move names; a name outside the alphabet is a lookup failure.
    pub fn parse(human: &str, computer: &str) -> Result<Self, LookupError> {
        Ok(Self::new(human.parse()?, computer.parse()?))
    }
}

impl From<Round> for Evidence {
    fn from(round: Round) -> Self {
        Self::new(round.human, round.computer)
    }
}

impl From<&Round> for Evidence {
    fn from(round: &Round) -> Self {
        Self::new(round.human, round.computer)
    }
}

/// Common surface of the two network variants.
pub trait OpponentModel {
    /// Recomputes every learned parameter from `samples`.
    fn fit(&mut self, samples: &[Sample]) -> FitReport;

    /// Most probable next computer move, ties broken rock < paper < scissors.
    fn predict(&self, evidence: Evidence) -> Move {
        self.predict_distribution(evidence).predicted()
    }

    fn predict_distribution(&self, evidence: Evidence) -> Posterior;

    fn topology(&self) -> Topology;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkVariant {
    #[serde(alias = "v-dag")]
    Direct,
    #[serde(alias = "inv(v-dag)", alias = "naive")]
    Inverted,
}

impl NetworkVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            NetworkVariant::Direct => "direct",
            NetworkVariant::Inverted => "inverted",
        }
    }
}

impl fmt::Display for NetworkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network variant '{0}' (expected direct or inverted)")]
pub struct ParseVariantError(pub String);

impl FromStr for NetworkVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" | "v-dag" | "vdag" => Ok(NetworkVariant::Direct),
            "inverted" | "inv(v-dag)" | "inv-vdag" | "naive" => Ok(NetworkVariant::Inverted),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

/// The network chosen for a session.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceNetwork {
    Direct(DirectNetwork),
    Inverted(InvertedNetwork),
}

impl InferenceNetwork {
    /// Fresh network with uniform parameters.
    pub fn new(variant: NetworkVariant) -> Self {
        match variant {
            NetworkVariant::Direct => InferenceNetwork::Direct(DirectNetwork::new()),
            NetworkVariant::Inverted => InferenceNetwork::Inverted(InvertedNetwork::new()),
        }
    }

    pub fn variant(&self) -> NetworkVariant {
        match self {
            InferenceNetwork::Direct(_) => NetworkVariant::Direct,
            InferenceNetwork::Inverted(_) => NetworkVariant::Inverted,
        }
    }

    /// Query with move names, as supplied by an external controller.
    pub fn predict_named(&self, human: &str, computer: &str) -> Result<Posterior, NetworkError> {
        let evidence = Evidence::parse(human, computer)?;
        Ok(self.predict_distribution(evidence))
    }
}

impl OpponentModel for InferenceNetwork {
    fn fit(&mut self, samples: &[Sample]) -> FitReport {
        match self {
            InferenceNetwork::Direct(net) => net.fit(samples),
            InferenceNetwork::Inverted(net) => net.fit(samples),
        }
    }

    fn predict(&self, evidence: Evidence) -> Move {
        match self {
            InferenceNetwork::Direct(net) => net.predict(evidence),
            InferenceNetwork::Inverted(net) => net.predict(evidence),
        }
    }

    fn predict_distribution(&self, evidence: Evidence) -> Posterior {
        match self {
            InferenceNetwork::Direct(net) => net.predict_distribution(evidence),
            InferenceNetwork::Inverted(net) => net.predict_distribution(evidence),
        }
    }

    fn topology(&self) -> Topology {
        match self {
            InferenceNetwork::Direct(net) => net.topology(),
            InferenceNetwork::Inverted(net) => net.topology(),
        }
    }
}
