use crate::model::Move;
use crate::prob::{Distribution, LookupError};
use serde::Serialize;

/// What a query reports for one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeBelief {
    /// Evidence supplied by the caller, echoed back unchanged.
    Observed(Move),
    Inferred(Distribution),
}

impl NodeBelief {
    pub fn distribution(&self) -> Distribution {
        match self {
            NodeBelief::Observed(mv) => Distribution::point(*mv),
            NodeBelief::Inferred(dist) => *dist,
        }
    }
}

/// Per-node result of a network query, in topology order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Posterior {
    target_name: &'static str,
    target: Distribution,
    nodes: Vec<(&'static str, NodeBelief)>,
}

impl Posterior {
    pub(crate) fn new(
        target_name: &'static str,
        target: Distribution,
        nodes: Vec<(&'static str, NodeBelief)>,
    ) -> Self {
        Self {
            target_name,
            target,
            nodes,
        }
    }

    pub fn get(&self, name: &str) -> Result<&NodeBelief, LookupError> {
        self.nodes
            .iter()
            .find(|(node, _)| *node == name)
            .map(|(_, belief)| belief)
            .ok_or_else(|| LookupError::UnknownNode(name.to_string()))
    }

    pub fn distribution(&self, name: &str) -> Result<Distribution, LookupError> {
        self.get(name).map(NodeBelief::distribution)
    }

    pub fn target_name(&self) -> &'static str {
        self.target_name
    }

    pub fn target(&self) -> &Distribution {
        &self.target
    }

    pub fn predicted(&self) -> Move {
        self.target.argmax()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &NodeBelief)> + '_ {
        self.nodes.iter().map(|(name, belief)| (*name, belief))
    }
}
