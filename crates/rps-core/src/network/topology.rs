use crate::prob::LookupError;
use core::fmt;

pub const HUMAN: &str = "human";
pub const COMPUTER: &str = "computer";
pub const PREDICTION: &str = "prediction";
pub const LABEL: &str = "label";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Holds an unconditional distribution.
    Root,
    /// Holds a table conditioned on its parents.
    Conditional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpec {
    pub name: &'static str,
    pub kind: NodeKind,
    /// Evidence nodes are observed at query time and reported back verbatim.
    pub observed: bool,
}

/// Named nodes and parent → child edges of one of the two fixed graphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    name: &'static str,
    nodes: Vec<NodeSpec>,
    edges: Vec<(usize, usize)>,
}

impl Topology {
    /// `human → prediction ← computer`.
    pub fn direct() -> Self {
        Self {
            name: "direct",
            nodes: vec![
                NodeSpec {
                    name: HUMAN,
                    kind: NodeKind::Root,
                    observed: true,
                },
                NodeSpec {
                    name: COMPUTER,
                    kind: NodeKind::Root,
                    observed: true,
                },
                NodeSpec {
                    name: PREDICTION,
                    kind: NodeKind::Conditional,
                    observed: false,
                },
            ],
            edges: vec![(0, 2), (1, 2)],
        }
    }

    /// `human ← label → computer`.
    pub fn inverted() -> Self {
        Self {
            name: "inverted",
            nodes: vec![
                NodeSpec {
                    name: HUMAN,
                    kind: NodeKind::Conditional,
                    observed: true,
                },
                NodeSpec {
                    name: COMPUTER,
                    kind: NodeKind::Conditional,
                    observed: true,
                },
                NodeSpec {
                    name: LABEL,
                    kind: NodeKind::Root,
                    observed: false,
                },
            ],
            edges: vec![(2, 0), (2, 1)],
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Result<&NodeSpec, LookupError> {
        self.nodes
            .iter()
            .find(|node| node.name == name)
            .ok_or_else(|| LookupError::UnknownNode(name.to_string()))
    }

    pub fn edges(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.edges
            .iter()
            .map(|&(parent, child)| (self.nodes[parent].name, self.nodes[child].name))
    }

    pub fn parents_of(&self, name: &str) -> Result<Vec<&'static str>, LookupError> {
        self.node(name)?;
        Ok(self
            .edges()
            .filter(|(_, child)| *child == name)
            .map(|(parent, _)| parent)
            .collect())
    }

    /// The single unobserved node a query infers.
    pub fn target(&self) -> &'static str {
        self.nodes
            .iter()
            .find(|node| !node.observed)
            .map(|node| node.name)
            .unwrap_or(PREDICTION)
    }

    /// Kahn's algorithm over the edge list.
    pub fn is_acyclic(&self) -> bool {
        let mut indegree = vec![0usize; self.nodes.len()];
        for &(_, child) in &self.edges {
            indegree[child] += 1;
        }
        let mut ready: Vec<usize> = (0..self.nodes.len())
            .filter(|&idx| indegree[idx] == 0)
            .collect();
        let mut visited = 0;
        while let Some(node) = ready.pop() {
            visited += 1;
            for &(parent, child) in &self.edges {
                if parent == node {
                    indegree[child] -= 1;
                    if indegree[child] == 0 {
                        ready.push(child);
                    }
                }
            }
        }
        visited == self.nodes.len()
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} network:", self.name)?;
        for node in &self.nodes {
            let kind = match node.kind {
                NodeKind::Root => "root",
                NodeKind::Conditional => "conditional",
            };
            write!(f, " {}({kind})", node.name)?;
        }
        for (parent, child) in self.edges() {
            write!(f, " {parent}->{child}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_prediction_has_both_moves_as_parents() {
        let topology = Topology::direct();
        assert_eq!(
            topology.parents_of(PREDICTION).unwrap(),
            vec![HUMAN, COMPUTER]
        );
        assert!(topology.parents_of(HUMAN).unwrap().is_empty());
        assert_eq!(topology.target(), PREDICTION);
    }

    #[test]
    fn inverted_label_explains_both_moves() {
        let topology = Topology::inverted();
        assert_eq!(topology.parents_of(HUMAN).unwrap(), vec![LABEL]);
        assert_eq!(topology.parents_of(COMPUTER).unwrap(), vec![LABEL]);
        assert_eq!(topology.target(), LABEL);
        assert_eq!(topology.node(LABEL).unwrap().kind, NodeKind::Root);
    }

    #[test]
    fn both_graphs_are_acyclic() {
        assert!(Topology::direct().is_acyclic());
        assert!(Topology::inverted().is_acyclic());
    }

    #[test]
    fn unknown_node_is_a_lookup_error() {
        let err = Topology::direct().parents_of("Y").unwrap_err();
        assert_eq!(err, LookupError::UnknownNode("Y".to_string()));
    }

    #[test]
    fn display_lists_nodes_and_edges() {
        let summary = Topology::inverted().to_string();
        assert!(summary.starts_with("inverted network:"));
        assert!(summary.contains("label(root)"));
        assert!(summary.contains("label->human"));
    }
}
