use crate::model::ParseMoveError;
use thiserror::Error;

/// Parameters that would break the sum-to-one invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("cannot normalize a distribution with zero total mass")]
    ZeroMass,
    #[error("probability {value} is not a finite non-negative number")]
    InvalidProbability { value: f64 },
    #[error("probabilities under parents [{parents}] sum to {total}, expected 1")]
    RowSum { parents: String, total: f64 },
    #[error("row [{parents}] has {got} parent values, table expects {expected}")]
    Arity {
        parents: String,
        expected: usize,
        got: usize,
    },
    #[error("row [{parents}] -> {child} is defined more than once")]
    DuplicateRow { parents: String, child: String },
    #[error("parent combination [{parents}] has no rows")]
    MissingParents { parents: String },
    #[error("probabilities sum to {total}, expected 1")]
    NotNormalized { total: f64 },
    #[error("table has {got} rows, expected {expected}")]
    RowCount { expected: usize, got: usize },
}

/// A query outside the declared domain of a table or network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("parent tuple [{parents}] has {got} values, table expects {expected}")]
    Arity {
        parents: String,
        expected: usize,
        got: usize,
    },
    #[error("unknown node '{0}'")]
    UnknownNode(String),
    #[error(transparent)]
    Move(#[from] ParseMoveError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

pub(crate) fn describe_parents<T: core::fmt::Display>(parents: &[T]) -> String {
    parents
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
