use super::distribution::{Distribution, TOLERANCE};
use super::error::{LookupError, ValidationError, describe_parents};
use crate::model::Move;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Conditional probability table over a child move given `N` parent moves.
///
/// Rows are stored densely for every one of the `3^N` parent tuples, ordered
/// lexicographically by canonical move order, so the table is never partial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr")]
pub struct ConditionalTable<const N: usize> {
    rows: Vec<Distribution>,
}

#[derive(Deserialize)]
struct TableRepr {
    rows: Vec<Distribution>,
}

impl<const N: usize> TryFrom<TableRepr> for ConditionalTable<N> {
    type Error = ValidationError;

    fn try_from(repr: TableRepr) -> Result<Self, Self::Error> {
        let expected = Self::domain_size();
        if repr.rows.len() != expected {
            return Err(ValidationError::RowCount {
                expected,
                got: repr.rows.len(),
            });
        }
        Ok(Self { rows: repr.rows })
    }
}

/// Outcome of a counting pass, used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FitReport {
    pub samples: usize,
    pub observed_groups: usize,
    pub unseen_groups: usize,
}

impl<const N: usize> ConditionalTable<N> {
    pub fn domain_size() -> usize {
        Move::COUNT.pow(N as u32)
    }

    pub fn uniform() -> Self {
        Self {
            rows: vec![Distribution::uniform(); Self::domain_size()],
        }
    }

    /// Builds a table from explicit `(parents, child, probability)` rows.
    ///
    /// Every parent tuple in the domain must appear and its probabilities must sum to
    /// one; a child missing under a present tuple has probability zero.
    pub fn from_rows<I, P>(rows: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (P, Move, f64)>,
        P: AsRef<[Move]>,
    {
        let mut weights = vec![[None::<f64>; Move::COUNT]; Self::domain_size()];

        for (parents, child, probability) in rows {
            let parents = parents.as_ref();
            let key = Self::key_from_slice(parents).ok_or_else(|| ValidationError::Arity {
                parents: describe_parents(parents),
                expected: N,
                got: parents.len(),
            })?;
            if !probability.is_finite() || probability < 0.0 {
                return Err(ValidationError::InvalidProbability { value: probability });
            }
            let slot = &mut weights[Self::index_of(&key)][child.index()];
            if slot.is_some() {
                return Err(ValidationError::DuplicateRow {
                    parents: describe_parents(parents),
                    child: child.to_string(),
                });
            }
            *slot = Some(probability);
        }

        let mut dense = Vec::with_capacity(weights.len());
        for (index, row) in weights.into_iter().enumerate() {
            let parents = describe_parents(&Self::parents_at(index));
            if row.iter().all(Option::is_none) {
                return Err(ValidationError::MissingParents { parents });
            }
            let probs = row.map(|p| p.unwrap_or(0.0));
            let total: f64 = probs.iter().sum();
            if (total - 1.0).abs() > TOLERANCE {
                return Err(ValidationError::RowSum { parents, total });
            }
            dense.push(Distribution::from_weights(probs)?);
        }

        Ok(Self { rows: dense })
    }

    /// Recounts every group of `samples` that shares a parent tuple and replaces that
    /// group's row with the normalized child counts. Groups with no samples keep the
    /// row they already had.
    pub fn fit<T, P, C>(&mut self, samples: &[T], parents: P, child: C) -> FitReport
    where
        P: Fn(&T) -> [Move; N],
        C: Fn(&T) -> Move,
    {
        let mut counts = vec![[0u32; Move::COUNT]; self.rows.len()];
        for sample in samples {
            let index = Self::index_of(&parents(sample));
            counts[index][child(sample).index()] += 1;
        }

        let mut report = FitReport {
            samples: samples.len(),
            ..FitReport::default()
        };
        for (row, tally) in self.rows.iter_mut().zip(counts) {
            match Distribution::from_counts(tally) {
                Some(dist) => {
                    *row = dist;
                    report.observed_groups += 1;
                }
                None => report.unseen_groups += 1,
            }
        }

        if report.unseen_groups > 0 {
            debug!(
                target: "rps_core::fit",
                arity = N,
                samples = report.samples,
                observed = report.observed_groups,
                unseen = report.unseen_groups,
                "parent combinations without samples keep their prior row"
            );
        }

        report
    }

    /// Distribution of the child for a dynamically sized parent tuple.
    pub fn query(&self, parents: &[Move]) -> Result<&Distribution, LookupError> {
        let key = Self::key_from_slice(parents).ok_or_else(|| LookupError::Arity {
            parents: describe_parents(parents),
            expected: N,
            got: parents.len(),
        })?;
        Ok(self.get(key))
    }

    pub fn get(&self, parents: [Move; N]) -> &Distribution {
        &self.rows[Self::index_of(&parents)]
    }

    pub fn iter(&self) -> impl Iterator<Item = ([Move; N], &Distribution)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, dist)| (Self::parents_at(index), dist))
    }

    fn key_from_slice(parents: &[Move]) -> Option<[Move; N]> {
        <[Move; N]>::try_from(parents).ok()
    }

    fn index_of(parents: &[Move; N]) -> usize {
        parents
            .iter()
            .fold(0, |acc, mv| acc * Move::COUNT + mv.index())
    }

    fn parents_at(index: usize) -> [Move; N] {
        let mut parents = [Move::Rock; N];
        let mut rest = index;
        for slot in parents.iter_mut().rev() {
            *slot = Move::ALL[rest % Move::COUNT];
            rest /= Move::COUNT;
        }
        parents
    }
}

impl<const N: usize> Default for ConditionalTable<N> {
    fn default() -> Self {
        Self::uniform()
    }
}
