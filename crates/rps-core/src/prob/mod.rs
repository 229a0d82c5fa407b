//! Discrete probability primitives over the move alphabet.
//!
//! - `distribution`: a probability mass function over [`Move`](crate::model::Move).
//! - `table`: conditional probability tables keyed by parent move tuples, refit by counting.
//! - `error`: validation and lookup failures shared with the networks.

mod distribution;
mod error;
mod table;

pub use distribution::{Distribution, TOLERANCE};
pub use error::{LookupError, NetworkError, ValidationError};
pub use table::{ConditionalTable, FitReport};
