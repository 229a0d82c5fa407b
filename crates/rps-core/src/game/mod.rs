pub mod advice;
pub mod serialization;
pub mod session;

pub use advice::{Advice, counter_move};
pub use serialization::SessionSnapshot;
pub use session::{MatchSession, RoundReport};
