pub mod moves;
pub mod round;
pub mod sample;
pub mod winner;

pub use moves::{Move, ParseMoveError};
pub use round::Round;
pub use sample::Sample;
pub use winner::Winner;
