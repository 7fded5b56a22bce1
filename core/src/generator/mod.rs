pub use derangement::*;
pub use problem::*;
pub use scramble::*;
pub use sequence::*;
pub use target::*;

mod derangement;
mod problem;
mod scramble;
mod sequence;
mod target;
