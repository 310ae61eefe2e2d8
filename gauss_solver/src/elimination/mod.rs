pub mod backwards_substitution;
pub mod forward_elimination;
pub mod gauss;
#[cfg(test)]
pub(crate) mod recording_matrix;

pub use gauss::{solve, SolveOutcome};
