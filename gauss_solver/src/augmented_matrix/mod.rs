pub mod matrix;

pub use matrix::{AugmentedMatrix, EliminationMatrix};
